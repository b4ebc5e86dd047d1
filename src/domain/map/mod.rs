//! Map module - which map strategy a project uses and what it needs.
//!
//! The project names its strategy by tag. Tags resolve to [`MapKind`]
//! through a fixed table and an unrecognized tag is a configuration error.

mod info;
mod view;

pub use info::{MapInfo, MapKind};
pub use view::{
    Extent, MapView, StaticMap, TiledMap, STATIC_MAP_HEIGHT, STATIC_MAP_WIDTH, TILED_MAP_HEIGHT,
    TILED_MAP_WIDTH,
};
