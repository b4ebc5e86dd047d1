//! Map description published by a project.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Contents of a project's `mapinfo` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapInfo {
    #[serde(default)]
    pub map_type: Option<String>,

    #[serde(default)]
    pub map_file: Option<String>,

    #[serde(default)]
    pub map_title: Option<String>,
}

impl MapInfo {
    /// Parses the JSON text served by the project.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text).map_err(|e| {
            DomainError::new(ErrorCode::MalformedCatalog, format!("map info: {}", e))
                .with_detail("catalog", "mapinfo")
        })
    }

    /// Resolves the declared map type.
    ///
    /// # Errors
    ///
    /// `UnknownMapType` if the type is missing or not one we can draw.
    pub fn kind(&self) -> Result<MapKind, DomainError> {
        match self.map_type.as_deref() {
            Some(tag) => MapKind::from_tag(tag),
            None => Err(DomainError::new(
                ErrorCode::UnknownMapType,
                "map info is missing a map_type",
            )),
        }
    }
}

/// Map rendering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapKind {
    /// A fixed image fetched from the server.
    StaticMap,
    /// Background tiles from a tile server, framed around the barriers.
    TiledMap,
}

const MAP_KINDS: [(&str, MapKind); 2] = [
    ("StaticMap", MapKind::StaticMap),
    ("TiledMap", MapKind::TiledMap),
];

impl MapKind {
    pub fn from_tag(tag: &str) -> Result<Self, DomainError> {
        MAP_KINDS
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UnknownMapType, format!("unknown map type: {}", tag))
                    .with_detail("map_type", tag)
            })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            MapKind::StaticMap => "StaticMap",
            MapKind::TiledMap => "TiledMap",
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
