//! Target module - restoration objectives and how users choose them.
//!
//! - `TargetCatalog` - targets of a project and their grid layout
//! - `ColumnMapping` - optional scenario selector
//! - `TargetSelection` - checkbox or weighted selection

mod catalog;
mod mapping;
mod selection;

pub use catalog::{Target, TargetCatalog};
pub use mapping::ColumnMapping;
pub use selection::{TargetSelection, WeightedTarget};

#[cfg(test)]
pub(crate) use catalog::tests::{LAYOUT, TARGETS_CSV};
