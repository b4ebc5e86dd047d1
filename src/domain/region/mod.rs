//! Region module - barriers grouped by geographic region.
//!
//! - `BarrierCatalog` - every barrier of a project, parsed from CSV
//! - `RegionCostTable` - per-region cost totals feeding budget bounds

mod barrier;
mod cost_table;

pub use barrier::{Barrier, BarrierAttribute, BarrierCatalog};
pub use cost_table::RegionCostTable;

#[cfg(test)]
pub(crate) use barrier::tests::BARRIERS_CSV;
