//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, dollar amounts, errors)
//! - `budget` - Basic, advanced and fixed budget schedules
//! - `region` - Barrier catalog and per-region cost totals
//! - `target` - Restoration targets, selections and column mappings
//! - `map` - Static and tiled map descriptions
//! - `run` - Run validation and frozen run parameters
//! - `results` - Tables and curves built from optimizer output
//! - `session` - One user's planning state

pub mod budget;
pub mod foundation;
pub mod map;
pub mod region;
pub mod results;
pub mod run;
pub mod session;
pub mod target;
