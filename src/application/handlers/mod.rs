//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod load_project;
pub mod run_optimizer;

pub use load_project::{LoadProjectCommand, LoadProjectHandler, ProjectContext};
pub use run_optimizer::{RunError, RunOptimizerHandler};
