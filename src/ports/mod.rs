//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OptimizerService` - runs the barrier optimizer
//! - `ProjectReader` - reads a project's catalogs and map description

mod optimizer_service;
mod project_reader;

pub use optimizer_service::{OptimizerError, OptimizerService, NO_SOLUTION};
pub use project_reader::{ProjectReader, TargetFiles};
