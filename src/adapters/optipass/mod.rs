//! OptiPass Adapters.
//!
//! Implementations of the OptimizerService and ProjectReader ports.
//!
//! ## Available Adapters
//!
//! - `OptiPassClient` - HTTP client for the OptiPass REST server
//! - `ScriptedOptimizer` - Queue of canned optimizer answers for testing
//! - `InMemoryProjectReader` - Fixed project files for testing

mod client;
mod scripted;

pub use client::{run_query, OptiPassClient, OptiPassConfig};
pub use scripted::{InMemoryProjectReader, ProjectFiles, ScriptedOptimizer};
