//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `optipass` - OptiPass REST client and in-memory stand-ins

pub mod optipass;

pub use optipass::{
    InMemoryProjectReader, OptiPassClient, OptiPassConfig, ProjectFiles, ScriptedOptimizer,
};
