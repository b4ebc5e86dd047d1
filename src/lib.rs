//! Tide Gate Planner - Decision support for tide gate restoration
//!
//! This crate turns a planner's choices (regions, budget schedule, targets)
//! into OptiPass optimizer requests, and the optimizer's answers into the
//! tables and curves shown on the dashboard.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
