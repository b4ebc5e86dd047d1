//! Session module - the state of one planning session.

mod planning;

pub use planning::{PlanningSession, SessionDefaults, TargetMode};
