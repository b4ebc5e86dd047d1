//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the tide gate planning domain.

mod dollars;
mod errors;
mod flag;
mod ids;

pub use dollars::{format_dollars, parse_dollars, DollarAmount};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use flag::deserialize_flag;
pub use ids::{BarrierId, RunId, TargetId};
