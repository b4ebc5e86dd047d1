//! Run module - turning user choices into an optimizer request.

mod parameters;
mod validation;

pub use parameters::RunParameters;
pub use validation::{
    validate_run, validate_weights, RunValidationError, WEIGHT_MAX, WEIGHT_MIN,
};
