//! Checks performed before an optimizer run is requested.

use thiserror::Error;

use super::RunParameters;
use crate::domain::budget::BudgetSchedule;
use crate::domain::target::TargetSelection;

/// Smallest and largest weight a target may carry.
pub const WEIGHT_MIN: u8 = 1;
pub const WEIGHT_MAX: u8 = 5;

/// Reasons a run cannot be started. These are returned to the caller so it
/// can prompt the user; they never abort anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunValidationError {
    #[error("missing selections: {}", missing_text(.regions, .budget, .targets))]
    MissingSelections {
        regions: bool,
        budget: bool,
        targets: bool,
    },

    #[error("target weights must be numbers between 1 and 5 (not {values:?})")]
    InvalidWeights { values: Vec<String> },
}

impl RunValidationError {
    /// What the user still has to choose, phrased for a prompt.
    pub fn missing_items(&self) -> Vec<&'static str> {
        match self {
            RunValidationError::MissingSelections {
                regions,
                budget,
                targets,
            } => missing_list(*regions, *budget, *targets),
            RunValidationError::InvalidWeights { .. } => Vec::new(),
        }
    }
}

fn missing_text(regions: &bool, budget: &bool, targets: &bool) -> String {
    missing_list(*regions, *budget, *targets).join(", ")
}

fn missing_list(regions: bool, budget: bool, targets: bool) -> Vec<&'static str> {
    let mut items = Vec::new();
    if regions {
        items.push("one or more geographic regions");
    }
    if budget {
        items.push("a maximum budget");
    }
    if targets {
        items.push("one or more targets");
    }
    items
}

/// Validates the user's choices and freezes them into run parameters.
///
/// Missing selections are reported together. Weights are checked only once
/// everything required is present, and are accepted or rejected as a whole.
pub fn validate_run(
    regions: &[String],
    budget: &dyn BudgetSchedule,
    targets: &TargetSelection,
    mapping: Option<String>,
) -> Result<RunParameters, RunValidationError> {
    let missing_regions = regions.is_empty();
    let missing_budget = !budget.is_defined();
    let missing_targets = targets.is_empty();
    if missing_regions || missing_budget || missing_targets {
        return Err(RunValidationError::MissingSelections {
            regions: missing_regions,
            budget: missing_budget,
            targets: missing_targets,
        });
    }

    let ids = targets.ids();
    let weights = match targets.weights() {
        Some(values) => Some(validate_weights(&values, ids.len())?),
        None => None,
    };

    Ok(RunParameters {
        regions: regions.to_vec(),
        budget: budget.values(),
        targets: ids,
        weights,
        mapping,
    })
}

/// Parses weight strings. Every entry must be plain digits in
/// `WEIGHT_MIN..=WEIGHT_MAX` and there must be one per target.
pub fn validate_weights(
    values: &[String],
    target_count: usize,
) -> Result<Vec<u8>, RunValidationError> {
    let invalid = || RunValidationError::InvalidWeights {
        values: values.to_vec(),
    };
    if values.len() != target_count {
        return Err(invalid());
    }
    values
        .iter()
        .map(|w| {
            if w.is_empty() || !w.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            w.parse::<u8>()
                .ok()
                .filter(|n| (WEIGHT_MIN..=WEIGHT_MAX).contains(n))
        })
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)
}
