//! Fixed budget: a single amount typed by the user.

use serde::Serialize;

use super::{BudgetSchedule, BudgetTriple};
use crate::domain::foundation::DollarAmount;

/// Text box holding one dollar amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixedBudget {
    text: String,
}

impl Default for FixedBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedBudget {
    pub fn new() -> Self {
        Self {
            text: "$".to_string(),
        }
    }

    /// Replaces the text entered by the user.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed amount; malformed text reads as zero.
    pub fn amount(&self) -> DollarAmount {
        DollarAmount::parse(&self.text)
    }
}

impl BudgetSchedule for FixedBudget {
    fn values(&self) -> BudgetTriple {
        BudgetTriple::new(self.amount().value(), 0, 1)
    }

    fn is_defined(&self) -> bool {
        !self.amount().is_zero()
    }

    // A fixed amount is not bounded by region cost.
    fn set_upper_bound(&mut self, _n: u64) {}

    fn set_initial_value(&mut self, n: u64) {
        self.text = format!("${}", n);
    }
}
