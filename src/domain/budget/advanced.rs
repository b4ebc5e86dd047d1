//! Advanced budget: maximum, increment, and level count kept mutually consistent.
//!
//! Each edit re-derives exactly one other field:
//!
//! | edited      | derived                                        |
//! |-------------|------------------------------------------------|
//! | `maximum`   | `increment = maximum / count`                  |
//! | `increment` | `count = clamp(maximum / increment, 2, 100)`   |
//! | `count`     | `increment = maximum / count`                  |
//!
//! There is no second hop, so an edit never ripples back into the field the
//! user just changed.

use serde::{Deserialize, Serialize};

use super::{BudgetSchedule, BudgetTriple};

/// Slider granularity for the maximum budget.
pub const MAX_STEP: u64 = 10_000;

/// Slider granularity for the budget increment.
pub const INC_STEP: u64 = 1_000;

/// Fewest budget levels an advanced schedule may request.
pub const COUNT_MIN: u32 = 2;

/// Most budget levels an advanced schedule may request.
pub const COUNT_MAX: u32 = 100;

/// Level count before the user touches it.
pub const DEFAULT_COUNT: u32 = 10;

/// The three user-editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetField {
    Maximum,
    Increment,
    Count,
}

/// Current values of the three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedValues {
    pub maximum: u64,
    pub increment: u64,
    pub count: u32,
}

impl Default for AdvancedValues {
    fn default() -> Self {
        Self {
            maximum: 0,
            increment: 0,
            count: DEFAULT_COUNT,
        }
    }
}

/// Inclusive range a slider accepts.
///
/// When `min > max` (tiny region totals) the range collapses onto `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u64,
    pub max: u64,
}

impl ValueRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: u64) -> u64 {
        value.max(self.min).min(self.max)
    }
}

/// Allowed ranges for the maximum and increment sliders.
///
/// Both are open until the first region total arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedBounds {
    pub maximum: Option<ValueRange>,
    pub increment: Option<ValueRange>,
}

impl AdvancedBounds {
    /// Ranges for a selection whose barriers cost `total` in all.
    pub fn for_total_cost(total: u64) -> Self {
        Self {
            maximum: Some(ValueRange::new(MAX_STEP, total.max(1))),
            increment: Some(ValueRange::new(
                INC_STEP.max(total / u64::from(COUNT_MAX)),
                (total / 2).max(1),
            )),
        }
    }
}

/// Applies one edit: clamps the edited field into its range and re-derives
/// the dependent field. Division by a zero count or increment leaves the
/// dependent field untouched.
pub fn derive_fields(
    edited: BudgetField,
    values: AdvancedValues,
    bounds: &AdvancedBounds,
) -> AdvancedValues {
    let mut next = values;
    match edited {
        BudgetField::Maximum => {
            if let Some(range) = bounds.maximum {
                next.maximum = range.clamp(next.maximum);
            }
            if next.count > 0 {
                next.increment = next.maximum / u64::from(next.count);
            }
        }
        BudgetField::Increment => {
            if let Some(range) = bounds.increment {
                next.increment = range.clamp(next.increment);
            }
            if next.increment > 0 {
                let count = (next.maximum / next.increment)
                    .clamp(u64::from(COUNT_MIN), u64::from(COUNT_MAX));
                next.count = count as u32;
            }
        }
        BudgetField::Count => {
            next.count = next.count.clamp(COUNT_MIN, COUNT_MAX);
            if next.count > 0 {
                next.increment = next.maximum / u64::from(next.count);
            }
        }
    }
    next
}

/// Advanced budget editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdvancedBudget {
    values: AdvancedValues,
    bounds: AdvancedBounds,
    upper_bound: Option<u64>,
}

impl AdvancedBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> AdvancedValues {
        self.values
    }

    pub fn bounds(&self) -> &AdvancedBounds {
        &self.bounds
    }

    pub fn set_maximum(&mut self, maximum: u64) {
        self.edit(BudgetField::Maximum, AdvancedValues { maximum, ..self.values });
    }

    pub fn set_increment(&mut self, increment: u64) {
        self.edit(BudgetField::Increment, AdvancedValues { increment, ..self.values });
    }

    pub fn set_count(&mut self, count: u32) {
        self.edit(BudgetField::Count, AdvancedValues { count, ..self.values });
    }

    fn edit(&mut self, field: BudgetField, proposed: AdvancedValues) {
        self.values = derive_fields(field, proposed, &self.bounds);
    }

    /// Text shown next to the sliders: the region total in millions.
    pub fn limit_label(&self) -> String {
        match self.upper_bound {
            Some(n) if n > 0 => format!("${:.2}M", n as f64 / 1_000_000.0),
            _ => "N/A".to_string(),
        }
    }
}

impl BudgetSchedule for AdvancedBudget {
    fn values(&self) -> BudgetTriple {
        BudgetTriple::new(0, self.values.increment, self.values.count)
    }

    fn is_defined(&self) -> bool {
        self.values.increment > 0
    }

    fn set_upper_bound(&mut self, n: u64) {
        self.bounds = AdvancedBounds::for_total_cost(n);
        self.upper_bound = Some(n);
    }

    fn set_initial_value(&mut self, n: u64) {
        self.set_maximum(n);
    }
}
