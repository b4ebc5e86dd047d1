//! Basic budget: one ceiling picked from a fixed ladder of presets.

use serde::Serialize;

use super::{BudgetSchedule, BudgetTriple};

/// A labelled preset on the basic budget ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetLevel {
    pub label: &'static str,
    pub value: u64,
}

/// Preset ceilings, in ascending order.
pub const BUDGET_LEVELS: [BudgetLevel; 9] = [
    BudgetLevel { label: "$0", value: 0 },
    BudgetLevel { label: "$500K", value: 500_000 },
    BudgetLevel { label: "$1M", value: 1_000_000 },
    BudgetLevel { label: "$2.5M", value: 2_500_000 },
    BudgetLevel { label: "$5M", value: 5_000_000 },
    BudgetLevel { label: "$10M", value: 10_000_000 },
    BudgetLevel { label: "$25M", value: 25_000_000 },
    BudgetLevel { label: "$50M", value: 50_000_000 },
    BudgetLevel { label: "$100M", value: 100_000_000 },
];

/// Presets that stay selectable no matter how small the region cost is.
pub const MIN_LEVELS: usize = 3;

/// Number of budget levels a basic schedule always evaluates.
pub const BASIC_BUDGET_COUNT: u32 = 10;

/// Slider over a prefix of [`BUDGET_LEVELS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicBudget {
    selectable: usize,
    selected: usize,
}

impl Default for BasicBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicBudget {
    pub fn new() -> Self {
        Self {
            selectable: MIN_LEVELS,
            selected: 0,
        }
    }

    /// Presets the user may currently choose from.
    pub fn selectable(&self) -> &'static [BudgetLevel] {
        &BUDGET_LEVELS[..self.selectable]
    }

    /// The currently selected preset.
    pub fn selected(&self) -> BudgetLevel {
        BUDGET_LEVELS[self.selected]
    }

    /// Selects a preset by its label. Returns false if the label is not
    /// among the selectable presets.
    pub fn select(&mut self, label: &str) -> bool {
        match self.selectable().iter().position(|l| l.label == label) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    /// Selects the highest selectable preset.
    pub fn select_highest(&mut self) {
        self.selected = self.selectable - 1;
    }
}

impl BudgetSchedule for BasicBudget {
    fn values(&self) -> BudgetTriple {
        let ceiling = self.selected().value;
        BudgetTriple::new(0, ceiling / u64::from(BASIC_BUDGET_COUNT), BASIC_BUDGET_COUNT)
    }

    fn is_defined(&self) -> bool {
        self.selected().value != 0
    }

    fn set_upper_bound(&mut self, n: u64) {
        let index = BUDGET_LEVELS
            .iter()
            .rposition(|level| n >= level.value)
            .unwrap_or(0);
        self.selectable = (index + 1).max(MIN_LEVELS);
        if self.selected >= self.selectable {
            self.selected = self.selectable - 1;
        }
    }

    fn set_initial_value(&mut self, n: u64) {
        self.selected = self
            .selectable()
            .iter()
            .rposition(|level| level.value <= n)
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::format_dollars;

    fn labels(budget: &BasicBudget) -> Vec<&'static str> {
        budget.selectable().iter().map(|l| l.label).collect()
    }

    #[test]
    fn preset_labels_match_dollar_format() {
        for level in BUDGET_LEVELS.iter() {
            assert_eq!(format_dollars(level.value), level.label);
        }
    }

    #[test]
    fn new_budget_offers_minimum_levels_and_is_undefined() {
        let budget = BasicBudget::new();
        assert_eq!(budget.selectable().len(), MIN_LEVELS);
        assert!(!budget.is_defined());
        assert_eq!(budget.values(), BudgetTriple::new(0, 0, 10));
    }

    #[test]
    fn zero_bound_keeps_minimum_levels() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(0);
        assert_eq!(budget.selectable().len(), MIN_LEVELS);
        assert_eq!(labels(&budget), vec!["$0", "$500K", "$1M"]);
    }

    #[test]
    fn coquille_scale_bound_reaches_ten_million() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(11_800_000);
        let labels = labels(&budget);
        assert!(labels.contains(&"$10M"));
        assert!(!labels.contains(&"$25M"));
    }

    #[test]
    fn bound_equal_to_preset_includes_it() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(2_500_000);
        assert_eq!(budget.selectable().last().unwrap().label, "$2.5M");
    }

    #[test]
    fn large_bound_offers_every_preset() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(500_000_000);
        assert_eq!(budget.selectable().len(), BUDGET_LEVELS.len());
    }

    #[test]
    fn values_divide_ceiling_into_ten_levels() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(5_000_000);
        assert!(budget.select("$2.5M"));
        assert!(budget.is_defined());
        assert_eq!(budget.values(), BudgetTriple::new(0, 250_000, 10));
    }

    #[test]
    fn select_rejects_presets_beyond_bound() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(1_200_000);
        assert!(!budget.select("$5M"));
        assert_eq!(budget.selected().label, "$0");
    }

    #[test]
    fn shrinking_bound_pulls_selection_down() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(60_000_000);
        assert!(budget.select("$50M"));
        budget.set_upper_bound(3_000_000);
        assert_eq!(budget.selected().label, "$2.5M");
    }

    #[test]
    fn initial_value_picks_largest_preset_not_above_it() {
        let mut budget = BasicBudget::new();
        budget.set_upper_bound(30_000_000);
        budget.set_initial_value(7_000_000);
        assert_eq!(budget.selected().label, "$5M");

        budget.set_initial_value(0);
        assert_eq!(budget.selected().label, "$0");
    }
}
