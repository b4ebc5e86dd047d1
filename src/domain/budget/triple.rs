//! Canonical budget schedule passed to the optimizer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::format_dollars;

/// Normalized `(start, increment, count)` description of a budget schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTriple {
    pub start: u64,
    pub increment: u64,
    pub count: u32,
}

impl BudgetTriple {
    pub fn new(start: u64, increment: u64, count: u32) -> Self {
        Self {
            start,
            increment,
            count,
        }
    }

    /// Highest amount the schedule reaches (`increment × count`).
    pub fn maximum(&self) -> u64 {
        self.increment.saturating_mul(u64::from(self.count))
    }

    /// True when the schedule evaluates more than one budget level.
    pub fn is_range(&self) -> bool {
        self.count > 1
    }

    /// Budget levels `start + k·increment` for `k` in `0..count`.
    pub fn levels(&self) -> impl Iterator<Item = u64> + '_ {
        (0..u64::from(self.count)).map(move |k| self.start + k * self.increment)
    }

    /// Short human description, e.g. "$100K to $1M" or "$250K".
    pub fn range_label(&self) -> String {
        if self.is_range() {
            format!(
                "{} to {}",
                format_dollars(self.increment),
                format_dollars(self.maximum())
            )
        } else {
            format_dollars(self.start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_is_increment_times_count() {
        assert_eq!(BudgetTriple::new(0, 100_000, 10).maximum(), 1_000_000);
    }

    #[test]
    fn levels_step_from_start() {
        let levels: Vec<u64> = BudgetTriple::new(0, 250_000, 4).levels().collect();
        assert_eq!(levels, vec![0, 250_000, 500_000, 750_000]);
    }

    #[test]
    fn fixed_schedule_has_single_level() {
        let triple = BudgetTriple::new(300_000, 0, 1);
        assert!(!triple.is_range());
        assert_eq!(triple.levels().collect::<Vec<_>>(), vec![300_000]);
        assert_eq!(triple.range_label(), "$300K");
    }

    #[test]
    fn range_label_spans_increment_to_maximum() {
        assert_eq!(BudgetTriple::new(0, 250_000, 10).range_label(), "$250K to $2.5M");
    }
}
