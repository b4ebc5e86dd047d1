//! Validated inputs of one optimizer run.

use serde::Serialize;

use crate::domain::budget::BudgetTriple;
use crate::domain::foundation::{format_dollars, TargetId};
use crate::domain::target::TargetCatalog;

/// Everything the optimizer is asked to solve for.
///
/// Only [`validate_run`](super::validate_run) builds these, so the region and
/// target lists are non-empty and weights, when present, line up with targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunParameters {
    pub regions: Vec<String>,
    pub budget: BudgetTriple,
    pub targets: Vec<TargetId>,
    pub weights: Option<Vec<u8>>,
    pub mapping: Option<String>,
}

impl RunParameters {
    /// Weight of the target at `index`, if weights were given.
    pub fn weight_at(&self, index: usize) -> Option<u8> {
        self.weights.as_ref().and_then(|w| w.get(index).copied())
    }

    /// Display label of each target in selection order: the short label,
    /// followed by `⨉ <weight>` in weighted runs. Unknown ids show as-is.
    pub fn target_labels(&self, catalog: &TargetCatalog) -> Vec<String> {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let short = catalog
                    .get(id)
                    .map(|t| t.short_label.as_str())
                    .unwrap_or(id.as_str());
                match self.weight_at(i) {
                    Some(w) => format!("{} ⨉ {}", short, w),
                    None => short.to_string(),
                }
            })
            .collect()
    }

    /// Lines summarizing the run for the user to confirm before it starts.
    pub fn review_lines(&self, catalog: &TargetCatalog) -> Vec<String> {
        let mut lines = vec![format!("Regions: {}", self.regions.join(", "))];
        if self.budget.is_range() {
            let step = format_dollars(self.budget.increment);
            lines.push(format!(
                "{} budget levels from {} up to {} in increments of {}",
                self.budget.count,
                step,
                format_dollars(self.budget.maximum()),
                step
            ));
        } else {
            lines.push(format!(
                "a single budget of {}",
                format_dollars(self.budget.start)
            ));
        }
        lines.push(format!("Targets: {}", self.target_labels(catalog).join(", ")));
        if let Some(mapping) = &self.mapping {
            lines.push(format!("Mapping: {}", mapping));
        }
        lines
    }
}
