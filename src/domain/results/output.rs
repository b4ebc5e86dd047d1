//! Everything the dashboard shows after a successful run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    build_barrier_detail, build_budget_summary, build_chart_series, BarrierDetailTable,
    BudgetSummaryTable, ChartSeries, OptimizerRawResult,
};
use crate::domain::foundation::{format_dollars, RunId};
use crate::domain::region::BarrierCatalog;
use crate::domain::run::RunParameters;
use crate::domain::target::{ColumnMapping, TargetCatalog};

const EMPTY_HINT: &str = "No barriers selected -- consider increasing the budget";

/// Tables and curves derived from one optimizer result.
///
/// Built in one pass and never updated; a new run replaces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutput {
    pub run_id: RunId,
    pub title: String,
    pub parameters: RunParameters,
    pub budget_summary: BudgetSummaryTable,
    pub barrier_detail: BarrierDetailTable,
    /// Empty for single-budget runs, which have nothing to plot.
    pub chart_series: Vec<ChartSeries>,
    pub completed_at: DateTime<Utc>,
}

impl OptimizationOutput {
    pub fn assemble(
        run_id: RunId,
        parameters: RunParameters,
        raw: &OptimizerRawResult,
        barriers: &BarrierCatalog,
        targets: &TargetCatalog,
        mapping: &ColumnMapping,
    ) -> Self {
        let chart_series = if parameters.budget.is_range() {
            build_chart_series(raw, &parameters, targets)
        } else {
            Vec::new()
        };
        Self {
            run_id,
            title: make_title(&parameters, targets, mapping),
            budget_summary: build_budget_summary(raw, &parameters, targets),
            barrier_detail: build_barrier_detail(raw, barriers, &parameters, targets),
            chart_series,
            parameters,
            completed_at: Utc::now(),
        }
    }

    /// Barriers chosen, summed over every budget level.
    pub fn total_barrier_selections(&self) -> usize {
        self.budget_summary.rows.iter().map(|r| r.barrier_count).sum()
    }

    /// Message to show instead of the tables when nothing was chosen.
    pub fn empty_hint(&self) -> Option<&'static str> {
        (self.total_barrier_selections() == 0).then_some(EMPTY_HINT)
    }
}

fn make_title(params: &RunParameters, targets: &TargetCatalog, mapping: &ColumnMapping) -> String {
    let mut parts = vec![
        format!("Regions: {}", params.regions.join(", ")),
        format!("Targets: {}", params.target_labels(targets).join(", ")),
    ];
    if let (Some(heading), Some(choice)) = (mapping.heading(), &params.mapping) {
        parts.push(format!("{}: {}", heading, choice));
    }
    let budget = &params.budget;
    if budget.is_range() {
        parts.push(format!(
            "Budgets: {} to {}",
            format_dollars(budget.increment),
            format_dollars(budget.maximum())
        ));
    } else {
        parts.push(format!("Budget: {}", format_dollars(budget.start)));
    }
    parts.join("; ")
}
