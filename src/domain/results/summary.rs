//! Budget summary table: one row per budget level.

use serde::Serialize;

use super::OptimizerRawResult;
use crate::domain::foundation::BarrierId;
use crate::domain::run::RunParameters;
use crate::domain::target::TargetCatalog;

pub const BUDGET_COLUMN: &str = "Budget";
pub const NET_GAIN_COLUMN: &str = "Net Gain";
pub const BARRIER_COUNT_COLUMN: &str = "# Barriers";

/// Benefits at each budget level.
///
/// Column order is fixed: budget, net gain (multi-target runs only),
/// barrier count, then one column per target in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummaryTable {
    pub columns: Vec<String>,
    pub rows: Vec<BudgetSummaryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummaryRow {
    pub budget: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_gain: Option<f64>,
    pub barrier_count: usize,
    /// One entry per target column.
    pub values: Vec<Option<f64>>,
    /// Barriers in this level's solution, for highlighting on the map.
    pub gates: Vec<BarrierId>,
}

impl BudgetSummaryTable {
    pub fn has_net_gain(&self) -> bool {
        self.columns.iter().any(|c| c == NET_GAIN_COLUMN)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Builds the summary table for a run.
///
/// Targets whose column appears in no summary row are left out.
pub fn build_budget_summary(
    raw: &OptimizerRawResult,
    params: &RunParameters,
    catalog: &TargetCatalog,
) -> BudgetSummaryTable {
    let with_net_gain = params.targets.len() > 1;
    let labels = params.target_labels(catalog);

    let present: Vec<usize> = params
        .targets
        .iter()
        .enumerate()
        .filter(|(_, id)| raw.summary.iter().any(|row| row.score(id).is_some()))
        .map(|(i, _)| i)
        .collect();

    let mut columns = vec![BUDGET_COLUMN.to_string()];
    if with_net_gain {
        columns.push(NET_GAIN_COLUMN.to_string());
    }
    columns.push(BARRIER_COUNT_COLUMN.to_string());
    columns.extend(present.iter().map(|&i| labels[i].clone()));

    let rows = raw
        .summary
        .iter()
        .map(|row| BudgetSummaryRow {
            budget: row.budget,
            net_gain: if with_net_gain { row.netgain } else { None },
            barrier_count: row.gates.len(),
            values: present
                .iter()
                .map(|&i| row.score(&params.targets[i]))
                .collect(),
            gates: row.gates.clone(),
        })
        .collect();

    BudgetSummaryTable { columns, rows }
}
