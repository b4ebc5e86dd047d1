//! Return-on-investment curves.

use serde::Serialize;

use super::OptimizerRawResult;
use crate::domain::run::RunParameters;
use crate::domain::target::TargetCatalog;

pub const NET_SERIES_LABEL: &str = "Net";
const NET_AXIS_LABEL: &str = "Net Gain";

/// Benefit as a function of budget for one curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub axis_label: String,
    pub budgets: Vec<u64>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_net(&self) -> bool {
        self.label == NET_SERIES_LABEL
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

/// One curve per target in selection order. Multi-target runs with a
/// `netgain` column get a combined `Net` curve in front. A target the
/// optimizer reported no scores for gets no curve.
///
/// Weights only change labels; the optimizer has already applied them to
/// the values.
pub fn build_chart_series(
    raw: &OptimizerRawResult,
    params: &RunParameters,
    catalog: &TargetCatalog,
) -> Vec<ChartSeries> {
    let labels = params.target_labels(catalog);
    let mut series = Vec::with_capacity(params.targets.len() + 1);

    if params.targets.len() > 1 {
        let (budgets, values): (Vec<u64>, Vec<f64>) = raw
            .summary
            .iter()
            .filter_map(|row| row.netgain.map(|n| (row.budget, n)))
            .unzip();
        if !budgets.is_empty() {
            series.push(ChartSeries {
                label: NET_SERIES_LABEL.to_string(),
                axis_label: NET_AXIS_LABEL.to_string(),
                budgets,
                values,
            });
        }
    }

    for (id, label) in params.targets.iter().zip(labels) {
        let (budgets, values): (Vec<u64>, Vec<f64>) = raw
            .summary
            .iter()
            .filter_map(|row| row.score(id).map(|v| (row.budget, v)))
            .unzip();
        // matches the summary, which drops targets absent from every row
        if budgets.is_empty() {
            continue;
        }
        let axis_label = catalog
            .get(id)
            .map(|t| t.axis_label.clone())
            .unwrap_or_else(|| label.clone());
        series.push(ChartSeries {
            label,
            axis_label,
            budgets,
            values,
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::BudgetTriple;
    use crate::domain::foundation::TargetId;
    use crate::domain::results::raw::tests::two_target_result;
    use crate::domain::target::{LAYOUT, TARGETS_CSV};
    use serde_json::json;

    fn catalog() -> TargetCatalog {
        TargetCatalog::from_csv(TARGETS_CSV, LAYOUT).unwrap()
    }

    fn params(targets: &[&str], weights: Option<Vec<u8>>) -> RunParameters {
        RunParameters {
            regions: vec!["Coos".to_string()],
            budget: BudgetTriple::new(0, 500_000, 3),
            targets: targets.iter().map(|t| TargetId::from(*t)).collect(),
            weights,
            mapping: None,
        }
    }

    fn labels(series: &[ChartSeries]) -> Vec<&str> {
        series.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn two_targets_get_net_curve_first() {
        let series = build_chart_series(&two_target_result(), &params(&["CO", "FI"], None), &catalog());
        assert_eq!(series.len(), 3);
        assert_eq!(labels(&series), vec!["Net", "Coho", "Fish"]);
        assert!(series[0].is_net());
        assert_eq!(series[0].values, vec![0.0, 1.5, 3.25]);
    }

    #[test]
    fn single_target_has_no_net_curve() {
        let series = build_chart_series(&two_target_result(), &params(&["FI"], None), &catalog());
        assert_eq!(labels(&series), vec!["Fish"]);
        assert_eq!(series[0].budgets, vec![0, 500_000, 1_000_000]);
        assert_eq!(series[0].values, vec![0.0, 2.0, 4.0]);
        assert_eq!(series[0].axis_label, "Fish habitat (miles)");
    }

    #[test]
    fn weights_change_labels_not_values() {
        let plain = build_chart_series(&two_target_result(), &params(&["CO", "FI"], None), &catalog());
        let weighted = build_chart_series(
            &two_target_result(),
            &params(&["CO", "FI"], Some(vec![3, 1])),
            &catalog(),
        );
        assert_eq!(labels(&weighted), vec!["Net", "Coho ⨉ 3", "Fish ⨉ 1"]);
        for (a, b) in plain.iter().zip(&weighted) {
            assert_eq!(a.values, b.values);
            assert_eq!(a.budgets, b.budgets);
        }
    }

    #[test]
    fn rows_without_netgain_are_skipped() {
        let raw: OptimizerRawResult = serde_json::from_value(json!({
            "summary": [
                {"budget": 0, "CO": 0.0, "FI": 0.0, "gates": []},
                {"budget": 100, "netgain": 2.0, "CO": 1.0, "FI": 1.0, "gates": ["B1"]}
            ],
            "matrix": []
        }))
        .unwrap();
        let series = build_chart_series(&raw, &params(&["CO", "FI"], None), &catalog());
        assert_eq!(series[0].budgets, vec![100]);
    }

    #[test]
    fn no_netgain_at_all_means_no_net_curve() {
        let raw: OptimizerRawResult = serde_json::from_value(json!({
            "summary": [{"budget": 0, "CO": 0.0, "FI": 0.0, "gates": []}],
            "matrix": []
        }))
        .unwrap();
        let series = build_chart_series(&raw, &params(&["CO", "FI"], None), &catalog());
        assert_eq!(labels(&series), vec!["Coho", "Fish"]);
    }

    #[test]
    fn target_without_scores_gets_no_curve() {
        let raw: OptimizerRawResult = serde_json::from_value(json!({
            "summary": [
                {"budget": 0, "netgain": 0.0, "CO": 0.0, "gates": []},
                {"budget": 100, "netgain": 1.0, "CO": 1.0, "gates": ["B1"]}
            ],
            "matrix": []
        }))
        .unwrap();
        let series = build_chart_series(&raw, &params(&["CO", "FI"], None), &catalog());
        assert_eq!(labels(&series), vec!["Net", "Coho"]);
        assert!(series.iter().all(|s| !s.is_empty()));
    }
}
