//! Result payload returned by the optimizer.
//!
//! Both tables arrive row-oriented with dynamic columns. Rows are parsed
//! into typed records up front so the builders never deal with JSON.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::{BarrierId, TargetId};

/// Everything one successful optimizer call produced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptimizerRawResult {
    pub summary: Vec<SummaryRow>,
    pub matrix: Vec<MatrixRow>,
}

impl OptimizerRawResult {
    /// Number of barriers chosen, summed over all budget levels.
    pub fn total_gate_count(&self) -> usize {
        self.summary.iter().map(|row| row.gates.len()).sum()
    }
}

/// Outcome at one budget level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSummaryRow")]
pub struct SummaryRow {
    pub budget: u64,
    pub netgain: Option<f64>,
    pub gates: Vec<BarrierId>,
    /// Benefit per target, keyed by target id.
    pub scores: BTreeMap<String, f64>,
}

impl SummaryRow {
    pub fn score(&self, target: &TargetId) -> Option<f64> {
        self.scores.get(target.as_str()).copied()
    }
}

#[derive(Deserialize)]
struct RawSummaryRow {
    budget: f64,
    #[serde(default)]
    netgain: Option<f64>,
    #[serde(default)]
    gates: Vec<BarrierId>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl TryFrom<RawSummaryRow> for SummaryRow {
    type Error = String;

    fn try_from(raw: RawSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            budget: whole_dollars(raw.budget)?,
            netgain: raw.netgain,
            gates: raw.gates,
            scores: numeric_columns(raw.rest),
        })
    }
}

/// One barrier's involvement across all budget levels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMatrixRow")]
pub struct MatrixRow {
    pub id: BarrierId,
    /// Number of budget levels whose solution includes this barrier.
    pub count: u32,
    /// Inclusion flag per budget level, keyed by budget amount.
    pub included: BTreeMap<u64, bool>,
    /// Contribution per target, keyed by target id.
    pub scores: BTreeMap<String, f64>,
}

impl MatrixRow {
    pub fn score(&self, target: &TargetId) -> Option<f64> {
        self.scores.get(target.as_str()).copied()
    }
}

#[derive(Deserialize)]
struct RawMatrixRow {
    #[serde(rename = "ID")]
    id: BarrierId,
    count: f64,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl TryFrom<RawMatrixRow> for MatrixRow {
    type Error = String;

    fn try_from(raw: RawMatrixRow) -> Result<Self, Self::Error> {
        if !raw.count.is_finite() || raw.count < 0.0 {
            return Err(format!("invalid count for barrier {}: {}", raw.id, raw.count));
        }

        let (budget_columns, other): (BTreeMap<_, _>, BTreeMap<_, _>) = raw
            .rest
            .into_iter()
            .partition(|(key, _)| is_budget_column(key));

        let mut included = BTreeMap::new();
        for (key, value) in budget_columns {
            let budget = key
                .parse::<u64>()
                .map_err(|e| format!("budget column {}: {}", key, e))?;
            included.insert(budget, truthy(&value));
        }

        Ok(Self {
            id: raw.id,
            count: raw.count as u32,
            included,
            scores: numeric_columns(other),
        })
    }
}

/// Budget-level columns are named by the budget amount in digits.
fn is_budget_column(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    }
}

fn numeric_columns(columns: BTreeMap<String, Value>) -> BTreeMap<String, f64> {
    columns
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|n| (key, n)))
        .collect()
}

fn whole_dollars(amount: f64) -> Result<u64, String> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount.round() as u64)
    } else {
        Err(format!("invalid budget amount: {}", amount))
    }
}
