//! Barrier detail table: every barrier chosen at some budget level.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};

use super::{MatrixRow, OptimizerRawResult};
use crate::domain::foundation::{format_dollars, BarrierId};
use crate::domain::region::{Barrier, BarrierAttribute, BarrierCatalog};
use crate::domain::run::RunParameters;
use crate::domain::target::TargetCatalog;

/// Shown wherever a joined value is absent.
pub const MISSING: &str = "-";

/// One value in the detail table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Flag(bool),
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Flag(b) => write!(f, "{}", b),
            Cell::Missing => f.write_str(MISSING),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Flag(b) => serializer.serialize_bool(*b),
            Cell::Missing => serializer.serialize_str(MISSING),
        }
    }
}

/// Per-barrier detail for the selected regions.
///
/// Columns: the static attributes the barrier file provides, one inclusion
/// column per budget level (labelled as a dollar amount, ascending), then
/// one score column per target in selection order.
///
/// Dollar labels are rounded, so two levels can share a heading;
/// `column_budgets` carries the exact amount behind each inclusion column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrierDetailTable {
    pub columns: Vec<String>,
    /// Parallel to `columns`: the budget level of an inclusion column,
    /// `None` for every other column.
    pub column_budgets: Vec<Option<u64>>,
    pub rows: Vec<BarrierDetailRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrierDetailRow {
    pub id: BarrierId,
    pub count: u32,
    pub cells: Vec<Cell>,
}

impl BarrierDetailTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by its heading.
    pub fn column(&self, heading: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == heading)
    }

    /// Index of the inclusion column for an exact budget level.
    pub fn inclusion_column(&self, budget: u64) -> Option<usize> {
        self.column_budgets.iter().position(|b| *b == Some(budget))
    }
}

/// Joins the barrier catalog with the optimizer's per-barrier matrix.
///
/// Only barriers in the run's regions that were chosen at least once are
/// kept. Rows are ordered by count, highest first; ties keep catalog order.
pub fn build_barrier_detail(
    raw: &OptimizerRawResult,
    barriers: &BarrierCatalog,
    params: &RunParameters,
    targets: &TargetCatalog,
) -> BarrierDetailTable {
    let attributes = barriers.attributes();

    let budgets: BTreeSet<u64> = raw
        .matrix
        .iter()
        .flat_map(|row| row.included.keys().copied())
        .collect();

    let target_labels = params.target_labels(targets);

    let mut columns: Vec<String> = attributes.iter().map(|a| a.label().to_string()).collect();
    columns.extend(budgets.iter().map(|&b| format_dollars(b)));
    columns.extend(target_labels.iter().cloned());

    let mut column_budgets: Vec<Option<u64>> = vec![None; attributes.len()];
    column_budgets.extend(budgets.iter().map(|&b| Some(b)));
    column_budgets.resize(columns.len(), None);

    let matrix: HashMap<&BarrierId, &MatrixRow> =
        raw.matrix.iter().map(|row| (&row.id, row)).collect();

    let mut rows: Vec<BarrierDetailRow> = barriers
        .in_regions(&params.regions)
        .filter_map(|barrier| {
            let row = matrix.get(&barrier.id)?;
            if row.count == 0 {
                return None;
            }
            let mut cells: Vec<Cell> = attributes
                .iter()
                .map(|a| attribute_cell(barrier, *a))
                .collect();
            cells.extend(
                budgets
                    .iter()
                    .map(|b| row.included.get(b).map_or(Cell::Missing, |&v| Cell::Flag(v))),
            );
            cells.extend(
                params
                    .targets
                    .iter()
                    .map(|t| row.score(t).map_or(Cell::Missing, Cell::Number)),
            );
            Some(BarrierDetailRow {
                id: barrier.id.clone(),
                count: row.count,
                cells,
            })
        })
        .collect();

    // sort_by is stable
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    BarrierDetailTable {
        columns,
        column_budgets,
        rows,
    }
}

fn attribute_cell(barrier: &Barrier, attribute: BarrierAttribute) -> Cell {
    fn text(value: &Option<String>) -> Cell {
        value.clone().map_or(Cell::Missing, Cell::Text)
    }
    match attribute {
        BarrierAttribute::Region => Cell::Text(barrier.region.clone()),
        BarrierAttribute::Cost => Cell::Number(barrier.cost),
        BarrierAttribute::DownstreamId => text(&barrier.downstream_id),
        BarrierAttribute::Type => text(&barrier.kind),
        BarrierAttribute::Primary => barrier.primary.map_or(Cell::Missing, Cell::Flag),
        BarrierAttribute::Dominant => barrier.dominant.map_or(Cell::Missing, Cell::Flag),
        BarrierAttribute::X => barrier.x.map_or(Cell::Missing, Cell::Number),
        BarrierAttribute::Y => barrier.y.map_or(Cell::Missing, Cell::Number),
    }
}
