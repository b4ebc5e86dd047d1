//! Results module - turning raw optimizer output into tables and curves.
//!
//! # Components
//!
//! - `OptimizerRawResult` - the summary and matrix tables as returned
//! - `build_budget_summary` - benefits per budget level
//! - `build_barrier_detail` - chosen barriers joined with catalog data
//! - `build_chart_series` - ROI curves, combined curve first
//! - `OptimizationOutput` - all of the above for one run
//!
//! Everything here is recomputed from scratch for each result.

mod chart;
mod detail;
mod output;
mod raw;
mod summary;

pub use chart::{build_chart_series, ChartSeries, NET_SERIES_LABEL};
pub use detail::{build_barrier_detail, BarrierDetailRow, BarrierDetailTable, Cell, MISSING};
pub use output::OptimizationOutput;
pub use raw::{MatrixRow, OptimizerRawResult, SummaryRow};
pub use summary::{
    build_budget_summary, BudgetSummaryRow, BudgetSummaryTable, BARRIER_COUNT_COLUMN,
    BUDGET_COLUMN, NET_GAIN_COLUMN,
};
