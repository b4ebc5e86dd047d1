//! Region cost aggregation.
//!
//! Totals are computed once from the catalog; the caller owns the set of
//! selected regions and asks for the total of whatever subset it holds.

use std::collections::BTreeMap;

use serde::Serialize;

use super::BarrierCatalog;

/// Total barrier cost per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionCostTable {
    totals: BTreeMap<String, f64>,
}

impl RegionCostTable {
    /// Groups the catalog by region and sums each group's cost.
    pub fn from_catalog(catalog: &BarrierCatalog) -> Self {
        let mut totals = BTreeMap::new();
        for barrier in catalog.barriers() {
            *totals.entry(barrier.region.clone()).or_insert(0.0) += barrier.cost;
        }
        Self { totals }
    }

    /// All region names, sorted.
    pub fn region_names(&self) -> Vec<String> {
        self.totals.keys().cloned().collect()
    }

    pub fn contains(&self, region: &str) -> bool {
        self.totals.contains_key(region)
    }

    pub fn cost_of(&self, region: &str) -> Option<f64> {
        self.totals.get(region).copied()
    }

    /// Sum of the totals of the selected regions. Unknown names add nothing.
    pub fn total_cost<I, S>(&self, selected: I) -> f64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        selected
            .into_iter()
            .filter_map(|r| self.cost_of(r.as_ref()))
            .sum()
    }

    /// The selected total in whole dollars, as budget variants expect it.
    pub fn upper_bound<I, S>(&self, selected: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let total = self.total_cost(selected);
        if total.is_finite() && total > 0.0 {
            total.round() as u64
        } else {
            0
        }
    }
}
