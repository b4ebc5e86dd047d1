//! Planning session: one user's choices and their latest result.
//!
//! # Ownership
//!
//! The session owns region selection, both target selections, the budget
//! selector and the last output. Project data (catalogs, cost totals) is
//! shared read-only; the session keeps its own copy of the cost table.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::budget::{BudgetSchedule, BudgetSelector};
use crate::domain::foundation::{DomainError, ErrorCode, TargetId};
use crate::domain::region::RegionCostTable;
use crate::domain::results::OptimizationOutput;
use crate::domain::run::{validate_run, RunParameters, RunValidationError};
use crate::domain::target::{ColumnMapping, TargetSelection};

/// Which target selection is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    #[default]
    Basic,
    Weighted,
}

/// Start-up selections applied once when a session opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDefaults {
    pub regions: Vec<String>,
    pub budget: u64,
    pub targets: Vec<TargetId>,
}

/// Per-user planning state.
#[derive(Debug, Clone)]
pub struct PlanningSession {
    costs: RegionCostTable,
    selected_regions: BTreeSet<String>,
    budget: BudgetSelector,
    basic_targets: TargetSelection,
    weighted_targets: TargetSelection,
    target_mode: TargetMode,
    mapping: Option<String>,
    last_output: Option<OptimizationOutput>,
}

impl PlanningSession {
    /// Opens a session with nothing selected.
    pub fn new(costs: RegionCostTable) -> Self {
        let mut budget = BudgetSelector::new();
        budget.set_upper_bound(0);
        Self {
            costs,
            selected_regions: BTreeSet::new(),
            budget,
            basic_targets: TargetSelection::basic(),
            weighted_targets: TargetSelection::weighted(),
            target_mode: TargetMode::default(),
            mapping: None,
            last_output: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Regions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn region_names(&self) -> Vec<String> {
        self.costs.region_names()
    }

    /// Selected regions in name order.
    pub fn selected_regions(&self) -> Vec<String> {
        self.selected_regions.iter().cloned().collect()
    }

    /// Adds or removes a region and pushes the new total cost into every
    /// budget variant. Returns whether the region is now selected.
    ///
    /// # Errors
    ///
    /// `RegionNotFound` if the project has no such region.
    pub fn toggle_region(&mut self, region: &str) -> Result<bool, DomainError> {
        if !self.costs.contains(region) {
            return Err(DomainError::new(
                ErrorCode::RegionNotFound,
                format!("unknown region: {}", region),
            )
            .with_detail("region", region));
        }
        let selected = if self.selected_regions.remove(region) {
            false
        } else {
            self.selected_regions.insert(region.to_string());
            true
        };
        self.refresh_upper_bound();
        Ok(selected)
    }

    /// Total barrier cost of the selected regions.
    pub fn total_cost(&self) -> f64 {
        self.costs.total_cost(&self.selected_regions)
    }

    fn refresh_upper_bound(&mut self) {
        let bound = self.costs.upper_bound(&self.selected_regions);
        self.budget.set_upper_bound(bound);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Budget
    // ─────────────────────────────────────────────────────────────────────────

    pub fn budget(&self) -> &BudgetSelector {
        &self.budget
    }

    pub fn budget_mut(&mut self) -> &mut BudgetSelector {
        &mut self.budget
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Targets
    // ─────────────────────────────────────────────────────────────────────────

    pub fn target_mode(&self) -> TargetMode {
        self.target_mode
    }

    /// Switches between checkbox and weighted selection. Each keeps what
    /// was entered in it.
    pub fn set_target_mode(&mut self, mode: TargetMode) {
        self.target_mode = mode;
    }

    /// The selection currently in use.
    pub fn targets(&self) -> &TargetSelection {
        match self.target_mode {
            TargetMode::Basic => &self.basic_targets,
            TargetMode::Weighted => &self.weighted_targets,
        }
    }

    pub fn targets_mut(&mut self) -> &mut TargetSelection {
        match self.target_mode {
            TargetMode::Basic => &mut self.basic_targets,
            TargetMode::Weighted => &mut self.weighted_targets,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mapping
    // ─────────────────────────────────────────────────────────────────────────

    pub fn mapping(&self) -> Option<&str> {
        self.mapping.as_deref()
    }

    /// Chooses a column mapping, or clears the choice with `None`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` if the project does not offer the choice.
    pub fn set_mapping(
        &mut self,
        choice: Option<&str>,
        available: &ColumnMapping,
    ) -> Result<(), DomainError> {
        match choice {
            None => self.mapping = None,
            Some(c) if available.accepts(c) => self.mapping = Some(c.to_string()),
            Some(c) => {
                return Err(DomainError::new(
                    ErrorCode::InvalidFormat,
                    format!("unknown mapping: {}", c),
                )
                .with_detail("mapping", c))
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Runs
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks the current choices and freezes them for a run.
    pub fn run_parameters(&self) -> Result<RunParameters, RunValidationError> {
        validate_run(
            &self.selected_regions(),
            &self.budget,
            self.targets(),
            self.mapping.clone(),
        )
    }

    /// Replaces the previous output.
    pub fn record_output(&mut self, output: OptimizationOutput) {
        self.last_output = Some(output);
    }

    pub fn last_output(&self) -> Option<&OptimizationOutput> {
        self.last_output.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Defaults
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies start-up selections. Regions are selected first so the budget
    /// sees their total before its initial value is set. Returns the region
    /// names the project does not know, which are skipped.
    pub fn apply_defaults(&mut self, defaults: &SessionDefaults) -> Vec<String> {
        let mut unknown = Vec::new();
        for region in &defaults.regions {
            if !self.costs.contains(region) {
                unknown.push(region.clone());
            } else if !self.selected_regions.contains(region) {
                self.selected_regions.insert(region.clone());
            }
        }
        self.refresh_upper_bound();

        if defaults.budget > 0 {
            self.budget.set_initial_value(defaults.budget);
        }

        for target in &defaults.targets {
            if !self.basic_targets.contains(target) {
                self.basic_targets.toggle(target.clone());
            }
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::{BudgetKind, BudgetTriple};
    use crate::domain::region::{BarrierCatalog, BARRIERS_CSV};

    fn session() -> PlanningSession {
        PlanningSession::new(RegionCostTable::from_catalog(
            &BarrierCatalog::from_csv(BARRIERS_CSV).unwrap(),
        ))
    }

    fn basic_labels(session: &mut PlanningSession) -> Vec<&'static str> {
        session
            .budget_mut()
            .basic_mut()
            .unwrap()
            .selectable()
            .iter()
            .map(|l| l.label)
            .collect()
    }

    #[test]
    fn new_session_has_nothing_selected() {
        let session = session();
        assert!(session.selected_regions().is_empty());
        assert_eq!(session.total_cost(), 0.0);
        assert!(session.last_output().is_none());
        assert_eq!(session.region_names(), vec!["Coos", "Coquille"]);
    }

    #[test]
    fn toggling_regions_updates_budget_bounds() {
        let mut session = session();
        assert!(session.toggle_region("Coos").unwrap());
        assert!(session.toggle_region("Coquille").unwrap());
        assert_eq!(session.total_cost(), 2_500_000.0);
        assert_eq!(
            basic_labels(&mut session),
            vec!["$0", "$500K", "$1M", "$2.5M"]
        );

        assert!(!session.toggle_region("Coquille").unwrap());
        assert_eq!(session.total_cost(), 1_000_000.0);
        assert_eq!(basic_labels(&mut session), vec!["$0", "$500K", "$1M"]);
    }

    #[test]
    fn toggling_unknown_region_fails() {
        let err = session().toggle_region("Umpqua").unwrap_err();
        assert_eq!(err.code, ErrorCode::RegionNotFound);
    }

    #[test]
    fn end_to_end_basic_budget_from_region_totals() {
        let mut session = session();
        session.toggle_region("Coos").unwrap();
        session.toggle_region("Coquille").unwrap();
        let basic = session.budget_mut().basic_mut().unwrap();
        basic.select_highest();
        assert_eq!(basic.selected().label, "$2.5M");
        assert_eq!(session.budget().values(), BudgetTriple::new(0, 250_000, 10));
    }

    #[test]
    fn target_modes_keep_separate_selections() {
        let mut session = session();
        session.targets_mut().toggle(TargetId::from("CO"));
        session.set_target_mode(TargetMode::Weighted);
        assert!(session.targets().is_empty());
        session.targets_mut().set_weight(TargetId::from("FI"), "4");

        session.set_target_mode(TargetMode::Basic);
        assert_eq!(session.targets().ids(), vec![TargetId::from("CO")]);
    }

    #[test]
    fn run_parameters_reflect_session_choices() {
        let mut session = session();
        session.toggle_region("Coquille").unwrap();
        session.budget_mut().activate(BudgetKind::Fixed);
        session.budget_mut().fixed_mut().unwrap().set_text("$400K");
        session.targets_mut().toggle(TargetId::from("CO"));

        let params = session.run_parameters().unwrap();
        assert_eq!(params.regions, vec!["Coquille"]);
        assert_eq!(params.budget, BudgetTriple::new(400_000, 0, 1));
    }

    #[test]
    fn run_parameters_report_missing_choices() {
        let err = session().run_parameters().unwrap_err();
        assert_eq!(err.missing_items().len(), 3);
    }

    #[test]
    fn mapping_must_be_offered() {
        let mut session = session();
        let mapping = ColumnMapping::new(
            Some("climate".to_string()),
            vec!["current.csv".to_string(), "future.csv".to_string()],
        );
        session.set_mapping(Some("future"), &mapping).unwrap();
        assert_eq!(session.mapping(), Some("future"));

        let err = session.set_mapping(Some("past"), &mapping).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(session.mapping(), Some("future"));

        session.set_mapping(None, &mapping).unwrap();
        assert_eq!(session.mapping(), None);
    }

    #[test]
    fn defaults_select_regions_then_budget_then_targets() {
        let mut session = session();
        let unknown = session.apply_defaults(&SessionDefaults {
            regions: vec!["Coos".to_string(), "Siuslaw".to_string(), "Coquille".to_string()],
            budget: 2_000_000,
            targets: vec![TargetId::from("CO"), TargetId::from("FI")],
        });

        assert_eq!(unknown, vec!["Siuslaw"]);
        assert_eq!(session.selected_regions(), vec!["Coos", "Coquille"]);
        let basic = session.budget_mut().basic_mut().unwrap();
        assert_eq!(basic.selected().label, "$1M");
        assert_eq!(session.targets().ids().len(), 2);
        assert!(session.run_parameters().is_ok());
    }
}
