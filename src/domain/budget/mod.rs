//! Budget module - the three ways a user can describe a budget schedule.
//!
//! # Components
//!
//! - `BasicBudget` - one ceiling from a preset ladder, always ten levels
//! - `AdvancedBudget` - maximum, increment, and count kept consistent by
//!   [`derive_fields`]
//! - `FixedBudget` - a single typed amount
//! - `BudgetSelector` - one instance of each, plus which one is active
//!
//! Every variant reduces to a [`BudgetTriple`] through [`BudgetSchedule`].

mod advanced;
mod basic;
mod fixed;
mod triple;

pub use advanced::{
    derive_fields, AdvancedBounds, AdvancedBudget, AdvancedValues, BudgetField, ValueRange,
    COUNT_MAX, COUNT_MIN, DEFAULT_COUNT, INC_STEP, MAX_STEP,
};
pub use basic::{BasicBudget, BudgetLevel, BASIC_BUDGET_COUNT, BUDGET_LEVELS, MIN_LEVELS};
pub use fixed::FixedBudget;
pub use triple::BudgetTriple;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract shared by every budget variant.
pub trait BudgetSchedule {
    /// The schedule in canonical `(start, increment, count)` form.
    fn values(&self) -> BudgetTriple;

    /// True once the user has entered enough to run the optimizer.
    fn is_defined(&self) -> bool;

    /// Called whenever the total cost of the selected regions changes.
    fn set_upper_bound(&mut self, n: u64);

    /// One-time initialization from a start-up default.
    fn set_initial_value(&mut self, n: u64);
}

/// Which budget variant is in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    #[default]
    Basic,
    Advanced,
    Fixed,
}

impl BudgetKind {
    pub const ALL: [BudgetKind; 3] = [BudgetKind::Basic, BudgetKind::Advanced, BudgetKind::Fixed];

    fn index(self) -> usize {
        match self {
            BudgetKind::Basic => 0,
            BudgetKind::Advanced => 1,
            BudgetKind::Fixed => 2,
        }
    }
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BudgetKind::Basic => "Basic",
            BudgetKind::Advanced => "Advanced",
            BudgetKind::Fixed => "Fixed",
        };
        write!(f, "{}", s)
    }
}

/// A budget specification, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BudgetSpec {
    Basic(BasicBudget),
    Advanced(AdvancedBudget),
    Fixed(FixedBudget),
}

impl BudgetSpec {
    /// A fresh specification of the given kind.
    pub fn new(kind: BudgetKind) -> Self {
        match kind {
            BudgetKind::Basic => BudgetSpec::Basic(BasicBudget::new()),
            BudgetKind::Advanced => BudgetSpec::Advanced(AdvancedBudget::new()),
            BudgetKind::Fixed => BudgetSpec::Fixed(FixedBudget::new()),
        }
    }

    pub fn kind(&self) -> BudgetKind {
        match self {
            BudgetSpec::Basic(_) => BudgetKind::Basic,
            BudgetSpec::Advanced(_) => BudgetKind::Advanced,
            BudgetSpec::Fixed(_) => BudgetKind::Fixed,
        }
    }

    fn schedule(&self) -> &dyn BudgetSchedule {
        match self {
            BudgetSpec::Basic(b) => b,
            BudgetSpec::Advanced(b) => b,
            BudgetSpec::Fixed(b) => b,
        }
    }

    fn schedule_mut(&mut self) -> &mut dyn BudgetSchedule {
        match self {
            BudgetSpec::Basic(b) => b,
            BudgetSpec::Advanced(b) => b,
            BudgetSpec::Fixed(b) => b,
        }
    }
}

impl BudgetSchedule for BudgetSpec {
    fn values(&self) -> BudgetTriple {
        self.schedule().values()
    }

    fn is_defined(&self) -> bool {
        self.schedule().is_defined()
    }

    fn set_upper_bound(&mut self, n: u64) {
        self.schedule_mut().set_upper_bound(n);
    }

    fn set_initial_value(&mut self, n: u64) {
        self.schedule_mut().set_initial_value(n);
    }
}

/// Holds one specification of each kind so switching between them keeps
/// what the user entered in each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSelector {
    specs: [BudgetSpec; 3],
    active: BudgetKind,
}

impl Default for BudgetSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetSelector {
    pub fn new() -> Self {
        Self {
            specs: BudgetKind::ALL.map(BudgetSpec::new),
            active: BudgetKind::default(),
        }
    }

    pub fn active_kind(&self) -> BudgetKind {
        self.active
    }

    pub fn activate(&mut self, kind: BudgetKind) {
        self.active = kind;
    }

    /// The specification currently in use.
    pub fn active(&self) -> &BudgetSpec {
        &self.specs[self.active.index()]
    }

    pub fn active_mut(&mut self) -> &mut BudgetSpec {
        &mut self.specs[self.active.index()]
    }

    pub fn basic_mut(&mut self) -> Option<&mut BasicBudget> {
        self.specs.iter_mut().find_map(|spec| match spec {
            BudgetSpec::Basic(b) => Some(b),
            _ => None,
        })
    }

    pub fn advanced_mut(&mut self) -> Option<&mut AdvancedBudget> {
        self.specs.iter_mut().find_map(|spec| match spec {
            BudgetSpec::Advanced(b) => Some(b),
            _ => None,
        })
    }

    pub fn fixed_mut(&mut self) -> Option<&mut FixedBudget> {
        self.specs.iter_mut().find_map(|spec| match spec {
            BudgetSpec::Fixed(b) => Some(b),
            _ => None,
        })
    }
}

impl BudgetSchedule for BudgetSelector {
    fn values(&self) -> BudgetTriple {
        self.active().values()
    }

    fn is_defined(&self) -> bool {
        self.active().is_defined()
    }

    /// Every variant hears about the new bound, not just the active one.
    fn set_upper_bound(&mut self, n: u64) {
        for spec in self.specs.iter_mut() {
            spec.set_upper_bound(n);
        }
    }

    fn set_initial_value(&mut self, n: u64) {
        self.active_mut().set_initial_value(n);
    }
}
