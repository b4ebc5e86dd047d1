//! Which targets the user picked, with or without weights.

use serde::Serialize;

use crate::domain::foundation::TargetId;

/// A target with the weight text typed next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedTarget {
    pub id: TargetId,
    pub weight: String,
}

/// Target choices in one of two entry modes.
///
/// In basic mode targets are checked on or off and count equally. In
/// weighted mode a target is selected by typing a weight next to it; the
/// text is kept verbatim and only checked when a run is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "targets", rename_all = "lowercase")]
pub enum TargetSelection {
    Basic(Vec<TargetId>),
    Weighted(Vec<WeightedTarget>),
}

impl Default for TargetSelection {
    fn default() -> Self {
        TargetSelection::Basic(Vec::new())
    }
}

impl TargetSelection {
    pub fn basic() -> Self {
        Self::default()
    }

    pub fn weighted() -> Self {
        TargetSelection::Weighted(Vec::new())
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> Vec<TargetId> {
        match self {
            TargetSelection::Basic(ids) => ids.clone(),
            TargetSelection::Weighted(entries) => entries.iter().map(|e| e.id.clone()).collect(),
        }
    }

    /// Weight strings parallel to [`ids`](Self::ids), or `None` in basic
    /// mode or when nothing has been entered.
    pub fn weights(&self) -> Option<Vec<String>> {
        match self {
            TargetSelection::Weighted(entries) if !entries.is_empty() => {
                Some(entries.iter().map(|e| e.weight.clone()).collect())
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TargetSelection::Basic(ids) => ids.is_empty(),
            TargetSelection::Weighted(entries) => entries.is_empty(),
        }
    }

    pub fn contains(&self, id: &TargetId) -> bool {
        match self {
            TargetSelection::Basic(ids) => ids.contains(id),
            TargetSelection::Weighted(entries) => entries.iter().any(|e| &e.id == id),
        }
    }

    /// Checks or unchecks a target. Returns false in weighted mode, where
    /// selection happens through [`set_weight`](Self::set_weight).
    pub fn toggle(&mut self, id: TargetId) -> bool {
        match self {
            TargetSelection::Basic(ids) => {
                match ids.iter().position(|t| t == &id) {
                    Some(i) => {
                        ids.remove(i);
                    }
                    None => ids.push(id),
                }
                true
            }
            TargetSelection::Weighted(_) => false,
        }
    }

    /// Sets the weight text for a target. Blank text deselects it.
    /// Returns false in basic mode.
    pub fn set_weight(&mut self, id: TargetId, weight: impl Into<String>) -> bool {
        let TargetSelection::Weighted(entries) = self else {
            return false;
        };
        let weight = weight.into();
        let existing = entries.iter().position(|e| e.id == id);
        match (existing, weight.trim().is_empty()) {
            (Some(i), true) => {
                entries.remove(i);
            }
            (Some(i), false) => entries[i].weight = weight,
            (None, true) => {}
            (None, false) => entries.push(WeightedTarget { id, weight }),
        }
        true
    }
}
