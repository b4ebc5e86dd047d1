//! Start-up selections for development
//!
//! Lists are colon separated, e.g. `Coos:Coquille`.

use serde::Deserialize;

use crate::domain::foundation::TargetId;
use crate::domain::session::SessionDefaults;

/// Selections applied to a new session before the user touches anything
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Region names
    pub regions: Option<String>,

    /// Initial maximum budget in dollars (0 leaves the budget unset)
    #[serde(default)]
    pub budget: u64,

    /// Target ids
    pub targets: Option<String>,
}

impl DefaultsConfig {
    pub fn region_list(&self) -> Vec<String> {
        split_list(self.regions.as_deref())
    }

    pub fn target_list(&self) -> Vec<TargetId> {
        split_list(self.targets.as_deref())
            .into_iter()
            .map(|s| TargetId::from(s.as_str()))
            .collect()
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            regions: self.region_list(),
            budget: self.budget,
            targets: self.target_list(),
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|s| {
            s.split(':')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
