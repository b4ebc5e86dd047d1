//! Dashboard configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Number of dashboard tabs (Home, Help, Start, Output, Download)
const TAB_COUNT: u8 = 5;

/// Dashboard settings
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Tab shown when the dashboard opens
    #[serde(default = "default_initial_tab")]
    pub initial_tab: u8,

    /// Local port for the dashboard server
    #[serde(default = "default_port")]
    pub port: u16,
}

impl UiConfig {
    /// Validate dashboard configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.initial_tab >= TAB_COUNT {
            return Err(ValidationError::InvalidInitialTab);
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            initial_tab: default_initial_tab(),
            port: default_port(),
        }
    }
}

// Start tab
fn default_initial_tab() -> u8 {
    2
}

fn default_port() -> u16 {
    5006
}
