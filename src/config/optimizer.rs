//! OptiPass server configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 3600;

/// Where the optimizer lives and which data set it serves
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    /// Base URL of the OptiPass REST server
    pub server_url: String,

    /// Project (data set) name on the server
    pub project: String,

    /// Optimizer request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl OptimizerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate optimizer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("optimizer.server_url"));
        }
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ValidationError::InvalidServerUrl);
        }
        if self.project.trim().is_empty() {
            return Err(ValidationError::MissingRequired("optimizer.project"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    300
}
