//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TIDEGATE_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tidegate_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using project {}", config.optimizer.project);
//! ```

mod defaults;
mod error;
mod logging;
mod optimizer;
mod ui;

pub use defaults::DefaultsConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use optimizer::OptimizerConfig;
pub use ui::UiConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// The loaded value is never mutated; pass it by reference.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// OptiPass server and project
    pub optimizer: OptimizerConfig,

    /// Dashboard settings (initial tab, port)
    #[serde(default)]
    pub ui: UiConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Developer start-up selections
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TIDEGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TIDEGATE__OPTIMIZER__SERVER_URL=...` -> `optimizer.server_url = ...`
    /// - `TIDEGATE__DEFAULTS__REGIONS=Coos:Coquille` -> `defaults.regions`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TIDEGATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.optimizer.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TIDEGATE__OPTIMIZER__SERVER_URL", "http://localhost:8000");
        env::set_var("TIDEGATE__OPTIMIZER__PROJECT", "demo");
    }

    fn clear_env() {
        env::remove_var("TIDEGATE__OPTIMIZER__SERVER_URL");
        env::remove_var("TIDEGATE__OPTIMIZER__PROJECT");
        env::remove_var("TIDEGATE__OPTIMIZER__TIMEOUT_SECS");
        env::remove_var("TIDEGATE__UI__INITIAL_TAB");
        env::remove_var("TIDEGATE__DEFAULTS__REGIONS");
        env::remove_var("TIDEGATE__DEFAULTS__BUDGET");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.optimizer.server_url, "http://localhost:8000");
        assert_eq!(config.optimizer.project, "demo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.optimizer.timeout_secs, 300);
        assert_eq!(config.ui.initial_tab, 2);
        assert_eq!(config.ui.port, 5006);
        assert_eq!(config.logging.level, "info,tidegate_planner=debug");
        assert!(!config.logging.json);
        assert!(config.defaults.region_list().is_empty());
    }

    #[test]
    fn test_custom_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TIDEGATE__OPTIMIZER__TIMEOUT_SECS", "600");
        env::set_var("TIDEGATE__UI__INITIAL_TAB", "0");
        env::set_var("TIDEGATE__DEFAULTS__REGIONS", "Coos:Coquille");
        env::set_var("TIDEGATE__DEFAULTS__BUDGET", "2000000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.optimizer.timeout_secs, 600);
        assert_eq!(config.ui.initial_tab, 0);
        assert_eq!(config.defaults.region_list(), vec!["Coos", "Coquille"]);
        assert_eq!(config.defaults.budget, 2_000_000);
    }

    #[test]
    fn test_missing_optimizer_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
