//! Headless entry point.
//!
//! Loads configuration and the project, applies the configured start-up
//! selections, and when they are complete runs the optimizer once and
//! prints the output as JSON.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tidegate_planner::adapters::{OptiPassClient, OptiPassConfig};
use tidegate_planner::application::{LoadProjectCommand, LoadProjectHandler, RunOptimizerHandler};
use tidegate_planner::config::{AppConfig, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let client = Arc::new(OptiPassClient::new(
        OptiPassConfig::new(&config.optimizer.server_url, &config.optimizer.project)
            .with_timeout(config.optimizer.timeout()),
    )?);

    let project = LoadProjectHandler::new(client.clone(), client.config().server_url.clone())
        .handle(LoadProjectCommand {
            project: config.optimizer.project.clone(),
            initial_tab: config.ui.initial_tab,
        })
        .await?;

    let mut session = project.new_session();
    for region in session.apply_defaults(&config.defaults.session_defaults()) {
        warn!(region = %region, "ignoring unknown default region");
    }

    let params = match session.run_parameters() {
        Ok(params) => params,
        Err(e) => {
            info!(missing = ?e.missing_items(), "nothing to run: {}", e);
            return Ok(());
        }
    };
    for line in params.review_lines(&project.targets) {
        info!("{}", line);
    }

    let handler = RunOptimizerHandler::new(client);
    match handler.handle(&mut session, &project).await {
        Ok(output) => {
            if let Some(hint) = output.empty_hint() {
                warn!("{}", hint);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            if let Some(hint) = e.hint() {
                warn!("{}", hint);
            }
            Err(Box::new(e) as Box<dyn Error>)
        }
    }
}
