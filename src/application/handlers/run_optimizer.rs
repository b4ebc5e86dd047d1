//! RunOptimizerHandler - Validates a session's choices, runs the optimizer
//! and turns its answer into output tables.
//!
//! Only one optimizer call may be outstanding per handler. A second request
//! while one is running is refused rather than queued.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::ProjectContext;
use crate::domain::foundation::RunId;
use crate::domain::results::OptimizationOutput;
use crate::domain::run::RunValidationError;
use crate::domain::session::PlanningSession;
use crate::ports::{OptimizerError, OptimizerService};

/// Why a run did not produce output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Validation(#[from] RunValidationError),

    #[error("an optimizer run is already in progress")]
    Busy,

    #[error(transparent)]
    Optimizer(#[from] OptimizerError),
}

impl RunError {
    /// Suggestion to show with the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunError::Optimizer(e) => e.hint(),
            _ => None,
        }
    }
}

/// Handler for optimizer runs.
pub struct RunOptimizerHandler {
    optimizer: Arc<dyn OptimizerService>,
    in_flight: Mutex<()>,
}

impl RunOptimizerHandler {
    pub fn new(optimizer: Arc<dyn OptimizerService>) -> Self {
        Self {
            optimizer,
            in_flight: Mutex::new(()),
        }
    }

    /// Runs the optimizer for the session's current choices and records the
    /// output in the session. A failed run leaves the previous output alone.
    pub async fn handle(
        &self,
        session: &mut PlanningSession,
        project: &ProjectContext,
    ) -> Result<OptimizationOutput, RunError> {
        // 1. Validate choices
        let params = session.run_parameters()?;

        // 2. At most one call in flight
        let _guard = self.in_flight.try_lock().map_err(|_| RunError::Busy)?;

        // 3. Call the optimizer
        let run_id = RunId::new();
        info!(
            run_id = %run_id,
            project = %project.project,
            regions = ?params.regions,
            budget = %params.budget.range_label(),
            "starting optimizer run"
        );
        let raw = self.optimizer.run(&params).await.map_err(|e| {
            warn!(run_id = %run_id, error = %e, "optimizer run failed");
            e
        })?;

        // 4. Build tables and curves
        let output = OptimizationOutput::assemble(
            run_id,
            params,
            &raw,
            &project.barriers,
            &project.targets,
            &project.mapping,
        );
        info!(
            run_id = %run_id,
            selections = output.total_barrier_selections(),
            "optimizer run complete"
        );

        session.record_output(output.clone());
        Ok(output)
    }
}
