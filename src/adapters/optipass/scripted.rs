//! In-memory stand-ins for the OptiPass server.
//!
//! `ScriptedOptimizer` plays back queued responses and records every
//! request; `InMemoryProjectReader` serves a fixed set of project files.
//! Both let sessions and handlers run without a server.
//!
//! # Example
//!
//! ```ignore
//! let optimizer = ScriptedOptimizer::new()
//!     .with_result(raw)
//!     .with_rejection("No solution");
//!
//! handler.handle(&mut session, &project).await?;
//! assert_eq!(optimizer.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::results::OptimizerRawResult;
use crate::domain::run::RunParameters;
use crate::domain::target::ColumnMapping;
use crate::ports::{OptimizerError, OptimizerService, ProjectReader, TargetFiles};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Optimizer double that answers from a queue.
///
/// When the queue runs dry every further call gets an empty result.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOptimizer {
    responses: Arc<Mutex<VecDeque<Result<OptimizerRawResult, OptimizerError>>>>,
    calls: Arc<Mutex<Vec<RunParameters>>>,
    delay: Duration,
}

impl ScriptedOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result.
    pub fn with_result(self, result: OptimizerRawResult) -> Self {
        locked(&self.responses).push_back(Ok(result));
        self
    }

    /// Queues a refusal with the given reason.
    pub fn with_rejection(self, reason: impl Into<String>) -> Self {
        locked(&self.responses).push_back(Err(OptimizerError::rejected(reason)));
        self
    }

    /// Queues an arbitrary error.
    pub fn with_error(self, error: OptimizerError) -> Self {
        locked(&self.responses).push_back(Err(error));
        self
    }

    /// Simulated run time per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Parameters of every call so far, oldest first.
    pub fn calls(&self) -> Vec<RunParameters> {
        locked(&self.calls).clone()
    }
}

#[async_trait]
impl OptimizerService for ScriptedOptimizer {
    async fn run(&self, params: &RunParameters) -> Result<OptimizerRawResult, OptimizerError> {
        locked(&self.calls).push(params.clone());
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let next = locked(&self.responses).pop_front();
        next.unwrap_or_else(|| Ok(OptimizerRawResult::default()))
    }
}

/// Files published for one project.
#[derive(Debug, Clone, Default)]
pub struct ProjectFiles {
    pub barriers: String,
    pub targets: TargetFiles,
    pub mapping: ColumnMapping,
    pub map_info: String,
}

/// Project reader backed by a map of project name to files.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectReader {
    projects: HashMap<String, ProjectFiles>,
}

impl InMemoryProjectReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, name: impl Into<String>, files: ProjectFiles) -> Self {
        self.projects.insert(name.into(), files);
        self
    }

    fn files(&self, project: &str) -> Result<&ProjectFiles, DomainError> {
        self.projects.get(project).ok_or_else(|| {
            DomainError::new(ErrorCode::ProjectNotFound, format!("unknown project: {}", project))
                .with_detail("project", project)
        })
    }
}

#[async_trait]
impl ProjectReader for InMemoryProjectReader {
    async fn projects(&self) -> Result<Vec<String>, DomainError> {
        let mut names: Vec<String> = self.projects.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn barriers(&self, project: &str) -> Result<String, DomainError> {
        Ok(self.files(project)?.barriers.clone())
    }

    async fn targets(&self, project: &str) -> Result<TargetFiles, DomainError> {
        Ok(self.files(project)?.targets.clone())
    }

    async fn column_mapping(&self, project: &str) -> Result<ColumnMapping, DomainError> {
        Ok(self.files(project)?.mapping.clone())
    }

    async fn map_info(&self, project: &str) -> Result<String, DomainError> {
        Ok(self.files(project)?.map_info.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::BudgetTriple;
    use crate::domain::foundation::TargetId;

    fn params() -> RunParameters {
        RunParameters {
            regions: vec!["Coos".to_string()],
            budget: BudgetTriple::new(0, 50_000, 10),
            targets: vec![TargetId::from("CO")],
            weights: None,
            mapping: None,
        }
    }

    #[tokio::test]
    async fn plays_back_responses_in_order() {
        let optimizer = ScriptedOptimizer::new()
            .with_rejection("No solution")
            .with_error(OptimizerError::network("refused"));

        let first = optimizer.run(&params()).await.unwrap_err();
        assert_eq!(first.reason(), Some("No solution"));
        let second = optimizer.run(&params()).await.unwrap_err();
        assert_eq!(second, OptimizerError::network("refused"));
        let third = optimizer.run(&params()).await.unwrap();
        assert!(third.summary.is_empty());
    }

    #[tokio::test]
    async fn records_every_call() {
        let optimizer = ScriptedOptimizer::new();
        optimizer.run(&params()).await.unwrap();
        optimizer.run(&params()).await.unwrap();
        assert_eq!(optimizer.call_count(), 2);
        assert_eq!(optimizer.calls()[0].regions, vec!["Coos"]);
    }

    #[tokio::test]
    async fn reader_serves_known_projects_only() {
        let reader = InMemoryProjectReader::new().with_project(
            "demo",
            ProjectFiles {
                barriers: "ID,region,cost\n".to_string(),
                ..ProjectFiles::default()
            },
        );
        assert_eq!(reader.projects().await.unwrap(), vec!["demo"]);
        assert_eq!(reader.barriers("demo").await.unwrap(), "ID,region,cost\n");
        let err = reader.map_info("other").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProjectNotFound);
    }
}
