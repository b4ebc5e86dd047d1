//! Project Reader Port - Read access to a project's published data.
//!
//! Returns the files the server keeps per project more or less as sent;
//! parsing them into catalogs is the domain's job.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::DomainError;
use crate::domain::target::ColumnMapping;

/// Port for reading project metadata.
#[async_trait]
pub trait ProjectReader: Send + Sync {
    /// Names of all projects the server knows.
    async fn projects(&self) -> Result<Vec<String>, DomainError>;

    /// Barrier catalog as CSV text.
    async fn barriers(&self, project: &str) -> Result<String, DomainError>;

    /// Target catalog CSV and layout text.
    async fn targets(&self, project: &str) -> Result<TargetFiles, DomainError>;

    /// Scenario selector name and column mapping files.
    async fn column_mapping(&self, project: &str) -> Result<ColumnMapping, DomainError>;

    /// Map description as JSON text.
    async fn map_info(&self, project: &str) -> Result<String, DomainError>;
}

/// The two target files of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetFiles {
    /// CSV with one row per target.
    pub targets: String,
    /// Whitespace separated target ids, one display row per line.
    pub layout: String,
}
