//! OptiPass Client - HTTP adapter for the OptiPass REST server.
//!
//! Implements both [`OptimizerService`] and [`ProjectReader`]. Every
//! endpoint answers with JSON; failures carry `{ "detail": reason }`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OptiPassConfig::new("http://localhost:8000", "demo")
//!     .with_timeout(Duration::from_secs(300));
//!
//! let client = OptiPassClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::results::OptimizerRawResult;
use crate::domain::run::RunParameters;
use crate::domain::target::ColumnMapping;
use crate::ports::{OptimizerError, OptimizerService, ProjectReader, TargetFiles};

/// Connection settings for the OptiPass server.
#[derive(Debug, Clone)]
pub struct OptiPassConfig {
    /// Base URL of the server, without a trailing slash.
    pub server_url: String,
    /// Project (data set) that optimizer runs use.
    pub project: String,
    /// Request timeout. Optimizer runs on large regions are slow.
    pub timeout: Duration,
}

impl OptiPassConfig {
    pub fn new(server_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            project: project.into(),
            timeout: Duration::from_secs(300),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path)
    }
}

/// OptiPass REST client.
pub struct OptiPassClient {
    config: OptiPassConfig,
    client: Client,
}

impl OptiPassClient {
    /// Creates a client with the configured timeout.
    pub fn new(config: OptiPassConfig) -> Result<Self, OptimizerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OptimizerError::network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OptiPassConfig {
        &self.config
    }

    /// Fetches a project endpoint and decodes its JSON body.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let url = self.config.url(path);
        debug!(url = %url, "fetching project data");
        let response = self.client.get(&url).send().await.map_err(|e| {
            DomainError::new(ErrorCode::NetworkError, format!("request failed: {}", e))
                .with_detail("url", url.clone())
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = failure_reason(response).await;
            warn!(url = %url, status = %status, reason = %reason, "server refused request");
            return Err(DomainError::new(ErrorCode::NetworkError, reason).with_detail("url", url));
        }

        response.json::<T>().await.map_err(|e| {
            DomainError::new(ErrorCode::MalformedCatalog, format!("bad response: {}", e))
                .with_detail("url", url)
        })
    }
}

/// Query string for an optimizer run, in the order the server reads it.
pub fn run_query(params: &RunParameters) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    for region in &params.regions {
        query.push(("regions", region.clone()));
    }
    query.push(("bmin", params.budget.start.to_string()));
    query.push(("binc", params.budget.increment.to_string()));
    query.push(("bcount", params.budget.count.to_string()));
    for target in &params.targets {
        query.push(("targets", target.to_string()));
    }
    if let Some(weights) = &params.weights {
        for w in weights {
            query.push(("weights", w.to_string()));
        }
    }
    if let Some(mapping) = &params.mapping {
        query.push(("mapping", mapping.clone()));
    }
    query
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Pulls the reason out of a `{ "detail": ... }` body, falling back to the
/// raw text.
fn parse_failure(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| body.trim().to_string())
}

async fn failure_reason(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let reason = parse_failure(&body);
    if reason.is_empty() {
        format!("server returned {}", status)
    } else {
        reason
    }
}

#[async_trait]
impl OptimizerService for OptiPassClient {
    async fn run(&self, params: &RunParameters) -> Result<OptimizerRawResult, OptimizerError> {
        let url = self.config.url(&format!("optipass/{}", self.config.project));
        debug!(url = %url, regions = ?params.regions, "sending optimizer request");

        let response = self
            .client
            .get(&url)
            .query(&run_query(params))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OptimizerError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    OptimizerError::network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(OptimizerError::rejected(failure_reason(response).await));
        }

        response
            .json::<OptimizerRawResult>()
            .await
            .map_err(|e| OptimizerError::malformed(e.to_string()))
    }
}

#[derive(Deserialize)]
struct BarrierEnvelope {
    barriers: String,
}

#[derive(Deserialize)]
struct MapInfoEnvelope {
    mapinfo: String,
}

#[async_trait]
impl ProjectReader for OptiPassClient {
    async fn projects(&self) -> Result<Vec<String>, DomainError> {
        self.fetch("projects").await
    }

    async fn barriers(&self, project: &str) -> Result<String, DomainError> {
        let body: BarrierEnvelope = self.fetch(&format!("barriers/{}", project)).await?;
        Ok(body.barriers)
    }

    async fn targets(&self, project: &str) -> Result<TargetFiles, DomainError> {
        self.fetch(&format!("targets/{}", project)).await
    }

    async fn column_mapping(&self, project: &str) -> Result<ColumnMapping, DomainError> {
        self.fetch(&format!("colnames/{}", project)).await
    }

    async fn map_info(&self, project: &str) -> Result<String, DomainError> {
        let body: MapInfoEnvelope = self.fetch(&format!("mapinfo/{}", project)).await?;
        Ok(body.mapinfo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::BudgetTriple;
    use crate::domain::foundation::TargetId;

    fn params() -> RunParameters {
        RunParameters {
            regions: vec!["Coos".to_string(), "Coquille".to_string()],
            budget: BudgetTriple::new(0, 100_000, 10),
            targets: vec![TargetId::from("CO"), TargetId::from("FI")],
            weights: None,
            mapping: None,
        }
    }

    #[test]
    fn config_strips_trailing_slash() {
        let config = OptiPassConfig::new("http://localhost:8000/", "demo");
        assert_eq!(config.url("projects"), "http://localhost:8000/projects");
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn query_repeats_regions_and_targets() {
        let query = run_query(&params());
        assert_eq!(
            query,
            vec![
                ("regions", "Coos".to_string()),
                ("regions", "Coquille".to_string()),
                ("bmin", "0".to_string()),
                ("binc", "100000".to_string()),
                ("bcount", "10".to_string()),
                ("targets", "CO".to_string()),
                ("targets", "FI".to_string()),
            ]
        );
    }

    #[test]
    fn query_appends_weights_and_mapping_when_present() {
        let mut p = params();
        p.weights = Some(vec![3, 1]);
        p.mapping = Some("future".to_string());
        let query = run_query(&p);
        let tail: Vec<_> = query.iter().skip(7).cloned().collect();
        assert_eq!(
            tail,
            vec![
                ("weights", "3".to_string()),
                ("weights", "1".to_string()),
                ("mapping", "future".to_string()),
            ]
        );
    }

    #[test]
    fn failure_reason_comes_from_detail() {
        assert_eq!(parse_failure(r#"{"detail": "No solution"}"#), "No solution");
        assert_eq!(parse_failure("Internal Server Error\n"), "Internal Server Error");
    }
}
