//! Optimizer Service Port - Interface to the external barrier optimizer.
//!
//! The optimizer receives validated run parameters and returns the raw
//! summary and matrix tables. It is one request and one response; there
//! are no partial results and no cancellation.
//!
//! # Errors
//!
//! A refusal from the server keeps its reason text exactly as sent, so
//! callers can match on it (see [`OptimizerError::hint`]).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::results::OptimizerRawResult;
use crate::domain::run::RunParameters;

/// Reason the server gives when no set of barriers fits the budget.
pub const NO_SOLUTION: &str = "No solution";

/// Port for running the optimizer.
#[async_trait]
pub trait OptimizerService: Send + Sync {
    /// Runs the optimizer once for the given parameters.
    async fn run(&self, params: &RunParameters) -> Result<OptimizerRawResult, OptimizerError>;
}

/// Failures of an optimizer call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizerError {
    /// The server answered with a failure reason.
    #[error("optimizer rejected the run: {reason}")]
    Rejected { reason: String },

    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// No answer within the configured time.
    #[error("optimizer timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The answer could not be decoded.
    #[error("malformed optimizer response: {0}")]
    MalformedResponse(String),
}

impl OptimizerError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// The server's reason, for rejections.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    /// Suggestion to show alongside the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self.reason() {
            Some(NO_SOLUTION) => Some("try increasing the maximum budget"),
            _ => None,
        }
    }
}
