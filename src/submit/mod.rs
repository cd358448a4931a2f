use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure reported by a create/update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitError {
    pub message: String,
}

impl SubmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The remote create/update operation a form submits to.
///
/// The session only looks at success versus failure; the returned value is
/// kept as the persisted representation without being inspected.
#[async_trait]
pub trait SubmitEndpoint: Send + Sync {
    async fn create_or_update(&self, document: Value) -> Result<Value, SubmitError>;
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The session was not editable; the endpoint was not called.
    Skipped,
    /// The document failed validation; the endpoint was not called.
    Invalid { issues: Vec<String> },
    /// The endpoint accepted the document. Carries its response.
    Accepted(Value),
    /// The endpoint rejected the document. The session is editable again.
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}
