// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. The
//! important split is between record-level failures (a single malformed API
//! record, caught per discussion) and discussion-level failures (the whole
//! discussion is recorded in the failure log and the batch moves on).

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The listing endpoint answered, but with a non-success status — either
    /// at the HTTP layer or as a `status` field inside the JSON body.
    #[error("Request \"{url}\" failed with status {status}")]
    UpstreamFailure { status: u16, url: String },

    /// A raw record was missing fields its kind discriminator promised.
    /// Propagated rather than skipped: a partially-built record would
    /// corrupt the rendered document.
    #[error("Malformed {kind} record: {source}")]
    MalformedRecord {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// A discussion's pages were processed but no post record was found.
    #[error("Request \"{url}\" has no post object")]
    MissingPost { url: String },

    #[error("Reply nesting exceeds the maximum depth ({0})")]
    ReplyDepthExceeded(usize),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid header: {message}")]
    InvalidHeader { message: String },

    #[error("Invalid saved-post row at line {line}: {content:?}")]
    InvalidCsvRow { line: usize, content: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl AppError {
    /// Whether this failure aborts a single discussion rather than the batch.
    ///
    /// The orchestrator records these in the failure log and keeps going.
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn is_discussion_level(&self) -> bool {
        matches!(
            self,
            Self::UpstreamFailure { .. }
                | Self::MissingPost { .. }
                | Self::MalformedRecord { .. }
                | Self::MalformedResponse(_)
                | Self::ReplyDepthExceeded(_)
                | Self::NetworkFailure(_)
        )
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;
