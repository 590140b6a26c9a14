//! Error taxonomy for qa-roi.
//!
//! Library code returns the typed errors below; the command layer wraps them
//! in `anyhow` with context before they reach the user.
//!
//! - [`RoiError`]: boundary validation and the ROI engine's division policy
//! - [`LlmError`]: the completion backend
//! - [`TrackerError`]: the issue tracker
//! - [`ConfigError`]: configuration files and standards documents
//! - [`AnalysisError`]: a single story failing somewhere in the pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by estimation validation and the ROI engine.
///
/// No variant carries a partial result: either a full `RoiResult` is
/// produced or one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoiError {
    /// A required estimation field is absent.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A field is present but non-numeric, negative, non-finite or otherwise unusable.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A denominator of the ROI or what-if formula is zero.
    #[error("cannot compute ROI: {quantity} is zero")]
    DivisionByZero { quantity: String },
}

impl RoiError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn division_by_zero(quantity: impl Into<String>) -> Self {
        Self::DivisionByZero {
            quantity: quantity.into(),
        }
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::InvalidInput { field, .. } => Some(field),
            Self::DivisionByZero { .. } => None,
        }
    }
}

/// Errors from the completion backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion backend is not configured: {0}")]
    NotConfigured(String),

    #[error("request to completion backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Errors from the issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("issue tracker is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("request to issue tracker failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("issue tracker rejected the ticket ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration value `{key}`: {reason}")]
    Invalid { key: String, reason: String },

    #[error("standards document not found: {0}")]
    MissingStandards(PathBuf),
}

/// Failure of a single user story during analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("estimation rejected: {0}")]
    Estimation(#[from] RoiError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("test case generation produced unusable output: {0}")]
    TestCases(String),
}

impl AnalysisError {
    /// Whether rerunning the story could plausibly succeed.
    ///
    /// Transport failures and malformed model output are worth another try;
    /// a deterministic validation failure is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Llm(LlmError::NotConfigured(_)) => false,
            Self::Llm(_) | Self::TestCases(_) => true,
            Self::Estimation(RoiError::InvalidInput { .. } | RoiError::MissingField { .. }) => {
                true
            }
            Self::Estimation(RoiError::DivisionByZero { .. }) => false,
        }
    }
}
