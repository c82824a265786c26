//! Domain error model.

use thiserror::Error;

/// Result type used across the pure layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic failures on data that already arrived in memory
/// (stored parameters, series returned by the monitoring service). Remote call
/// failures belong to the crates that own the clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required fetch-parameter attribute was not stored.
    #[error("missing attribute `{0}`")]
    MissingAttribute(String),

    /// A stored attribute could not be interpreted.
    #[error("invalid attribute `{name}`: {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// An identifier was invalid (e.g. empty or parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A returned series did not have the expected shape.
    #[error("malformed series: {0}")]
    MalformedSeries(String),

    /// The tabular document could not be written.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute(name.into())
    }

    pub fn invalid_attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn malformed_series(msg: impl Into<String>) -> Self {
        Self::MalformedSeries(msg.into())
    }
}
