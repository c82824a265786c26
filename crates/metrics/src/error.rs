use thiserror::Error;

use dashwatch_core::DomainError;

#[derive(Debug, Error)]
pub enum MetricsError {
    /// The parameter lookup failed (connectivity, permissions, missing table).
    #[error("parameter lookup failed: {0}")]
    Store(String),

    /// The metric-data query failed.
    #[error("metric data query failed: {0}")]
    Query(String),

    /// The query succeeded but returned no usable series.
    #[error("metric data response is malformed: {0}")]
    MalformedResponse(String),

    /// Stored parameters or returned data could not be interpreted.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
