use thiserror::Error;

use dashwatch_ai::AiError;
use dashwatch_core::ConfigError;
use dashwatch_infra::InfraError;
use dashwatch_notify::NotifyError;

/// Why an invocation failed. The first failing step wins; nothing is retried.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to set up service clients: {0}")]
    Infra(#[from] InfraError),

    #[error("failed to generate report: {0}")]
    Report(#[from] AiError),

    #[error("failed to publish report: {0}")]
    Notify(#[from] NotifyError),
}
