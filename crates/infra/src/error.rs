use std::fmt;

use aws_smithy_types::error::display::DisplayErrorContext;
use thiserror::Error;

use dashwatch_ai::AiError;
use dashwatch_metrics::MetricsError;
use dashwatch_notify::NotifyError;

/// Remote service an adapter talks to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Service {
    DynamoDb,
    CloudWatch,
    Bedrock,
    Sns,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DynamoDb => "DynamoDB",
            Self::CloudWatch => "CloudWatch",
            Self::Bedrock => "Bedrock",
            Self::Sns => "SNS",
        };
        f.write_str(name)
    }
}

/// Failure at the AWS boundary.
#[derive(Debug, Error)]
pub enum InfraError {
    /// The SDK call returned an error (transport, auth, throttling, service fault).
    #[error("{service} call failed: {message}")]
    Call { service: Service, message: String },

    /// A request shape was rejected by the SDK builder before sending.
    #[error("failed to build {service} request: {message}")]
    Build { service: Service, message: String },

    /// The call succeeded but the response could not be used.
    #[error("unexpected {service} response: {message}")]
    Malformed { service: Service, message: String },
}

impl InfraError {
    /// Render an SDK error with its full source chain.
    pub fn call<E>(service: Service, err: E) -> Self
    where
        E: std::error::Error,
    {
        Self::Call {
            service,
            message: DisplayErrorContext(err).to_string(),
        }
    }

    pub fn build(service: Service, err: impl fmt::Display) -> Self {
        Self::Build {
            service,
            message: err.to_string(),
        }
    }

    pub fn malformed(service: Service, message: impl Into<String>) -> Self {
        Self::Malformed {
            service,
            message: message.into(),
        }
    }

    pub fn service(&self) -> Service {
        match self {
            Self::Call { service, .. } | Self::Build { service, .. } | Self::Malformed { service, .. } => *service,
        }
    }
}

impl From<InfraError> for MetricsError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Malformed { .. } => MetricsError::MalformedResponse(err.to_string()),
            _ if err.service() == Service::DynamoDb => MetricsError::Store(err.to_string()),
            _ => MetricsError::Query(err.to_string()),
        }
    }
}

impl From<InfraError> for AiError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Build { .. } => AiError::InvalidRequest(err.to_string()),
            _ => AiError::InferenceFailed(err.to_string()),
        }
    }
}

impl From<InfraError> for NotifyError {
    fn from(err: InfraError) -> Self {
        NotifyError::Publish(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_map_to_store_errors() {
        let err: MetricsError = InfraError::malformed(Service::DynamoDb, "x").into();
        assert!(matches!(err, MetricsError::MalformedResponse(_)));

        let err: MetricsError = InfraError::Call {
            service: Service::DynamoDb,
            message: "ResourceNotFoundException".into(),
        }
        .into();
        assert!(matches!(err, MetricsError::Store(ref m) if m.contains("ResourceNotFoundException")));
    }

    #[test]
    fn query_failures_map_to_query_errors() {
        let err: MetricsError = InfraError::Call {
            service: Service::CloudWatch,
            message: "Throttling".into(),
        }
        .into();
        assert!(matches!(err, MetricsError::Query(ref m) if m.contains("CloudWatch")));
    }

    #[derive(Debug, Error)]
    #[error("dispatch failure")]
    struct Dispatch(#[source] std::io::Error);

    #[test]
    fn call_errors_render_the_source_chain() {
        let err = InfraError::call(Service::Bedrock, Dispatch(std::io::Error::other("connection reset")));
        let message = err.to_string();

        assert!(message.starts_with("Bedrock call failed: dispatch failure"), "{message}");
        assert!(message.contains("connection reset"), "{message}");
    }

    #[test]
    fn build_failures_are_invalid_inference_requests() {
        let err: AiError = InfraError::build(Service::Bedrock, "name is required").into();
        assert!(matches!(err, AiError::InvalidRequest(_)));
    }
}
