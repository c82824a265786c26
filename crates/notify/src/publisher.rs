use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::envelope::NotificationEnvelope;

/// Topic value that turns publishing off.
pub const DISABLED_TOPIC: &str = "none";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to serialize notification: {0}")]
    Serialize(String),

    #[error("failed to publish notification: {0}")]
    Publish(String),
}

/// Publish-once transport for a serialized message.
#[async_trait::async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, topic: &str, message: String) -> Result<(), NotifyError>;
}

#[async_trait::async_trait]
impl<T: TopicPublisher + ?Sized> TopicPublisher for Arc<T> {
    async fn publish(&self, topic: &str, message: String) -> Result<(), NotifyError> {
        (**self).publish(topic, message).await
    }
}

/// Empty topic or `none` (any case) disables publishing.
pub fn publishing_disabled(topic: &str) -> bool {
    topic.is_empty() || topic.eq_ignore_ascii_case(DISABLED_TOPIC)
}

/// Outcome of [`Notifier::notify`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delivery {
    Published,
    /// Publishing is disabled for this topic; nothing was sent.
    Skipped,
}

/// Wraps a report in its envelope and publishes it to the configured topic.
#[derive(Debug, Clone)]
pub struct Notifier<P> {
    publisher: P,
    topic: String,
}

impl<P: TopicPublisher> Notifier<P> {
    pub fn new(publisher: P, topic: impl Into<String>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
        }
    }

    #[instrument(skip_all, fields(topic = %self.topic))]
    pub async fn notify(&self, report: &str) -> Result<Delivery, NotifyError> {
        info!("send message to topic");

        if publishing_disabled(&self.topic) {
            info!("notification disabled, skipping");
            return Ok(Delivery::Skipped);
        }

        let message = NotificationEnvelope::for_report(report).to_json().inspect_err(|e| {
            error!(error = %e, "error marshalling notification");
        })?;

        self.publisher
            .publish(&self.topic, message)
            .await
            .inspect_err(|e| {
                error!(error = %e, "error sending message to topic");
            })?;

        Ok(Delivery::Published)
    }
}
