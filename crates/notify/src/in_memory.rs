//! Recording publisher for tests/dev.

use std::sync::Mutex;

use crate::publisher::{NotifyError, TopicPublisher};

/// Keeps every `(topic, message)` it is asked to publish.
///
/// - No IO
/// - Optionally fails every publish, to exercise error paths
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, String)>>,
    failure: Option<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Attempted publishes, failed ones included, in call order.
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, message: String) -> Result<(), NotifyError> {
        self.published
            .lock()
            .map_err(|_| NotifyError::Publish("lock poisoned".to_string()))?
            .push((topic.to_string(), message));

        match &self.failure {
            Some(message) => Err(NotifyError::Publish(message.clone())),
            None => Ok(()),
        }
    }
}
