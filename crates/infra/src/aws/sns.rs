//! SNS `Publish` adapter.

use aws_sdk_sns::Client;
use tracing::{debug, instrument};

use dashwatch_notify::{NotifyError, TopicPublisher};

use crate::error::{InfraError, Service};

#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl TopicPublisher for SnsPublisher {
    #[instrument(skip(self, message))]
    async fn publish(&self, topic: &str, message: String) -> Result<(), NotifyError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .message(message)
            .send()
            .await
            .map_err(|e| InfraError::call(Service::Sns, e))?;

        debug!(message_id = ?output.message_id(), "published");
        Ok(())
    }
}
