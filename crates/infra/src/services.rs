//! Per-invocation wiring of the pipeline ports to concrete clients.

use dashwatch_ai::InferenceClient;
use dashwatch_core::Configuration;
use dashwatch_metrics::{MetricsQuery, ParameterStore};
use dashwatch_notify::TopicPublisher;
use tracing::{info, instrument};

use crate::aws::{self, BedrockInferenceClient, CloudWatchMetricsQuery, DynamoParameterStore, SnsPublisher};
use crate::error::InfraError;

/// One client per pipeline port.
#[derive(Debug, Clone)]
pub struct Services<S, Q, I, P> {
    pub store: S,
    pub query: Q,
    pub inference: I,
    pub publisher: P,
}

/// Builds a fresh [`Services`] set for one invocation.
#[async_trait::async_trait]
pub trait ServiceFactory: Send + Sync {
    type Store: ParameterStore;
    type Query: MetricsQuery;
    type Inference: InferenceClient;
    type Publisher: TopicPublisher;

    async fn connect(
        &self,
        config: &Configuration,
    ) -> Result<Services<Self::Store, Self::Query, Self::Inference, Self::Publisher>, InfraError>;
}

/// AWS SDK clients.
///
/// DynamoDB, CloudWatch and SNS share the data-store region; Bedrock uses the
/// inference region.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsServiceFactory;

#[async_trait::async_trait]
impl ServiceFactory for AwsServiceFactory {
    type Store = DynamoParameterStore;
    type Query = CloudWatchMetricsQuery;
    type Inference = BedrockInferenceClient;
    type Publisher = SnsPublisher;

    #[instrument(skip_all, fields(store_region = %config.store_region(), inference_region = %config.inference_region()))]
    async fn connect(
        &self,
        config: &Configuration,
    ) -> Result<Services<Self::Store, Self::Query, Self::Inference, Self::Publisher>, InfraError> {
        let store_config = aws::sdk_config(config.store_region()).await;
        let inference_config = aws::sdk_config(config.inference_region()).await;
        info!("loaded SDK configuration");

        Ok(Services {
            store: DynamoParameterStore::new(aws_sdk_dynamodb::Client::new(&store_config), config.table_name()),
            query: CloudWatchMetricsQuery::new(aws_sdk_cloudwatch::Client::new(&store_config)),
            inference: BedrockInferenceClient::new(aws_sdk_bedrockruntime::Client::new(&inference_config)),
            publisher: SnsPublisher::new(aws_sdk_sns::Client::new(&store_config)),
        })
    }
}
