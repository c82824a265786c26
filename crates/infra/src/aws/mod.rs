//! AWS SDK adapters for the pipeline ports.
//!
//! Each adapter owns one SDK client and converts between SDK shapes and our
//! types. Clients are built per invocation from [`sdk_config`]; nothing is
//! cached across invocations.

pub mod bedrock;
pub mod cloudwatch;
pub mod dynamodb;
pub mod sns;

use aws_config::{BehaviorVersion, Region, SdkConfig};

pub use bedrock::BedrockInferenceClient;
pub use cloudwatch::CloudWatchMetricsQuery;
pub use dynamodb::DynamoParameterStore;
pub use sns::SnsPublisher;

/// Shared SDK configuration (credentials chain, retry defaults) pinned to `region`.
pub async fn sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}
