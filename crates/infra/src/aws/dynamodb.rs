//! DynamoDB-backed parameter store.
//!
//! ## Error Mapping
//!
//! | Situation | MetricsError |
//! |-----------|--------------|
//! | `GetItem` fails (table missing, access denied, throttled) | `Store` |
//! | No item for the key | none here; the empty map fails later as `MissingAttribute` |
//! | Non-string attribute | dropped; fails later if the attribute is required |

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::{debug, instrument};

use dashwatch_core::MetricId;
use dashwatch_metrics::{Attributes, KEY_ATTRIBUTE, MetricsError, ParameterStore};

use crate::error::{InfraError, Service};

/// Reads one item per metric from a fixed table, keyed by `awsService`.
#[derive(Debug, Clone)]
pub struct DynamoParameterStore {
    client: Client,
    table_name: String,
}

impl DynamoParameterStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl ParameterStore for DynamoParameterStore {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn get_attributes(&self, metric: &MetricId) -> Result<Attributes, MetricsError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(metric.as_str().to_string()))
            .send()
            .await
            .map_err(|e| InfraError::call(Service::DynamoDb, e))?;

        let attributes = output.item().map(string_attributes).unwrap_or_default();
        debug!(count = attributes.len(), "loaded fetch parameters");
        Ok(attributes)
    }
}

/// Keep the string-typed attributes of an item.
fn string_attributes(item: &HashMap<String, AttributeValue>) -> Attributes {
    item.iter()
        .filter_map(|(name, value)| value.as_s().ok().map(|s| (name.clone(), s.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_string_attributes() {
        let item = HashMap::from([
            ("awsService".to_string(), AttributeValue::S("ec2_cpu".into())),
            ("namespace".to_string(), AttributeValue::S("AWS/EC2".into())),
            ("period".to_string(), AttributeValue::N("300".into())),
            ("enabled".to_string(), AttributeValue::Bool(true)),
        ]);

        let attributes = string_attributes(&item);

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["namespace"], "AWS/EC2");
        assert!(!attributes.contains_key("period"));
    }
}
