use std::collections::HashMap;
use std::sync::Arc;

use dashwatch_core::MetricId;

use crate::error::MetricsError;

/// Partition key of the parameter table.
pub const KEY_ATTRIBUTE: &str = "awsService";

/// Stored attributes with textual values.
pub type Attributes = HashMap<String, String>;

/// Point lookup of a metric's stored fetch parameters.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch the record keyed by `metric`.
    ///
    /// Only textual attributes are returned; other attribute types are dropped.
    /// A missing record yields an empty map.
    async fn get_attributes(&self, metric: &MetricId) -> Result<Attributes, MetricsError>;
}

#[async_trait::async_trait]
impl<T: ParameterStore + ?Sized> ParameterStore for Arc<T> {
    async fn get_attributes(&self, metric: &MetricId) -> Result<Attributes, MetricsError> {
        (**self).get_attributes(metric).await
    }
}
