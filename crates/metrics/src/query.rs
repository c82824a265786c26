use std::sync::Arc;

use dashwatch_core::{FetchParams, TimeSeries, TimeWindow};

use crate::error::MetricsError;

/// Identifier of the single query in a metric-data request.
pub const QUERY_ID: &str = "m1";

/// One metric-data query: what to fetch and over which window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    pub params: FetchParams,
    pub window: TimeWindow,
}

/// Time-windowed query against the monitoring service.
#[async_trait::async_trait]
pub trait MetricsQuery: Send + Sync {
    /// Return the first result series of the query.
    async fn get_metric_data(&self, query: &MetricQuery) -> Result<TimeSeries, MetricsError>;
}

#[async_trait::async_trait]
impl<T: MetricsQuery + ?Sized> MetricsQuery for Arc<T> {
    async fn get_metric_data(&self, query: &MetricQuery) -> Result<TimeSeries, MetricsError> {
        (**self).get_metric_data(query).await
    }
}
