//! In-memory parameter store and metrics query for tests/dev.
//!
//! Both record every call so callers can assert on what was (not) sent.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use dashwatch_core::{MetricId, TimeSeries};

use crate::error::MetricsError;
use crate::query::{MetricQuery, MetricsQuery};
use crate::store::{Attributes, ParameterStore};

#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    records: RwLock<HashMap<MetricId, Attributes>>,
    lookups: Mutex<Vec<MetricId>>,
    failure: Option<String>,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every lookup fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn insert(&self, metric: MetricId, attributes: Attributes) {
        if let Ok(mut records) = self.records.write() {
            records.insert(metric, attributes);
        }
    }

    /// Metrics looked up so far, in call order.
    pub fn lookups(&self) -> Vec<MetricId> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get_attributes(&self, metric: &MetricId) -> Result<Attributes, MetricsError> {
        self.lookups
            .lock()
            .map_err(|_| MetricsError::Store("lock poisoned".to_string()))?
            .push(metric.clone());

        if let Some(message) = &self.failure {
            return Err(MetricsError::Store(message.clone()));
        }

        let records = self
            .records
            .read()
            .map_err(|_| MetricsError::Store("lock poisoned".to_string()))?;
        Ok(records.get(metric).cloned().unwrap_or_default())
    }
}

/// Series keyed by `(namespace, metric name)`.
#[derive(Debug, Default)]
pub struct InMemoryMetricsQuery {
    series: RwLock<HashMap<(String, String), TimeSeries>>,
    queries: Mutex<Vec<MetricQuery>>,
    failure: Option<String>,
}

impl InMemoryMetricsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A query whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn insert(&self, namespace: impl Into<String>, metric_name: impl Into<String>, series: TimeSeries) {
        if let Ok(mut all) = self.series.write() {
            all.insert((namespace.into(), metric_name.into()), series);
        }
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<MetricQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl MetricsQuery for InMemoryMetricsQuery {
    async fn get_metric_data(&self, query: &MetricQuery) -> Result<TimeSeries, MetricsError> {
        self.queries
            .lock()
            .map_err(|_| MetricsError::Query("lock poisoned".to_string()))?
            .push(query.clone());

        if let Some(message) = &self.failure {
            return Err(MetricsError::Query(message.clone()));
        }

        let key = (
            query.params.namespace().to_string(),
            query.params.metric_name().to_string(),
        );
        let all = self
            .series
            .read()
            .map_err(|_| MetricsError::Query("lock poisoned".to_string()))?;
        all.get(&key)
            .cloned()
            .ok_or_else(|| MetricsError::MalformedResponse("no result series returned".to_string()))
    }
}
