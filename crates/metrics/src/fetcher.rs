use tracing::{debug, error, info, instrument};

use dashwatch_core::{Clock, FetchParams, MetricId, TabularDocument, TimeWindow};

use crate::error::MetricsError;
use crate::query::{MetricQuery, MetricsQuery};
use crate::store::ParameterStore;

/// Anything that can produce the tabular document for a metric.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    async fn document(&self, metric: &MetricId) -> Result<TabularDocument, MetricsError>;
}

/// Parameter lookup + metric-data query + CSV rendering for one metric.
///
/// Each `fetch` is two sequential remote calls; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct MetricsFetcher<S, Q, C> {
    store: S,
    query: Q,
    clock: C,
}

impl<S, Q, C> MetricsFetcher<S, Q, C>
where
    S: ParameterStore,
    Q: MetricsQuery,
    C: Clock,
{
    pub fn new(store: S, query: Q, clock: C) -> Self {
        Self { store, query, clock }
    }

    /// Fetch `metric` over `[now - lookback days, now]` and render it.
    #[instrument(skip_all, fields(metric = %metric))]
    pub async fn fetch(&self, metric: &MetricId) -> Result<TabularDocument, MetricsError> {
        info!("getting parameters from the parameter store");
        let attributes = self.store.get_attributes(metric).await.inspect_err(|e| {
            error!(error = %e, "error getting parameters");
        })?;

        let params = FetchParams::from_attributes(&attributes).inspect_err(|e| {
            error!(error = %e, "stored fetch parameters are invalid");
        })?;

        let window = TimeWindow::ending_at(self.clock.now(), params.lookback_days())?;
        debug!(start = %window.start(), end = %window.end(), "querying metric data");

        let series = self
            .query
            .get_metric_data(&MetricQuery { params, window })
            .await
            .inspect_err(|e| {
                error!(error = %e, "error getting metric data");
            })?;

        info!(samples = series.len(), "received metric data");
        Ok(series.to_document(metric)?)
    }
}

#[async_trait::async_trait]
impl<S, Q, C> DocumentSource for MetricsFetcher<S, Q, C>
where
    S: ParameterStore,
    Q: MetricsQuery,
    C: Clock,
{
    async fn document(&self, metric: &MetricId) -> Result<TabularDocument, MetricsError> {
        self.fetch(metric).await
    }
}
