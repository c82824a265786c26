//! CloudWatch `GetMetricData` adapter.
//!
//! One query (`m1`) per call, no pagination; the first result series is
//! returned. Timestamps come back newest first and are passed through in
//! that order.

use aws_sdk_cloudwatch::Client;
use aws_sdk_cloudwatch::operation::get_metric_data::GetMetricDataOutput;
use aws_sdk_cloudwatch::primitives::DateTime as SdkDateTime;
use aws_sdk_cloudwatch::types::{Dimension, Metric, MetricDataQuery, MetricDataResult, MetricStat, StandardUnit};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use dashwatch_core::{FetchParams, TimeSeries};
use dashwatch_metrics::{MetricQuery, MetricsError, MetricsQuery, QUERY_ID};

use crate::error::{InfraError, Service};

#[derive(Debug, Clone)]
pub struct CloudWatchMetricsQuery {
    client: Client,
}

impl CloudWatchMetricsQuery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl MetricsQuery for CloudWatchMetricsQuery {
    #[instrument(
        skip_all,
        fields(namespace = %query.params.namespace(), metric_name = %query.params.metric_name())
    )]
    async fn get_metric_data(&self, query: &MetricQuery) -> Result<TimeSeries, MetricsError> {
        let output = self
            .client
            .get_metric_data()
            .start_time(to_sdk_time(query.window.start()))
            .end_time(to_sdk_time(query.window.end()))
            .metric_data_queries(metric_data_query(&query.params))
            .send()
            .await
            .map_err(|e| InfraError::call(Service::CloudWatch, e))?;

        let series = first_series(&output)?;
        debug!(samples = series.len(), "fetched metric data");
        Ok(series)
    }
}

fn metric_data_query(params: &FetchParams) -> MetricDataQuery {
    let dimensions = params
        .dimensions()
        .iter()
        .map(|d| Dimension::builder().name(d.name()).value(d.value()).build())
        .collect();

    let metric = Metric::builder()
        .namespace(params.namespace())
        .metric_name(params.metric_name())
        .set_dimensions(Some(dimensions))
        .build();

    let stat = MetricStat::builder()
        .metric(metric)
        .period(params.period_secs())
        .stat(params.statistic())
        .unit(StandardUnit::from(params.unit()))
        .build();

    MetricDataQuery::builder().id(QUERY_ID).metric_stat(stat).build()
}

/// The first result series; a response without results is malformed.
fn first_series(output: &GetMetricDataOutput) -> Result<TimeSeries, MetricsError> {
    let result = output
        .metric_data_results()
        .first()
        .ok_or_else(|| InfraError::malformed(Service::CloudWatch, "no metric data results"))?;

    to_series(result)
}

fn to_series(result: &MetricDataResult) -> Result<TimeSeries, MetricsError> {
    let timestamps = result
        .timestamps()
        .iter()
        .map(from_sdk_time)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TimeSeries::from_columns(timestamps, result.values().to_vec())?)
}

fn to_sdk_time(at: DateTime<Utc>) -> SdkDateTime {
    SdkDateTime::from_secs_and_nanos(at.timestamp(), at.timestamp_subsec_nanos())
}

fn from_sdk_time(at: &SdkDateTime) -> Result<DateTime<Utc>, InfraError> {
    DateTime::from_timestamp(at.secs(), at.subsec_nanos())
        .ok_or_else(|| InfraError::malformed(Service::CloudWatch, format!("timestamp out of range: {at:?}")))
}
