//! `dashwatch-metrics`
//!
//! **Responsibility:** turn a metric identifier into a tabular time-series
//! document.
//!
//! - `ParameterStore`: point lookup of the stored fetch parameters.
//! - `MetricsQuery`: one time-windowed metric-data query.
//! - `MetricsFetcher`: composes both over a window ending at the clock's "now".
//!
//! Remote implementations live in `dashwatch-infra`; in-memory ones here.

pub mod error;
pub mod fetcher;
pub mod in_memory;
pub mod query;
pub mod store;

pub use error::MetricsError;
pub use fetcher::{DocumentSource, MetricsFetcher};
pub use in_memory::{InMemoryMetricsQuery, InMemoryParameterStore};
pub use query::{MetricQuery, MetricsQuery, QUERY_ID};
pub use store::{Attributes, KEY_ATTRIBUTE, ParameterStore};
