//! `dashwatch-core`: invocation-scoped building blocks.
//!
//! This crate contains **pure** types (no AWS clients): configuration, metric
//! identifiers, fetch parameters and the tabular time-series document handed to
//! the model.

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod params;
pub mod series;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, Configuration};
pub use error::{DomainError, DomainResult};
pub use id::{InvocationId, MetricId};
pub use params::{Dimension, FetchParams};
pub use series::{Sample, TabularDocument, TimeSeries, TimeWindow};
