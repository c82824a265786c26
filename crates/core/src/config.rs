//! Invocation configuration, read from the process environment.
//!
//! Every value is environmental; there are no flags or files. The loader is
//! fed a `(key, value)` iterator so callers decide where the environment comes
//! from (`std::env` in production, a fixed list in tests).

use thiserror::Error;
use tracing::error;

use crate::id::MetricId;

pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";
pub const STORE_REGION_VAR: &str = "DYNAMODB_REGION";
pub const INFERENCE_REGION_VAR: &str = "BEDROCK_REGION";
pub const MODEL_ID_VAR: &str = "BEDROCK_MODEL_ID";
pub const TOPIC_VAR: &str = "SNS_TOPIC_ARN";

/// Every variable whose name starts with this prefix supplies one metric identifier.
pub const METRIC_VAR_PREFIX: &str = "METRICS_NAME_";

pub const MIN_METRICS: usize = 1;
pub const MAX_METRICS: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(String),

    #[error("environment variable {0} is empty")]
    Empty(String),

    #[error("the count of metric names must be between 1 and 5, got {0}")]
    MetricCount(usize),
}

/// Immutable per-invocation configuration.
///
/// Table, regions and model id are non-empty. The topic may be empty, which
/// disables publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    table_name: String,
    store_region: String,
    inference_region: String,
    model_id: String,
    topic: String,
    metrics: Vec<MetricId>,
}

impl Configuration {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(process_vars())
    }

    /// Load from an explicit environment listing.
    ///
    /// Metric identifiers keep the order in which they are enumerated.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let table_name = required_non_empty(&vars, TABLE_NAME_VAR)?;
        let store_region = required_non_empty(&vars, STORE_REGION_VAR)?;
        let inference_region = required_non_empty(&vars, INFERENCE_REGION_VAR)?;
        let model_id = required_non_empty(&vars, MODEL_ID_VAR)?;
        let topic = required(&vars, TOPIC_VAR)?;

        let mut metrics = Vec::new();
        for (key, value) in vars.iter().filter(|(k, _)| k.starts_with(METRIC_VAR_PREFIX)) {
            let metric = MetricId::new(value.as_str()).map_err(|_| {
                error!(variable = %key, "environment variable is empty");
                ConfigError::Empty(key.clone())
            })?;
            metrics.push(metric);
        }

        if !(MIN_METRICS..=MAX_METRICS).contains(&metrics.len()) {
            error!(count = metrics.len(), "the count of metric names must be between 1 and 5");
            return Err(ConfigError::MetricCount(metrics.len()));
        }

        Ok(Self {
            table_name,
            store_region,
            inference_region,
            model_id,
            topic,
            metrics,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Region of the parameter table; also used for CloudWatch and SNS.
    pub fn store_region(&self) -> &str {
        &self.store_region
    }

    pub fn inference_region(&self) -> &str {
        &self.inference_region
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn metrics(&self) -> &[MetricId] {
        &self.metrics
    }
}

/// The process environment, with non-UTF-8 keys and values converted lossily.
pub fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().map(|(k, v)| {
        (
            k.to_string_lossy().into_owned(),
            v.to_string_lossy().into_owned(),
        )
    })
}

fn required(vars: &[(String, String)], name: &str) -> Result<String, ConfigError> {
    match vars.iter().find(|(k, _)| k == name) {
        Some((_, v)) => Ok(v.clone()),
        None => {
            error!(variable = name, "environment variable is not set");
            Err(ConfigError::Missing(name.to_string()))
        }
    }
}

fn required_non_empty(vars: &[(String, String)], name: &str) -> Result<String, ConfigError> {
    let value = required(vars, name)?;
    if value.is_empty() {
        error!(variable = name, "environment variable is empty");
        return Err(ConfigError::Empty(name.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base_vars() -> Vec<(String, String)> {
        [
            (TABLE_NAME_VAR, "dashboard-params"),
            (STORE_REGION_VAR, "ap-northeast-1"),
            (INFERENCE_REGION_VAR, "us-east-1"),
            (MODEL_ID_VAR, "anthropic.claude-3-sonnet"),
            (TOPIC_VAR, "arn:aws:sns:ap-northeast-1:123456789012:reports"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn with_metrics(n: usize) -> Vec<(String, String)> {
        let mut vars = base_vars();
        for i in 0..n {
            vars.push((format!("{METRIC_VAR_PREFIX}{i}"), format!("METRIC_{i}")));
        }
        vars
    }

    #[test]
    fn loads_complete_environment() {
        let mut vars = base_vars();
        vars.push(("METRICS_NAME_B".into(), "ALB_REQUESTS".into()));
        vars.push(("PATH".into(), "/usr/bin".into()));
        vars.push(("METRICS_NAME_A".into(), "AURORA_DML_LATENCY".into()));

        let cfg = Configuration::from_vars(vars).unwrap();

        assert_eq!(cfg.table_name(), "dashboard-params");
        assert_eq!(cfg.store_region(), "ap-northeast-1");
        assert_eq!(cfg.inference_region(), "us-east-1");
        assert_eq!(cfg.model_id(), "anthropic.claude-3-sonnet");
        let names: Vec<&str> = cfg.metrics().iter().map(MetricId::as_str).collect();
        // Enumeration order, not key order.
        assert_eq!(names, vec!["ALB_REQUESTS", "AURORA_DML_LATENCY"]);
    }

    #[test]
    fn missing_variable_is_named() {
        for name in [
            TABLE_NAME_VAR,
            STORE_REGION_VAR,
            INFERENCE_REGION_VAR,
            MODEL_ID_VAR,
            TOPIC_VAR,
        ] {
            let vars: Vec<_> = with_metrics(1).into_iter().filter(|(k, _)| k != name).collect();
            let err = Configuration::from_vars(vars).unwrap_err();
            assert_eq!(err, ConfigError::Missing(name.to_string()));
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn empty_topic_is_allowed() {
        let vars: Vec<_> = with_metrics(1)
            .into_iter()
            .map(|(k, v)| if k == TOPIC_VAR { (k, String::new()) } else { (k, v) })
            .collect();

        let cfg = Configuration::from_vars(vars).unwrap();
        assert_eq!(cfg.topic(), "");
    }

    #[test]
    fn empty_model_id_is_rejected() {
        let vars: Vec<_> = with_metrics(1)
            .into_iter()
            .map(|(k, v)| if k == MODEL_ID_VAR { (k, String::new()) } else { (k, v) })
            .collect();

        assert_eq!(
            Configuration::from_vars(vars).unwrap_err(),
            ConfigError::Empty(MODEL_ID_VAR.to_string())
        );
    }

    #[test]
    fn empty_metric_value_names_its_key() {
        let mut vars = with_metrics(1);
        vars.push(("METRICS_NAME_EMPTY".into(), String::new()));

        assert_eq!(
            Configuration::from_vars(vars).unwrap_err(),
            ConfigError::Empty("METRICS_NAME_EMPTY".to_string())
        );
    }

    proptest! {
        #[test]
        fn metric_count_bounds(n in 0usize..12) {
            let result = Configuration::from_vars(with_metrics(n));
            if (MIN_METRICS..=MAX_METRICS).contains(&n) {
                prop_assert_eq!(result.unwrap().metrics().len(), n);
            } else {
                prop_assert_eq!(result.unwrap_err(), ConfigError::MetricCount(n));
            }
        }
    }
}
