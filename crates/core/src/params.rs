//! Per-metric fetch parameters, as stored in the parameter table.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

pub const NAMESPACE_ATTR: &str = "namespace";
pub const METRIC_NAME_ATTR: &str = "metricName";
pub const DIMENSIONS_ATTR: &str = "dimensions";
pub const LOOKBACK_DAYS_ATTR: &str = "dateRange";
pub const PERIOD_ATTR: &str = "period";
pub const STAT_ATTR: &str = "stat";
pub const UNIT_ATTR: &str = "unit";

/// One `name=value` pair scoping a metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    name: String,
    value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Everything needed to query one metric's time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParams {
    namespace: String,
    metric_name: String,
    dimensions: Vec<Dimension>,
    /// Window length in calendar days (> 0).
    lookback_days: u32,
    /// Aggregation period in seconds (> 0).
    period_secs: i32,
    statistic: String,
    unit: String,
}

impl FetchParams {
    /// Interpret a stored attribute map.
    ///
    /// Expected attributes: `namespace`, `metricName`, `dimensions` (JSON list of
    /// single-key objects), `dateRange`, `period`, `stat`, `unit`.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> DomainResult<Self> {
        let get = |name: &str| attribute(attrs, name);

        Ok(Self {
            namespace: get(NAMESPACE_ATTR)?.to_string(),
            metric_name: get(METRIC_NAME_ATTR)?.to_string(),
            dimensions: parse_dimensions(get(DIMENSIONS_ATTR)?)?,
            lookback_days: parse_positive(LOOKBACK_DAYS_ATTR, get(LOOKBACK_DAYS_ATTR)?)?,
            period_secs: parse_positive(PERIOD_ATTR, get(PERIOD_ATTR)?)?,
            statistic: get(STAT_ATTR)?.to_string(),
            unit: get(UNIT_ATTR)?.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn period_secs(&self) -> i32 {
        self.period_secs
    }

    pub fn statistic(&self) -> &str {
        &self.statistic
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Decode `[{"LoadBalancer": "app/web/123"}, {"TargetGroup": "tg/abc"}]`.
///
/// List order is preserved. An object carrying several keys yields one
/// dimension per key, in key order.
pub fn parse_dimensions(encoded: &str) -> DomainResult<Vec<Dimension>> {
    let decoded: Option<Vec<BTreeMap<String, String>>> = serde_json::from_str(encoded)
        .map_err(|e| DomainError::invalid_attribute(DIMENSIONS_ATTR, e.to_string()))?;

    Ok(decoded
        .unwrap_or_default()
        .into_iter()
        .flat_map(|entry| entry.into_iter().map(|(name, value)| Dimension::new(name, value)))
        .collect())
}

fn attribute<'a>(attrs: &'a HashMap<String, String>, name: &str) -> DomainResult<&'a str> {
    attrs
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| DomainError::missing_attribute(name))
}

fn parse_positive<T>(name: &str, raw: &str) -> DomainResult<T>
where
    T: core::str::FromStr + PartialOrd + Default,
    T::Err: core::fmt::Display,
{
    let value: T = raw
        .parse()
        .map_err(|e: T::Err| DomainError::invalid_attribute(name, e.to_string()))?;
    if value <= T::default() {
        return Err(DomainError::invalid_attribute(name, "must be positive"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn alb_attrs() -> HashMap<String, String> {
        attrs(&[
            ("awsService", "ALB_REQUESTS"),
            (NAMESPACE_ATTR, "AWS/ApplicationELB"),
            (METRIC_NAME_ATTR, "RequestCount"),
            (DIMENSIONS_ATTR, r#"[{"LoadBalancer":"app/web/50dc6c495c0c9188"}]"#),
            (LOOKBACK_DAYS_ATTR, "3"),
            (PERIOD_ATTR, "300"),
            (STAT_ATTR, "Sum"),
            (UNIT_ATTR, "Count"),
        ])
    }

    #[test]
    fn parses_stored_record() {
        let params = FetchParams::from_attributes(&alb_attrs()).unwrap();

        assert_eq!(params.namespace(), "AWS/ApplicationELB");
        assert_eq!(params.metric_name(), "RequestCount");
        assert_eq!(
            params.dimensions(),
            &[Dimension::new("LoadBalancer", "app/web/50dc6c495c0c9188")]
        );
        assert_eq!(params.lookback_days(), 3);
        assert_eq!(params.period_secs(), 300);
        assert_eq!(params.statistic(), "Sum");
        assert_eq!(params.unit(), "Count");
    }

    #[test]
    fn dimension_list_order_is_preserved() {
        let dims = parse_dimensions(r#"[{"TargetGroup":"tg/b"},{"LoadBalancer":"app/a"}]"#).unwrap();
        let names: Vec<&str> = dims.iter().map(Dimension::name).collect();
        assert_eq!(names, vec!["TargetGroup", "LoadBalancer"]);
    }

    #[test]
    fn null_and_empty_dimension_lists_mean_no_dimensions() {
        assert!(parse_dimensions("null").unwrap().is_empty());
        assert!(parse_dimensions("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_dimensions_are_fatal() {
        for bad in ["", "{", r#"{"LoadBalancer":"x"}"#, r#"[{"Port":443}]"#] {
            let err = parse_dimensions(bad).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidAttribute { ref name, .. } if name == DIMENSIONS_ATTR),
                "{bad:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn missing_attribute_is_named() {
        let mut a = alb_attrs();
        a.remove(STAT_ATTR);
        assert_eq!(
            FetchParams::from_attributes(&a).unwrap_err(),
            DomainError::missing_attribute(STAT_ATTR)
        );
    }

    #[test]
    fn non_numeric_or_non_positive_window_and_period_are_fatal() {
        for (attr, raw) in [
            (LOOKBACK_DAYS_ATTR, "three"),
            (LOOKBACK_DAYS_ATTR, "0"),
            (LOOKBACK_DAYS_ATTR, "-2"),
            (PERIOD_ATTR, "5m"),
            (PERIOD_ATTR, "0"),
            (PERIOD_ATTR, "4294967296"),
            (LOOKBACK_DAYS_ATTR, " 3 "),
            (PERIOD_ATTR, "300 "),
        ] {
            let mut a = alb_attrs();
            a.insert(attr.to_string(), raw.to_string());
            let err = FetchParams::from_attributes(&a).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidAttribute { ref name, .. } if name == attr),
                "{attr}={raw} -> {err:?}"
            );
        }
    }
}
