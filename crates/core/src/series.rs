//! Time series returned by the monitoring service and their tabular rendering.

use chrono::{DateTime, Days, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::MetricId;

/// Header row of every tabular document.
pub const CSV_HEADER: [&str; 2] = ["timestamp", "value"];

/// Offset timestamps are rendered in (UTC+09:00).
pub const REPORT_UTC_OFFSET_SECS: i32 = 9 * 60 * 60;

fn report_offset() -> DomainResult<FixedOffset> {
    FixedOffset::east_opt(REPORT_UTC_OFFSET_SECS)
        .ok_or_else(|| DomainError::validation("report offset out of range"))
}

/// Closed query window `[start, end]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window ending at `end` and starting `lookback_days` calendar days before it.
    pub fn ending_at(end: DateTime<Utc>, lookback_days: u32) -> DomainResult<Self> {
        let start = end
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .ok_or_else(|| DomainError::validation("lookback window starts before the representable range"))?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// One datapoint.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Ordered samples, in the order the monitoring service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Zip the parallel timestamp/value columns of a query result.
    pub fn from_columns(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> DomainResult<Self> {
        if timestamps.len() != values.len() {
            return Err(DomainError::malformed_series(format!(
                "{} timestamps but {} values",
                timestamps.len(),
                values.len()
            )));
        }

        Ok(Self::new(
            timestamps
                .into_iter()
                .zip(values)
                .map(|(timestamp, value)| Sample { timestamp, value })
                .collect(),
        ))
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Render as `timestamp,value` CSV, one row per sample, timestamps in UTC+09:00.
    pub fn to_document(&self, metric: &MetricId) -> DomainResult<TabularDocument> {
        let offset = report_offset()?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(CSV_HEADER)
            .map_err(|e| DomainError::Encoding(e.to_string()))?;
        for sample in &self.samples {
            let timestamp = sample
                .timestamp
                .with_timezone(&offset)
                .to_rfc3339_opts(SecondsFormat::Secs, false);
            writer
                .write_record([timestamp, sample.value.to_string()])
                .map_err(|e| DomainError::Encoding(e.to_string()))?;
        }

        let content = writer
            .into_inner()
            .map_err(|e| DomainError::Encoding(e.to_string()))?;

        Ok(TabularDocument {
            name: metric.clone(),
            content,
        })
    }
}

/// A named CSV document attached to the inference request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularDocument {
    name: MetricId,
    content: Vec<u8>,
}

impl TabularDocument {
    pub fn new(name: MetricId, content: Vec<u8>) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &MetricId {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Number of CSV rows, header included.
    pub fn row_count(&self) -> usize {
        self.content.split(|b| *b == b'\n').filter(|row| !row.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn metric() -> MetricId {
        MetricId::new("ALB_TARGET_RESPONSE_TIME").unwrap()
    }

    #[test]
    fn window_spans_exact_calendar_days() {
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        let window = TimeWindow::ending_at(end, 3).unwrap();

        assert_eq!(window.end(), end);
        // 2024 is a leap year: 3 days before March 1st is February 27th.
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2024, 2, 27, 6, 30, 0).unwrap());
    }

    #[test]
    fn renders_header_and_rows_in_utc_plus_nine() {
        let series = TimeSeries::from_columns(
            vec![
                Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 1, 15, 5, 0).unwrap(),
            ],
            vec![0.25, 12.0],
        )
        .unwrap();

        let doc = series.to_document(&metric()).unwrap();

        assert_eq!(doc.name(), &metric());
        assert_eq!(
            String::from_utf8(doc.content().to_vec()).unwrap(),
            "timestamp,value\n2024-05-02T00:00:00+09:00,0.25\n2024-05-02T00:05:00+09:00,12\n"
        );
        assert_eq!(doc.row_count(), 3);
    }

    #[test]
    fn empty_series_is_header_only() {
        let doc = TimeSeries::default().to_document(&metric()).unwrap();
        assert_eq!(doc.content(), b"timestamp,value\n");
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let err = TimeSeries::from_columns(vec![Utc::now()], vec![]).unwrap_err();
        assert!(matches!(err, DomainError::MalformedSeries(_)));
    }

    proptest! {
        #[test]
        fn window_start_is_end_minus_days(secs in 0i64..4_000_000_000, days in 1u32..400) {
            let end = Utc.timestamp_opt(secs, 0).unwrap();
            let window = TimeWindow::ending_at(end, days).unwrap();
            prop_assert_eq!(window.end(), end);
            prop_assert_eq!(window.end() - window.start(), chrono::Duration::days(i64::from(days)));
        }

        #[test]
        fn document_has_one_row_per_sample_plus_header(
            points in proptest::collection::vec((0i64..4_000_000_000, -1.0e9f64..1.0e9), 0..200)
        ) {
            let series = TimeSeries::new(
                points
                    .iter()
                    .map(|(s, v)| Sample { timestamp: Utc.timestamp_opt(*s, 0).unwrap(), value: *v })
                    .collect(),
            );
            let doc = series.to_document(&metric()).unwrap();
            let first_line = doc.content().split(|b| *b == b'\n').next().unwrap().to_vec();

            prop_assert_eq!(doc.row_count(), points.len() + 1);
            prop_assert_eq!(first_line, b"timestamp,value".to_vec());
        }

        #[test]
        fn rendering_is_deterministic(
            points in proptest::collection::vec((0i64..4_000_000_000, -1.0e6f64..1.0e6), 0..50)
        ) {
            let series = TimeSeries::new(
                points
                    .iter()
                    .map(|(s, v)| Sample { timestamp: Utc.timestamp_opt(*s, 0).unwrap(), value: *v })
                    .collect(),
            );
            prop_assert_eq!(series.to_document(&metric()).unwrap(), series.to_document(&metric()).unwrap());
        }
    }
}
