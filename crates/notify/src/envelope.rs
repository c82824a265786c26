use serde::{Deserialize, Serialize};

use crate::publisher::NotifyError;

pub const ENVELOPE_VERSION: &str = "1.0";
pub const ENVELOPE_SOURCE: &str = "custom";
/// Heading prepended to every report.
pub const REPORT_PREFIX: &str = "*Daily Dashboard Analyzer*\n";

/// Custom-notification envelope understood by the chat relay subscribed to the topic.
///
/// Serialized as `{"version":..,"source":..,"content":{"description":..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    version: String,
    source: String,
    content: EnvelopeContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeContent {
    description: String,
}

impl NotificationEnvelope {
    pub fn for_report(text: &str) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            source: ENVELOPE_SOURCE.to_string(),
            content: EnvelopeContent {
                description: format!("{REPORT_PREFIX}{text}"),
            },
        }
    }

    pub fn description(&self) -> &str {
        &self.content.description
    }

    pub fn to_json(&self) -> Result<String, NotifyError> {
        serde_json::to_string(self).map_err(|e| NotifyError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_fixed_shape() {
        let envelope = NotificationEnvelope::for_report("- no abnormality");
        let value: serde_json::Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "version": "1.0",
                "source": "custom",
                "content": { "description": "*Daily Dashboard Analyzer*\n- no abnormality" }
            })
        );
    }

    #[test]
    fn empty_report_keeps_the_heading() {
        let envelope = NotificationEnvelope::for_report("");
        assert_eq!(envelope.description(), REPORT_PREFIX);
    }
}
