use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use dashwatch_core::MetricId;
use dashwatch_metrics::MetricsError;

/// What the inference endpoint answered, reduced to what we read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InferenceOutput {
    /// An assistant message with its content segments.
    Message(Vec<OutputBlock>),
    /// Any output shape the client does not recognize (or no output at all).
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputBlock {
    Text(String),
    /// Non-text segment (tool use, image, ...), kept by kind only.
    Other(String),
}

impl InferenceOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Message(vec![OutputBlock::Text(text.into())])
    }

    /// The first segment of the message, if it is text.
    pub fn first_text(&self) -> Option<&str> {
        match self {
            Self::Message(blocks) => match blocks.first() {
                Some(OutputBlock::Text(text)) => Some(text),
                _ => None,
            },
            Self::Unknown => None,
        }
    }
}

/// Report text extracted from one inference call.
///
/// `recognized` is false when the response had no leading text segment; the
/// text is then empty. Callers still publish it, but can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    text: String,
    recognized: bool,
}

impl AnalysisReport {
    pub fn from_output(output: &InferenceOutput) -> Self {
        match output.first_text() {
            Some(text) => Self {
                text: text.to_string(),
                recognized: true,
            },
            None => {
                match output {
                    InferenceOutput::Message(_) => error!("model output does not start with a text segment"),
                    InferenceOutput::Unknown => error!("failed to get output: unknown response shape"),
                }
                Self {
                    text: String::new(),
                    recognized: false,
                }
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn is_recognized(&self) -> bool {
        self.recognized
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("failed to prepare metric document for {metric}: {source}")]
    Document {
        metric: MetricId,
        #[source]
        source: MetricsError,
    },

    #[error("invalid inference request: {0}")]
    InvalidRequest(String),

    #[error("failed to invoke model: {0}")]
    InferenceFailed(String),
}
