use serde::{Deserialize, Serialize};

use dashwatch_core::{MetricId, TabularDocument};

pub const MAX_TOKENS: i32 = 4000;
pub const TEMPERATURE: f32 = 0.1;
/// Stops generation if the model starts writing a new human turn.
pub const STOP_SEQUENCE: &str = "\n\nHuman:";

/// Generation parameters sent with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceParams {
    pub max_tokens: i32,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self {
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stop_sequences: vec![STOP_SEQUENCE.to_string()],
        }
    }
}

/// One segment of the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Text(String),
    /// CSV attachment, named after its metric.
    Document(TabularDocument),
}

/// Text placed before each metric's attachment.
pub fn document_label(metric: &MetricId) -> String {
    format!("This document contains {metric}")
}

/// A complete Converse-style request: system instruction, one user turn, parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub model_id: String,
    pub system: String,
    pub user_turn: Vec<ContentBlock>,
    pub params: InferenceParams,
}

impl InferenceRequest {
    /// Build the user turn as `label, document` pairs, in document order.
    pub fn new(
        model_id: impl Into<String>,
        system: impl Into<String>,
        documents: Vec<TabularDocument>,
        params: InferenceParams,
    ) -> Self {
        let user_turn = documents
            .into_iter()
            .flat_map(|doc| [ContentBlock::Text(document_label(doc.name())), ContentBlock::Document(doc)])
            .collect();

        Self {
            model_id: model_id.into(),
            system: system.into(),
            user_turn,
            params,
        }
    }

    pub fn documents(&self) -> impl Iterator<Item = &TabularDocument> {
        self.user_turn.iter().filter_map(|block| match block {
            ContentBlock::Document(doc) => Some(doc),
            ContentBlock::Text(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> TabularDocument {
        TabularDocument::new(MetricId::new(name).unwrap(), b"timestamp,value\n".to_vec())
    }

    #[test]
    fn user_turn_alternates_label_and_document() {
        let request = InferenceRequest::new(
            "model",
            "system",
            vec![doc("ALB_REQUESTS"), doc("ECS_CPU")],
            InferenceParams::default(),
        );

        assert_eq!(
            request.user_turn,
            vec![
                ContentBlock::Text("This document contains ALB_REQUESTS".into()),
                ContentBlock::Document(doc("ALB_REQUESTS")),
                ContentBlock::Text("This document contains ECS_CPU".into()),
                ContentBlock::Document(doc("ECS_CPU")),
            ]
        );
        assert_eq!(request.documents().count(), 2);
    }

    #[test]
    fn default_params_match_fixed_generation_settings() {
        let params = InferenceParams::default();
        assert_eq!(params.max_tokens, 4000);
        assert!((params.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(params.stop_sequences, vec!["\n\nHuman:".to_string()]);
    }
}
