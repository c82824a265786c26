//! Bedrock Runtime `Converse` adapter.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::BuildError;
use aws_sdk_bedrockruntime::operation::converse::ConverseOutput as ConverseResponse;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{
    ContentBlock as SdkContentBlock, ConversationRole, ConverseOutput, DocumentBlock, DocumentFormat,
    DocumentSource, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::{debug, instrument};

use dashwatch_ai::{AiError, ContentBlock, InferenceClient, InferenceOutput, InferenceParams, InferenceRequest, OutputBlock};

use crate::error::{InfraError, Service};

#[derive(Debug, Clone)]
pub struct BedrockInferenceClient {
    client: Client,
}

impl BedrockInferenceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl InferenceClient for BedrockInferenceClient {
    #[instrument(skip_all, fields(model_id = %request.model_id))]
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceOutput, AiError> {
        let response = self
            .client
            .converse()
            .model_id(&request.model_id)
            .system(SystemContentBlock::Text(request.system.clone()))
            .messages(user_message(&request.user_turn)?)
            .inference_config(inference_config(&request.params))
            .send()
            .await
            .map_err(|e| InfraError::call(Service::Bedrock, e))?;

        debug!(stop_reason = ?response.stop_reason(), "model responded");
        Ok(to_output(&response))
    }
}

fn user_message(turn: &[ContentBlock]) -> Result<Message, InfraError> {
    let build = |e: BuildError| InfraError::build(Service::Bedrock, e);

    let content = turn
        .iter()
        .map(|block| match block {
            ContentBlock::Text(text) => Ok(SdkContentBlock::Text(text.clone())),
            ContentBlock::Document(doc) => DocumentBlock::builder()
                .name(doc.name().as_str())
                .format(DocumentFormat::Csv)
                .source(DocumentSource::Bytes(Blob::new(doc.content().to_vec())))
                .build()
                .map(SdkContentBlock::Document)
                .map_err(build),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Message::builder()
        .role(ConversationRole::User)
        .set_content(Some(content))
        .build()
        .map_err(build)
}

fn inference_config(params: &InferenceParams) -> InferenceConfiguration {
    InferenceConfiguration::builder()
        .max_tokens(params.max_tokens)
        .temperature(params.temperature)
        .set_stop_sequences(Some(params.stop_sequences.clone()))
        .build()
}

fn to_output(response: &ConverseResponse) -> InferenceOutput {
    match response.output() {
        Some(ConverseOutput::Message(message)) => {
            InferenceOutput::Message(message.content().iter().map(to_output_block).collect())
        }
        _ => InferenceOutput::Unknown,
    }
}

fn to_output_block(block: &SdkContentBlock) -> OutputBlock {
    match block {
        SdkContentBlock::Text(text) => OutputBlock::Text(text.clone()),
        SdkContentBlock::ToolUse(_) => OutputBlock::Other("toolUse".to_string()),
        SdkContentBlock::Image(_) => OutputBlock::Other("image".to_string()),
        SdkContentBlock::Document(_) => OutputBlock::Other("document".to_string()),
        _ => OutputBlock::Other("unknown".to_string()),
    }
}
