use std::sync::{Arc, Mutex};

use crate::request::InferenceRequest;
use crate::result::{AiError, InferenceOutput};

/// A hosted model endpoint.
///
/// One call is one synchronous request/response exchange.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceOutput, AiError>;
}

#[async_trait::async_trait]
impl<T: InferenceClient + ?Sized> InferenceClient for Arc<T> {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceOutput, AiError> {
        (**self).converse(request).await
    }
}

#[derive(Debug, Clone)]
enum Script {
    Reply(InferenceOutput),
    Fail(String),
}

/// Client that answers every request the same way and records what it was sent.
///
/// Intended for tests/dev.
#[derive(Debug)]
pub struct ScriptedInferenceClient {
    script: Script,
    requests: Mutex<Vec<InferenceRequest>>,
}

impl ScriptedInferenceClient {
    pub fn replying(output: InferenceOutput) -> Self {
        Self {
            script: Script::Reply(output),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a single text segment reply.
    pub fn replying_text(text: impl Into<String>) -> Self {
        Self::replying(InferenceOutput::text(text))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl InferenceClient for ScriptedInferenceClient {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceOutput, AiError> {
        self.requests
            .lock()
            .map_err(|_| AiError::InferenceFailed("lock poisoned".to_string()))?
            .push(request.clone());

        match &self.script {
            Script::Reply(output) => Ok(output.clone()),
            Script::Fail(message) => Err(AiError::InferenceFailed(message.clone())),
        }
    }
}
