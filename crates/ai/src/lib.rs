//! `dashwatch-ai`
//!
//! **Responsibility:** the single inference round trip of an invocation.
//!
//! - Builds the request: fixed system instruction + one user turn holding a
//!   label and a CSV attachment per metric.
//! - Sends it through an `InferenceClient` (Bedrock in production).
//! - Extracts the report text from whatever came back.
//!
//! The model is never asked twice: no retry, no streaming.

pub mod client;
pub mod prompt;
pub mod report;
pub mod request;
pub mod result;

pub use client::{InferenceClient, ScriptedInferenceClient};
pub use report::ReportGenerator;
pub use request::{ContentBlock, InferenceParams, InferenceRequest};
pub use result::{AiError, AnalysisReport, InferenceOutput, OutputBlock};
