use tracing::{error, info, instrument};

use dashwatch_core::MetricId;
use dashwatch_metrics::DocumentSource;

use crate::client::InferenceClient;
use crate::prompt::SYSTEM_INSTRUCTION;
use crate::request::{InferenceParams, InferenceRequest};
use crate::result::{AiError, AnalysisReport};

/// Collects one document per metric and asks the model for the report.
#[derive(Debug, Clone)]
pub struct ReportGenerator<C> {
    client: C,
    model_id: String,
    system: String,
    params: InferenceParams,
}

impl<C: InferenceClient> ReportGenerator<C> {
    pub fn new(client: C, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            system: SYSTEM_INSTRUCTION.to_string(),
            params: InferenceParams::default(),
        }
    }

    /// Fetch every metric in order, then make exactly one inference call.
    ///
    /// The first document failure aborts before the model is invoked. An
    /// unrecognized response is not an error: the report comes back empty and
    /// flagged (see [`AnalysisReport::is_recognized`]).
    #[instrument(skip_all, fields(model_id = %self.model_id, metrics = metrics.len()))]
    pub async fn generate<S>(&self, source: &S, metrics: &[MetricId]) -> Result<AnalysisReport, AiError>
    where
        S: DocumentSource + ?Sized,
    {
        if metrics.is_empty() {
            return Err(AiError::InvalidRequest("no metrics to analyze".to_string()));
        }

        info!("conversing with the model");

        let mut documents = Vec::with_capacity(metrics.len());
        for metric in metrics {
            let document = source.document(metric).await.map_err(|e| {
                error!(metric = %metric, error = %e, "error getting metrics data");
                AiError::Document {
                    metric: metric.clone(),
                    source: e,
                }
            })?;
            documents.push(document);
        }

        let request = InferenceRequest::new(
            self.model_id.as_str(),
            self.system.as_str(),
            documents,
            self.params.clone(),
        );

        let output = self.client.converse(&request).await.inspect_err(|e| {
            error!(error = %e, "failed to invoke model");
        })?;

        Ok(AnalysisReport::from_output(&output))
    }
}
