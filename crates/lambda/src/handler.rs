use lambda_runtime::LambdaEvent;
use tracing::{Instrument, error, info, info_span, warn};

use dashwatch_ai::ReportGenerator;
use dashwatch_core::config::process_vars;
use dashwatch_core::{Clock, Configuration, InvocationId, SystemClock};
use dashwatch_infra::{AwsServiceFactory, ServiceFactory, Services};
use dashwatch_metrics::MetricsFetcher;
use dashwatch_notify::Notifier;

use crate::error::InvocationError;

/// Lambda entry point. The event payload carries nothing we read.
pub async fn handle(event: LambdaEvent<serde_json::Value>) -> Result<String, lambda_runtime::Error> {
    let request_id = event.context.request_id;
    let report = invoke(&AwsServiceFactory, &SystemClock, process_vars())
        .instrument(info_span!("lambda", request_id = %request_id))
        .await?;
    Ok(report)
}

/// Run one invocation against `factory`'s services, reading configuration from `vars`.
///
/// Steps run strictly in order and the first failure aborts. Returns the report
/// text, which is also what was published.
pub async fn invoke<F, C, I, K, V>(factory: &F, clock: &C, vars: I) -> Result<String, InvocationError>
where
    F: ServiceFactory,
    C: Clock,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let span = info_span!("invocation", invocation_id = %InvocationId::new());
    let config = span.in_scope(|| {
        info!("initializing function");
        Configuration::from_vars(vars)
    })?;

    run(factory, clock, &config).instrument(span).await
}

async fn run<F, C>(factory: &F, clock: &C, config: &Configuration) -> Result<String, InvocationError>
where
    F: ServiceFactory,
    C: Clock,
{
    let Services {
        store,
        query,
        inference,
        publisher,
    } = factory.connect(config).await.inspect_err(|e| {
        error!(error = %e, "unable to set up service clients");
    })?;

    let fetcher = MetricsFetcher::new(store, query, clock);
    let report = ReportGenerator::new(inference, config.model_id())
        .generate(&fetcher, config.metrics())
        .await
        .inspect_err(|e| {
            error!(error = %e, "error invoking the model");
        })?;

    if !report.is_recognized() {
        warn!("model output was not recognized; publishing an empty report");
    }

    Notifier::new(publisher, config.topic())
        .notify(report.text())
        .await
        .inspect_err(|e| {
            error!(error = %e, "error sending message to topic");
        })?;

    info!(report = %report.text(), "report generated");
    info!("function completed successfully");
    Ok(report.into_text())
}
