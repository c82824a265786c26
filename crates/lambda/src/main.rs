use lambda_runtime::service_fn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dashwatch_observability::init();

    lambda_runtime::run(service_fn(dashwatch_lambda::handle))
        .await
        .map_err(anyhow::Error::msg)
}
