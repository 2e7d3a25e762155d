use anyhow::Context;
use placid_service::config::get_configuration;
use placid_service::startup::Application;
use service_core::config::load_dotenv;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv("placid-service");

    let settings = get_configuration().context("Failed to read configuration")?;

    init_tracing(
        "placid-service",
        &settings.logging.level,
        settings.logging.otlp_endpoint.as_deref(),
    )?;

    let app = Application::build(settings).await?;
    app.run_until_stopped().await
}
