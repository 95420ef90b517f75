use creamlab_relay::config::RelayConfig;
use creamlab_relay::services::metrics::init_metrics;
use creamlab_relay::startup::Application;
use dotenvy::dotenv;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing; spans are exported only when a collector is configured
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("creamlab-relay", "info", otlp_endpoint.as_deref());

    init_metrics();

    let config = RelayConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
