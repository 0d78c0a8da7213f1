use anyhow::Result;
use invoice_tracker::config::AppConfig;
use invoice_tracker::core::InvoiceService;
use invoice_tracker::server::ServerBuilder;
use invoice_tracker::{storage, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.database.backend,
        "starting invoice-tracker"
    );

    let store = storage::open(&config.database).await?;
    let service = InvoiceService::from_arc(store);

    ServerBuilder::new()
        .with_service(service)
        .serve(&config.server.address())
        .await
}
