// Receipt Processor - Web Server
// In-memory receipt scoring API

use anyhow::Result;
use receipt_processor::{AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "receipt_processor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        version = receipt_processor::VERSION,
        max_body_bytes = config.max_body_bytes,
        cors = config.enable_cors,
        "starting receipt processor"
    );

    receipt_processor::serve(AppState::in_memory(), config).await
}
