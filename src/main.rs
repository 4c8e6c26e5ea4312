use std::sync::Arc;

use deckmoor_backend::{api, config::AppConfig, external::ScryfallClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // Initialize upstream client
    let client = ScryfallClient::new(config.scryfall_base_url.clone(), config.upstream_timeout)?;

    let addr = config.bind_addr()?;
    tracing::info!("Upstream card search: {}", client.base_url());
    tracing::info!("Allowed origins: {}", config.allowed_origins.join(", "));
    tracing::info!(
        "Page sizes: caller {} / upstream {}",
        config.page_sizes.caller_page_size,
        config.page_sizes.upstream_page_size
    );

    let app = api::router(api::AppState::new(config, Arc::new(client)));

    tracing::info!("🚀 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
