use tracing::{info, warn};

use portfolio_api::config::{mask_secret, AppConfig};
use portfolio_api::logger;
use portfolio_api::server::ApiServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let config = AppConfig::from_env();
    log_credential_status(&config);

    let (server, handle) = ApiServer::start(config).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    server.stop();
    handle.await?;

    Ok(())
}

fn log_credential_status(config: &AppConfig) {
    match config.google_api_key() {
        Some(key) => info!("Google API key configured: {}", mask_secret(key)),
        None => warn!("GOOGLE_API_KEY not set; generation endpoints will fail closed"),
    }
    match config.telegram_credentials() {
        Some((token, _)) => info!("Telegram bot token configured: {}", mask_secret(token)),
        None => warn!("Telegram credentials not set; contact endpoint will fail closed"),
    }
}
