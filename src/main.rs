mod config;
mod dispatcher;
mod error;
mod handlers;
mod platform;
mod relay;
mod response;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::platform::telegram::TelegramClient;
use crate::server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,snake4d_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Game: {}", config.game.short_name);
    info!("  Game URL: {}", config.game.url);
    info!("  Listen address: {}", config.server.listen_addr);

    // Requests will answer 500 until these are provided
    let missing = config.missing_settings();
    if !missing.is_empty() {
        warn!("Not configured: {}", missing.join(", "));
    }

    let client = TelegramClient::new(&config.telegram, config.request_timeout())?;

    if let (Some(webhook_url), Some(_)) = (&config.telegram.webhook_url, config.bot_token()) {
        if let Err(e) = client.register_webhook(webhook_url).await {
            warn!("Failed to register webhook: {}", e);
        }
    }

    let state = Arc::new(AppState::new(config, Arc::new(client)));

    info!("Bot is ready to process events...");
    server::run(state).await?;

    Ok(())
}
