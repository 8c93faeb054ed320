mod bot;
mod config;
mod health;
mod markdown;
mod platform;
mod probe;
mod stream;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::StreamBot;
use crate::config::Config;
use crate::platform::EventHandler;
use crate::probe::FfprobeChecker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,streamcheck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config.apply_env_overrides()?;
    config.validate()?;

    let health_addr = config.health.socket_addr()?;

    info!("Configuration loaded successfully");
    info!("  Probe: {} {:?}", config.probe.program, config.probe.args);
    info!("  Probe timeout: {}s", config.probe.timeout_secs);
    info!("  Health: {}", health_addr);
    info!("  Allowed users: {:?}", config.telegram.allowed_user_ids);

    let checker = FfprobeChecker::from_config(&config.probe);
    checker.check_available().await;

    // Health endpoint runs independently of the bot
    tokio::spawn(async move {
        if let Err(e) = health::serve(health_addr).await {
            error!("Health server stopped: {:#}", e);
        }
    });

    let handler: Arc<dyn EventHandler> = Arc::new(StreamBot::new(checker));
    let bot = Bot::new(&config.telegram.bot_token);

    info!("Bot is starting...");
    platform::telegram::run(bot, handler, config.telegram.allowed_user_ids).await?;

    Ok(())
}
