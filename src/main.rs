//! # StudyBuddy Bot Main Entry Point
//!
//! Initializes logging, loads configuration, opens the record store,
//! starts the daily reminder job, and runs the Telegram dispatcher and
//! the liveness HTTP server side by side.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studybuddy_bot::bot::handlers::BotHandler;
use studybuddy_bot::config::Config;
use studybuddy_bot::services::health::HealthService;
use studybuddy_bot::services::reminder::ReminderService;
use studybuddy_bot::store::RecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studybuddy_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing bot token is fatal here
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting StudyBuddy Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Data file: {}, HTTP Port: {}",
        config.data_file, config.http_port
    );

    // Open the record store (never fatal; a bad file means empty store)
    let store = RecordStore::load(&config.data_file);

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(store.clone());

    // Initialize and start reminder service
    let mut reminder_service = match ReminderService::new(bot.clone(), store.clone()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create reminder service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reminder service: {}", e));
        }
    };

    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
    } else {
        info!("Reminder service started successfully");
    }

    // Initialize liveness service
    let health_service = HealthService::new(store.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Liveness server starting on port {}", config.http_port);

    // Run both the bot and the liveness server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Liveness server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Liveness task error: {}", e);
            }
        }
    }

    // Stop reminder service on shutdown
    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
