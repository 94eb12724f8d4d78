mod api;
mod app;
mod auth;
mod config;
mod db;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::Result;

use auth::TokenSigner;
use services::{ImageStore, TelegramClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting mechlink backend"
    );

    // Create database pool (runs migrations)
    let pool = db::create_pool(&settings).await?;

    // Session token signer
    let token_signer = TokenSigner::new(&settings.jwt_secret, settings.jwt_ttl_seconds);

    // Image store for uploads
    let image_store = ImageStore::new(&settings.upload_dir, &settings.upload_public_base_url);
    if let Err(e) = image_store.validate().await {
        tracing::warn!(error = %e, "Image store validation failed - uploads may not work");
    }

    // Telegram lead notifications (optional)
    let telegram = match (&settings.telegram_bot_token, &settings.telegram_chat_id) {
        (Some(token), Some(chat_id)) => {
            tracing::info!("Telegram lead notifications enabled");
            Some(TelegramClient::new(token, chat_id)?)
        }
        _ => {
            tracing::info!("Telegram lead notifications disabled (no credentials)");
            None
        }
    };

    // Create application state
    let state = app::AppState::new(pool, settings.clone(), token_signer, image_store, telegram);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
