//! Serve command - runs the player API until Ctrl+C

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use zikir::config::Config;
use zikir::gamification::NotificationSelector;
use zikir::server::{ApiState, HttpServer};
use zikir::store::PlayerStore;

pub async fn serve_command(config_override: Option<&Path>, port: Option<u16>) -> Result<()> {
    let config = Config::load_from(config_override)?;

    // Bad reward tables stop us before the port is taken
    let engine = config
        .build_engine()
        .context("Invalid reward configuration")?;
    info!(
        "[zikir:config] Loaded {} levels, {} badges, {} milestones",
        engine.levels().len(),
        engine.badges().len(),
        engine.milestones().len()
    );

    let db_path = config.database_path();
    let store = PlayerStore::open(&db_path)?;
    info!("[zikir:store] Using database {}", db_path.display());

    let state = ApiState {
        engine: Arc::new(engine),
        store,
        selector: NotificationSelector::default(),
        special_status_level: config.rewards.special_status_level,
        auth_token: config.http_token(),
    };

    let port = port.unwrap_or(config.settings.server.http_port);
    let handle = HttpServer::bind(&format!("127.0.0.1:{port}"), state)?.spawn();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    info!("[zikir:http] Shutting down");

    tokio::task::spawn_blocking(move || handle.shutdown())
        .await
        .context("Server shutdown task failed")?;

    Ok(())
}
