// =============================================================================
// Helios Signal — Main Entry Point
// =============================================================================
//
// A small analysis service: fetches recent candles for a symbol on demand and
// serves the signal engine's recommendation over HTTP. The engine itself is a
// pure function; everything in this file is plumbing around it.
// =============================================================================

mod api;
mod app_state;
mod binance;
mod engine;
mod engine_config;
mod error;
mod indicators;
mod series;
mod structure;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::binance::BinanceClient;
use crate::engine_config::EngineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::load("engine_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        EngineConfig::default()
    });

    info!(
        rsi_period = config.rsi_period,
        ema_period = config.ema_period,
        structure_window = config.structure_window,
        interval = %config.interval,
        "engine parameters"
    );

    let state = Arc::new(AppState::new(config, BinanceClient::new()));

    let bind_addr = std::env::var("HELIOS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("shutdown signal received — stopping");
        })
        .await?;

    info!("helios-signal shut down complete");
    Ok(())
}
