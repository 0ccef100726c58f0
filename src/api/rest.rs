// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// Thin transport layer around the signal engine:
//
//   GET  /api/analyze?symbol=BTCUSDT   — fetch candles, run the engine
//   GET  /api/v1/health                — liveness probe
//   GET  /api/v1/config                — current engine parameters
//   POST /api/v1/config                — partial parameter update (hot reload)
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::engine::SignalEngine;

/// Path where parameter updates are persisted.
const CONFIG_PATH: &str = "engine_config.json";

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/analyze", get(analyze))
        .route("/api/v1/health", get(health))
        .route("/api/v1/config", get(get_config))
        .route("/api/v1/config", post(update_config))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Analyze
// =============================================================================

#[derive(Deserialize)]
struct AnalyzeParams {
    symbol: Option<String>,
}

/// Fetch the latest candles for the requested symbol and run the signal
/// engine over them.
///
/// Engine errors (short series, bad parameters) are deterministic client-side
/// conditions and map to 422; upstream fetch failures map to 502.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> impl IntoResponse {
    let config = state.config.read().clone();
    let symbol = params
        .symbol
        .unwrap_or_else(|| config.default_symbol.clone())
        .to_uppercase();

    let candles = match state
        .client
        .fetch_klines(&symbol, &config.interval, config.candle_limit)
        .await
    {
        Ok(candles) => candles,
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "kline fetch failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": "analysis failed",
                    "details": e.to_string(),
                })),
            )
                .into_response();
        }
    };

    match SignalEngine::analyze(&symbol, &candles, &config) {
        Ok(signal) => {
            info!(
                symbol = %symbol,
                direction = %signal.direction,
                confidence = signal.confidence,
                "analysis complete"
            );
            Json(signal).into_response()
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "engine rejected input");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": "analysis failed",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "state_version": state.current_state_version(),
        "server_time": chrono::Utc::now().timestamp_millis(),
    }))
}

// =============================================================================
// Config
// =============================================================================

async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.config.read().clone();
    Json(config)
}

/// Partial update: only the fields present in the request body change.
#[derive(Deserialize, Default)]
struct ConfigUpdate {
    #[serde(default)]
    rsi_period: Option<usize>,
    #[serde(default)]
    ema_period: Option<usize>,
    #[serde(default)]
    structure_window: Option<usize>,
    #[serde(default)]
    sl_pct: Option<f64>,
    #[serde(default)]
    tp_pct: Option<f64>,
    #[serde(default)]
    rsi_oversold: Option<f64>,
    #[serde(default)]
    rsi_overbought: Option<f64>,
    #[serde(default)]
    rsi_confidence_long: Option<f64>,
    #[serde(default)]
    rsi_confidence_short: Option<f64>,
    #[serde(default)]
    confidence_high: Option<u8>,
    #[serde(default)]
    confidence_low: Option<u8>,
    #[serde(default)]
    default_symbol: Option<String>,
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    candle_limit: Option<u32>,
}

async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // Apply the update to a copy first so a rejected value never leaves a
    // half-applied config behind.
    let mut candidate = state.config.read().clone();
    let mut changes = Vec::new();

    macro_rules! apply_field {
        ($field:ident) => {
            if let Some(val) = update.$field {
                changes.push(format!(
                    "{}: {:?} -> {:?}",
                    stringify!($field),
                    candidate.$field,
                    val
                ));
                candidate.$field = val;
            }
        };
    }

    apply_field!(rsi_period);
    apply_field!(ema_period);
    apply_field!(structure_window);
    apply_field!(sl_pct);
    apply_field!(tp_pct);
    apply_field!(rsi_oversold);
    apply_field!(rsi_overbought);
    apply_field!(rsi_confidence_long);
    apply_field!(rsi_confidence_short);
    apply_field!(confidence_high);
    apply_field!(confidence_low);
    apply_field!(default_symbol);
    apply_field!(interval);
    apply_field!(candle_limit);

    if let Err(e) = candidate.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "invalid configuration",
                "details": e.to_string(),
            })),
        ));
    }

    if !changes.is_empty() {
        info!(changes = ?changes, "engine config updated");
        *state.config.write() = candidate.clone();
        state.increment_version();

        // Persist best-effort; the in-memory config is already live.
        if let Err(e) = candidate.save(CONFIG_PATH) {
            warn!(error = %e, "failed to persist engine config");
        }
    }

    Ok(Json(candidate))
}
