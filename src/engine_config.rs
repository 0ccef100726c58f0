// =============================================================================
// Engine Configuration — Hot-reloadable signal parameters with atomic save
// =============================================================================
//
// Every tunable of the signal engine lives here so the service can be
// reconfigured at runtime without a restart. All fields carry serde defaults
// so that loading an older config file never breaks when fields are added.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EngineError;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_rsi_period() -> usize {
    14
}

fn default_ema_period() -> usize {
    21
}

fn default_structure_window() -> usize {
    5
}

fn default_sl_pct() -> f64 {
    0.015
}

fn default_tp_pct() -> f64 {
    0.015
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_confidence_long() -> f64 {
    40.0
}

fn default_rsi_confidence_short() -> f64 {
    60.0
}

fn default_confidence_high() -> u8 {
    85
}

fn default_confidence_low() -> u8 {
    65
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_interval() -> String {
    "1h".to_string()
}

fn default_candle_limit() -> u32 {
    100
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Tunable parameters for the signal engine plus the thin fetch layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Indicator periods ---------------------------------------------------

    /// Look-back period for the RSI calculator.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Look-back period for the EMA calculator.
    #[serde(default = "default_ema_period")]
    pub ema_period: usize,

    /// Number of trailing closes (excluding the latest) inspected for a
    /// break of structure / change of character.
    #[serde(default = "default_structure_window")]
    pub structure_window: usize,

    // --- Price levels --------------------------------------------------------

    /// Stop-loss distance as a fraction of the entry price.
    #[serde(default = "default_sl_pct")]
    pub sl_pct: f64,

    /// Take-profit distance as a fraction of the entry price.
    #[serde(default = "default_tp_pct")]
    pub tp_pct: f64,

    // --- RSI zone thresholds -------------------------------------------------

    /// RSI below this reads as oversold.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    /// RSI above this reads as overbought.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// LONG signals earn the high confidence tier only below this RSI.
    #[serde(default = "default_rsi_confidence_long")]
    pub rsi_confidence_long: f64,

    /// SHORT signals earn the high confidence tier only above this RSI.
    #[serde(default = "default_rsi_confidence_short")]
    pub rsi_confidence_short: f64,

    // --- Confidence tiers ----------------------------------------------------

    /// Confidence score when direction and RSI/EMA context align.
    #[serde(default = "default_confidence_high")]
    pub confidence_high: u8,

    /// Confidence score for a plain structural signal.
    #[serde(default = "default_confidence_low")]
    pub confidence_low: u8,

    // --- Fetch layer ---------------------------------------------------------

    /// Symbol analyzed when the request does not name one.
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    /// Kline interval requested from the market-data provider.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Number of candles fetched per analysis.
    #[serde(default = "default_candle_limit")]
    pub candle_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            ema_period: default_ema_period(),
            structure_window: default_structure_window(),
            sl_pct: default_sl_pct(),
            tp_pct: default_tp_pct(),
            rsi_oversold: default_rsi_oversold(),
            rsi_overbought: default_rsi_overbought(),
            rsi_confidence_long: default_rsi_confidence_long(),
            rsi_confidence_short: default_rsi_confidence_short(),
            confidence_high: default_confidence_high(),
            confidence_low: default_confidence_low(),
            default_symbol: default_symbol(),
            interval: default_interval(),
            candle_limit: default_candle_limit(),
        }
    }
}

impl EngineConfig {
    /// Check every parameter for internal consistency.
    ///
    /// Called when a config file is loaded and when parameters are updated
    /// over the API, so a bad value is rejected before it reaches the engine.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rsi_period == 0 {
            return Err(EngineError::invalid("rsi_period", self.rsi_period));
        }
        if self.ema_period == 0 {
            return Err(EngineError::invalid("ema_period", self.ema_period));
        }
        if self.structure_window == 0 {
            return Err(EngineError::invalid(
                "structure_window",
                self.structure_window,
            ));
        }
        if self.sl_pct <= 0.0 || !self.sl_pct.is_finite() {
            return Err(EngineError::invalid("sl_pct", self.sl_pct));
        }
        if self.tp_pct <= 0.0 || !self.tp_pct.is_finite() {
            return Err(EngineError::invalid("tp_pct", self.tp_pct));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(EngineError::invalid("rsi_oversold", self.rsi_oversold));
        }
        if self.candle_limit == 0 {
            return Err(EngineError::invalid("candle_limit", self.candle_limit));
        }
        Ok(())
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("engine config at {} is invalid", path.display()))?;

        info!(
            path = %path.display(),
            rsi_period = config.rsi_period,
            ema_period = config.ema_period,
            structure_window = config.structure_window,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise engine config")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
