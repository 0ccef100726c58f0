// =============================================================================
// Signal Engine — candle series in, trade recommendation out
// =============================================================================
//
// Pipeline:
//   1. Extract the close series + last close
//   2. Compute RSI (Wilder) and EMA over the closes
//   3. Detect break of structure / change of character on the trailing window
//   4. Fuse the latest values into direction, rationale, confidence and
//      entry/sl/tp1 price levels
//
// The engine is a pure function of its input series plus the configuration:
// no shared state, no I/O, no suspension points. Identical input yields
// byte-identical output.
// =============================================================================

use tracing::debug;

use crate::engine_config::EngineConfig;
use crate::error::EngineError;
use crate::indicators::ema::calculate_ema;
use crate::indicators::rsi::calculate_rsi;
use crate::series::extract_closes;
use crate::structure::detect_structure;
use crate::types::{Candle, Direction, Signal, StructureFlags};

/// Round to 2 decimal places. Applied only at output boundaries so no
/// rounding error accumulates inside the indicator recurrences.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless facade over the signal-generation pipeline.
pub struct SignalEngine;

impl SignalEngine {
    /// Analyze one candle series and produce a trade signal.
    ///
    /// Candles must be ordered oldest-first. Fails fast with a descriptive
    /// error when the series is too short for any configured indicator; no
    /// partial signal is emitted on error.
    pub fn analyze(
        symbol: &str,
        candles: &[Candle],
        config: &EngineConfig,
    ) -> Result<Signal, EngineError> {
        let (closes, last_close) = extract_closes(candles)?;

        let rsi_series = calculate_rsi(&closes, config.rsi_period)?;
        let last_rsi = rsi_series
            .last()
            .copied()
            .ok_or_else(|| EngineError::insufficient("RSI", config.rsi_period + 1, closes.len()))?;

        let ema_series = calculate_ema(&closes, config.ema_period)?;
        let last_ema = ema_series
            .last()
            .copied()
            .ok_or_else(|| EngineError::insufficient("EMA", config.ema_period, closes.len()))?;

        let flags = detect_structure(&closes, config.structure_window)?;

        let signal = Self::synthesize(symbol, last_close, last_rsi, last_ema, flags, config);

        debug!(
            symbol,
            direction = %signal.direction,
            confidence = signal.confidence,
            last_close,
            last_rsi,
            last_ema,
            bos = flags.bos,
            choch = flags.choch,
            "signal synthesized"
        );

        Ok(signal)
    }

    /// Fuse the latest indicator values and structure flags into a signal.
    ///
    /// The rationale lines are appended in a fixed order (EMA context, RSI
    /// zone, structure note) because the order carries meaning to readers of
    /// the output.
    fn synthesize(
        symbol: &str,
        last_close: f64,
        last_rsi: f64,
        last_ema: f64,
        flags: StructureFlags,
        config: &EngineConfig,
    ) -> Signal {
        let mut reason = Vec::new();

        if last_close > last_ema {
            reason.push("price above EMA → bullish context".to_string());
        } else {
            reason.push("price below EMA → bearish context".to_string());
        }

        if last_rsi < config.rsi_oversold {
            reason.push("RSI in oversold zone".to_string());
        } else if last_rsi > config.rsi_overbought {
            reason.push("RSI in overbought zone".to_string());
        } else {
            reason.push(format!("RSI neutral: {:.2}", last_rsi));
        }

        // BOS takes precedence over CHoCH when both fire.
        let direction = if flags.bos {
            reason.push("Break of Structure up".to_string());
            Direction::Long
        } else if flags.choch {
            reason.push("Change of Character down".to_string());
            Direction::Short
        } else {
            Direction::None
        };

        if direction == Direction::None {
            return Signal {
                symbol: symbol.to_string(),
                direction,
                confidence: 0,
                entry: None,
                sl: None,
                tp1: None,
                reason: vec!["no clear signal — ranging market".to_string()],
            };
        }

        let is_long = direction == Direction::Long;
        let entry = last_close;
        let (sl, tp1) = if is_long {
            (entry * (1.0 - config.sl_pct), entry * (1.0 + config.tp_pct))
        } else {
            (entry * (1.0 + config.sl_pct), entry * (1.0 - config.tp_pct))
        };

        let aligned = if is_long {
            last_rsi < config.rsi_confidence_long && last_close > last_ema
        } else {
            last_rsi > config.rsi_confidence_short && last_close < last_ema
        };
        let confidence = if aligned {
            config.confidence_high
        } else {
            config.confidence_low
        };

        Signal {
            symbol: symbol.to_string(),
            direction,
            confidence,
            entry: Some(entry),
            sl: Some(round2(sl)),
            tp1: Some(round2(tp1)),
            reason,
        }
    }
}
