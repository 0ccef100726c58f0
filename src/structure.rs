// =============================================================================
// Structure Detector — Break of Structure / Change of Character
// =============================================================================
//
// Inspects a short trailing window of closes for a structural break:
//
//   bos   := last_close > max(window)   (bullish break of structure)
//   choch := last_close < min(window)   (bearish change of character)
//
// The comparison window is the `window` closes immediately PRECEDING the
// latest close — the latest close is never part of its own window. With the
// default window of 5 this mirrors a `slice(-6, -1)` over the close series.
//
// Both flags are evaluated independently. They can only coincide when the
// window collapses to a single repeated value compared against itself, which
// real data does not produce; the synthesizer resolves precedence.

use crate::error::EngineError;
use crate::types::StructureFlags;

/// Detect structural break flags over the trailing `window` closes.
///
/// # Errors
/// - `InvalidParameter` when `window == 0`
/// - `InsufficientData` when `closes.len() < window + 1`
pub fn detect_structure(closes: &[f64], window: usize) -> Result<StructureFlags, EngineError> {
    if window == 0 {
        return Err(EngineError::invalid("structure_window", window));
    }
    if closes.len() < window + 1 {
        return Err(EngineError::insufficient(
            "structure detector",
            window + 1,
            closes.len(),
        ));
    }

    let last_close = closes[closes.len() - 1];
    let trailing = &closes[closes.len() - 1 - window..closes.len() - 1];

    let window_max = trailing.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let window_min = trailing.iter().cloned().fold(f64::INFINITY, f64::min);

    Ok(StructureFlags {
        bos: last_close > window_max,
        choch: last_close < window_min,
    })
}
