// =============================================================================
// Series Extractor — closing prices from a candle sequence
// =============================================================================

use crate::error::EngineError;
use crate::types::Candle;

/// Extract the ordered close-price series (oldest-first, index-aligned with
/// the candle sequence) together with the most recent close.
///
/// Fails on an empty input — every downstream indicator needs at least one
/// close, and an empty series has no "last" element to anchor the signal.
pub fn extract_closes(candles: &[Candle]) -> Result<(Vec<f64>, f64), EngineError> {
    if candles.is_empty() {
        return Err(EngineError::insufficient("close series", 1, 0));
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let last_close = closes[closes.len() - 1];
    Ok((closes, last_close))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(close: f64) -> Candle {
        Candle {
            open_time: 0,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10.0,
        }
    }

    #[test]
    fn extracts_closes_in_order() {
        let candles: Vec<Candle> = [100.0, 101.0, 99.5].iter().map(|&c| candle(c)).collect();
        let (closes, last) = extract_closes(&candles).unwrap();
        assert_eq!(closes, vec![100.0, 101.0, 99.5]);
        assert!((last - 99.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = extract_closes(&[]).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { got: 0, .. }));
    }
}
