// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `period`
// closes, so the output carries one entry per close from index `period - 1`
// onward (length = closes.len() - period + 1).
// =============================================================================

use crate::error::EngineError;

/// Compute the EMA series for the given `closes` slice and look-back `period`.
///
/// # Errors
/// - `InvalidParameter` when `period == 0`
/// - `InsufficientData` when `closes.len() < period`
pub fn calculate_ema(closes: &[f64], period: usize) -> Result<Vec<f64>, EngineError> {
    if period == 0 {
        return Err(EngineError::invalid("ema_period", period));
    }
    if closes.len() < period {
        return Err(EngineError::insufficient("EMA", period, closes.len()));
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let sma: f64 = closes[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(closes.len() - period + 1);
    result.push(sma);

    let mut prev_ema = sma;
    for &close in &closes[period..] {
        let ema = close * multiplier + prev_ema * (1.0 - multiplier);
        result.push(ema);
        prev_ema = ema;
    }

    Ok(result)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_period_zero_is_invalid() {
        let err = calculate_ema(&[1.0, 2.0, 3.0], 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn ema_insufficient_data() {
        let err = calculate_ema(&[1.0, 2.0], 5).unwrap_err();
        assert_eq!(err, EngineError::insufficient("EMA", 5, 2));
    }

    #[test]
    fn ema_period_equals_length_yields_seed_only() {
        let closes = vec![2.0, 4.0, 6.0];
        let ema = calculate_ema(&closes, 3).unwrap();
        assert_eq!(ema.len(), 1);
        // SMA = (2 + 4 + 6) / 3 = 4.0
        assert!((ema[0] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_output_length() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let ema = calculate_ema(&closes, 21).unwrap();
        assert_eq!(ema.len(), 30 - 21 + 1);
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of [1..10]: SMA seed 3.0, multiplier 2/6 = 1/3.
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let ema = calculate_ema(&closes, 5).unwrap();
        assert_eq!(ema.len(), 6);

        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        assert!((ema[0] - expected).abs() < 1e-10);
        for (i, &c) in closes[5..].iter().enumerate() {
            expected = c * mult + expected * (1.0 - mult);
            assert!((ema[i + 1] - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn ema_values_stay_between_prev_and_close() {
        // Convexity: each new EMA lies between the previous EMA and the new
        // close for any 0 < multiplier < 1.
        let closes = vec![10.0, 12.0, 9.0, 15.0, 8.0, 14.0, 11.0, 13.0, 7.0, 16.0];
        let ema = calculate_ema(&closes, 4).unwrap();
        for (i, &close) in closes[4..].iter().enumerate() {
            let prev = ema[i];
            let cur = ema[i + 1];
            let lo = prev.min(close);
            let hi = prev.max(close);
            assert!(
                (lo..=hi).contains(&cur),
                "EMA {cur} escaped [{lo}, {hi}]"
            );
        }
    }

    #[test]
    fn ema_flat_series_is_constant() {
        let closes = vec![100.0; 30];
        let ema = calculate_ema(&closes, 21).unwrap();
        for &v in &ema {
            assert!((v - 100.0).abs() < 1e-10);
        }
    }
}
