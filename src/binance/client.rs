// =============================================================================
// Binance REST Client — public kline (candlestick) endpoint
// =============================================================================
//
// Only the unsigned market-data endpoint is used; no API key or request
// signing is required. Binance returns klines as an array of arrays with
// numeric fields encoded as JSON strings:
//
//   [ openTime, "open", "high", "low", "close", "volume", closeTime, ... ]
//
// Candles arrive oldest-first, which is exactly the ordering the signal
// engine expects.
// =============================================================================

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::types::Candle;

/// Binance REST client for public market data.
#[derive(Clone)]
pub struct BinanceClient {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: "https://api.binance.com".to_string(),
            client,
        }
    }

    /// GET /api/v3/klines — fetch up to `limit` candles for `symbol` at the
    /// given interval, oldest-first.
    #[instrument(skip(self), name = "binance::fetch_klines")]
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            symbol.to_uppercase(),
            interval,
            limit
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /api/v3/klines request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to decode klines response body")?;

        if !status.is_success() {
            anyhow::bail!("klines request returned {status}: {body}");
        }

        let candles = parse_klines(&body)?;
        debug!(symbol, interval, count = candles.len(), "klines fetched");
        Ok(candles)
    }
}

/// Parse the raw klines payload into candles.
fn parse_klines(body: &serde_json::Value) -> Result<Vec<Candle>> {
    let rows = body
        .as_array()
        .context("klines response is not a JSON array")?;

    let mut candles = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        candles.push(
            parse_kline_row(row).with_context(|| format!("failed to parse kline row {i}"))?,
        );
    }
    Ok(candles)
}

/// Parse one `[openTime, "o", "h", "l", "c", "v", ...]` row.
fn parse_kline_row(row: &serde_json::Value) -> Result<Candle> {
    let fields = row.as_array().context("kline row is not an array")?;
    if fields.len() < 6 {
        anyhow::bail!("kline row has {} fields, expected at least 6", fields.len());
    }

    Ok(Candle {
        open_time: fields[0]
            .as_i64()
            .context("kline field 0 (openTime) is not an integer")?,
        open: parse_string_f64(&fields[1], "open")?,
        high: parse_string_f64(&fields[2], "high")?,
        low: parse_string_f64(&fields[3], "low")?,
        close: parse_string_f64(&fields[4], "close")?,
        volume: parse_string_f64(&fields[5], "volume")?,
    })
}

/// Helper: Binance sends numeric values as JSON strings inside kline rows.
fn parse_string_f64(val: &serde_json::Value, name: &str) -> Result<f64> {
    match val {
        serde_json::Value::String(s) => s
            .parse::<f64>()
            .with_context(|| format!("failed to parse {name} as f64: {s}")),
        serde_json::Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("field {name} is not a valid f64")),
        _ => anyhow::bail!("field {name} has unexpected JSON type"),
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_klines_ok() {
        let body: serde_json::Value = serde_json::from_str(
            r#"[
                [1700000000000, "37000.00", "37050.00", "36990.00", "37020.00", "123.456",
                 1700003599999, "4567890.12", 1500, "60.123", "2224455.66", "0"],
                [1700003600000, "37020.00", "37100.00", "37010.00", "37090.50", "98.7",
                 1700007199999, "3660000.00", 1200, "50.0", "1850000.00", "0"]
            ]"#,
        )
        .unwrap();

        let candles = parse_klines(&body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open_time, 1_700_000_000_000);
        assert!((candles[0].close - 37020.0).abs() < f64::EPSILON);
        assert!((candles[1].close - 37090.5).abs() < f64::EPSILON);
        assert!((candles[1].volume - 98.7).abs() < f64::EPSILON);
        // Oldest-first ordering preserved.
        assert!(candles[0].open_time < candles[1].open_time);
    }

    #[test]
    fn parse_klines_rejects_non_array() {
        let body = serde_json::json!({ "code": -1121, "msg": "Invalid symbol." });
        assert!(parse_klines(&body).is_err());
    }

    #[test]
    fn parse_kline_row_rejects_short_row() {
        let row = serde_json::json!([1700000000000_i64, "1.0", "2.0"]);
        assert!(parse_kline_row(&row).is_err());
    }

    #[test]
    fn parse_kline_row_rejects_bad_number() {
        let row = serde_json::json!([
            1700000000000_i64, "not-a-number", "2.0", "0.5", "1.5", "10.0"
        ]);
        assert!(parse_kline_row(&row).is_err());
    }

    #[test]
    fn parse_string_f64_accepts_plain_numbers() {
        let val = serde_json::json!(42.5);
        assert!((parse_string_f64(&val, "x").unwrap() - 42.5).abs() < f64::EPSILON);
    }
}
