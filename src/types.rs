// =============================================================================
// Shared types used across the Helios signal engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// A single OHLCV candle as supplied by the market-data provider.
///
/// Immutable once constructed — the engine never mutates a candle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Resolved trade direction for a generated signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SHORT")]
    Short,
    #[serde(rename = "NONE")]
    None,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// Break-of-structure / change-of-character flags from the structure detector.
///
/// Both flags are evaluated independently; the synthesizer resolves precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFlags {
    pub bos: bool,
    pub choch: bool,
}

/// The trade recommendation produced by one engine invocation.
///
/// `entry`/`sl`/`tp1` are present only when `direction != NONE`; they are
/// omitted from the serialized output otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub direction: Direction,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp1: Option<f64>,
    pub reason: Vec<String>,
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Direction::Long).unwrap(), "\"LONG\"");
        assert_eq!(serde_json::to_string(&Direction::Short).unwrap(), "\"SHORT\"");
        assert_eq!(serde_json::to_string(&Direction::None).unwrap(), "\"NONE\"");
    }

    #[test]
    fn signal_omits_levels_when_absent() {
        let sig = Signal {
            symbol: "BTCUSDT".to_string(),
            direction: Direction::None,
            confidence: 0,
            entry: None,
            sl: None,
            tp1: None,
            reason: vec!["no clear signal — ranging market".to_string()],
        };
        let json = serde_json::to_value(&sig).unwrap();
        assert!(json.get("entry").is_none());
        assert!(json.get("sl").is_none());
        assert!(json.get("tp1").is_none());
        assert_eq!(json["direction"], "NONE");
    }

    #[test]
    fn signal_includes_levels_when_present() {
        let sig = Signal {
            symbol: "ETHUSDT".to_string(),
            direction: Direction::Long,
            confidence: 85,
            entry: Some(2000.0),
            sl: Some(1970.0),
            tp1: Some(2030.0),
            reason: vec![],
        };
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["entry"], 2000.0);
        assert_eq!(json["sl"], 1970.0);
        assert_eq!(json["tp1"], 2030.0);
    }
}
