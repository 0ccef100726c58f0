// =============================================================================
// Engine error taxonomy
// =============================================================================
//
// All core errors are deterministic local-computation errors: the same input
// always produces the same error. Upstream (HTTP fetch) failures are kept as
// `anyhow::Error` with context at the plumbing layer and never reach the
// engine itself.

use thiserror::Error;

/// Errors the signal engine can produce.
///
/// The engine fails fast: no partial `Signal` is ever emitted on error, and
/// input series are never silently truncated or padded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Fewer data points than the named indicator requires.
    #[error("insufficient data for {indicator}: need at least {needed} closes, got {got}")]
    InsufficientData {
        indicator: &'static str,
        needed: usize,
        got: usize,
    },

    /// A configured parameter is outside its valid range.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: String },
}

impl EngineError {
    pub fn insufficient(indicator: &'static str, needed: usize, got: usize) -> Self {
        Self::InsufficientData {
            indicator,
            needed,
            got,
        }
    }

    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_indicator() {
        let e = EngineError::insufficient("RSI", 15, 14);
        let msg = e.to_string();
        assert!(msg.contains("RSI"));
        assert!(msg.contains("15"));
        assert!(msg.contains("14"));
    }

    #[test]
    fn invalid_parameter_message_names_parameter() {
        let e = EngineError::invalid("rsi_period", 0);
        assert!(e.to_string().contains("rsi_period"));
    }
}
