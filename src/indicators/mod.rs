// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the signal engine
// consumes. Every public function returns `Result` so callers are forced to
// handle insufficient-data and invalid-parameter cases explicitly.

pub mod ema;
pub mod rsi;
