// =============================================================================
// Binance market-data access
// =============================================================================

pub mod client;

pub use client::BinanceClient;
