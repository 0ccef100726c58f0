// =============================================================================
// Shared application state
// =============================================================================
//
// The engine itself is stateless; the only shared state is the hot-reloadable
// configuration and the HTTP client for the market-data provider. A version
// counter lets dashboard clients cheaply detect config changes.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::binance::BinanceClient;
use crate::engine_config::EngineConfig;

pub struct AppState {
    pub config: RwLock<EngineConfig>,
    pub client: BinanceClient,
    state_version: AtomicU64,
}

impl AppState {
    pub fn new(config: EngineConfig, client: BinanceClient) -> Self {
        Self {
            config: RwLock::new(config),
            client,
            state_version: AtomicU64::new(1),
        }
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::Relaxed)
    }

    pub fn increment_version(&self) {
        self.state_version.fetch_add(1, Ordering::Relaxed);
    }
}
