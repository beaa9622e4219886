use std::sync::Arc;

use chirpy_core::moderation::ChirpFilter;
use chirpy_db::Store;

use crate::config::ServerConfig;
use crate::metrics::HitCounter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (Postgres or in-process).
    pub store: Arc<dyn Store>,
    /// Server configuration (JWT secret, platform, etc.).
    pub config: Arc<ServerConfig>,
    /// File-server hit counter.
    pub hits: Arc<HitCounter>,
    /// Chirp body moderation built from `config.banned_words`.
    pub chirp_filter: Arc<ChirpFilter>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let chirp_filter = ChirpFilter::new(&config.banned_words);
        Self {
            store,
            config: Arc::new(config),
            hits: Arc::new(HitCounter::new()),
            chirp_filter: Arc::new(chirp_filter),
        }
    }
}
