//! Application state shared across HTTP handlers

use std::sync::Arc;

use buzufba_core::RouteService;
use buzufba_db::RouteRepository;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Route queries over the configured store
    pub routes: RouteService,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(repository: Arc<dyn RouteRepository>, config: Config) -> Self {
        Self {
            routes: RouteService::new(repository),
            config: Arc::new(config),
        }
    }
}
