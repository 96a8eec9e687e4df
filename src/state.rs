use std::sync::Arc;

use crate::config::Settings;
use crate::db::{DbPool, StationCatalog};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DbPool,
    pub catalog: StationCatalog,
    pub config: Arc<Settings>,
}

impl AppState {
    pub fn new(db: DbPool, catalog: StationCatalog, config: Settings) -> Self {
        Self {
            db,
            catalog,
            config: Arc::new(config),
        }
    }
}
