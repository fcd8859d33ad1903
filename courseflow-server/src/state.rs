//! Application state shared across all request handlers.

use courseflow_core::checkout::SessionStore;
use courseflow_core::config::SharedConfig;
use courseflow_core::framework::DatabaseProcessor;
use sqlx::PgPool;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Configuration with separate locks per section (reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Live checkout sessions.
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new AppState with the given database pool and configuration.
    pub fn new(db: PgPool, config: SharedConfig) -> Self {
        Self {
            db,
            config,
            sessions: SessionStore::default(),
        }
    }

    /// Backend for checkout operations and queries.
    pub fn processor(&self) -> DatabaseProcessor {
        DatabaseProcessor::new(self.db.clone())
    }
}
