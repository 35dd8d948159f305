use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Cloned into every handler via Axum's state extraction; all members are
/// cheap to clone (pool handle, `Arc`s, atomic counters).
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool holding both the book catalog and the
    /// borrow ledger.
    pub db: sqlx::SqlitePool,
    /// The application configuration (server, database, auth).
    pub config: Arc<AppConfig>,
    /// Operational counters exposed on /metrics.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config), metrics: Metrics::new() }
    }
}
