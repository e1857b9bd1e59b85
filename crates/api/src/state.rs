use std::sync::Arc;

use crate::config::ServerConfig;
use crate::negotiation::SessionCoordinator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skillhive_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Session negotiation coordinator (holds only a pool handle).
    pub coordinator: SessionCoordinator,
}

impl AppState {
    pub fn new(pool: skillhive_db::DbPool, config: ServerConfig) -> Self {
        Self {
            coordinator: SessionCoordinator::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
