use std::sync::Arc;

use nurture_core::signal::SignalThresholds;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: nurture_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hot-lead thresholds shared by the signal evaluator and the
    /// overview listing.
    pub thresholds: SignalThresholds,
}
