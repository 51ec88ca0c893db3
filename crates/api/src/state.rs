use std::sync::Arc;

use lightstrail_spaceweather::SwpcClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lightstrail_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SWPC space-weather client, shared by the proxy endpoints.
    pub swpc: Arc<SwpcClient>,
}
