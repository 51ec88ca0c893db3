//! Route definitions, one module per resource.

use axum::Router;

use crate::state::AppState;

pub mod alert_preference;
pub mod health;
pub mod spaceweather;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/alert-preferences", alert_preference::router())
        .nest("/space-weather", spaceweather::router())
}
