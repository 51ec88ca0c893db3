//! Route definitions for the `/space-weather` proxy endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::spaceweather;
use crate::state::AppState;

/// Routes mounted at `/space-weather`.
///
/// ```text
/// GET /current  -> current
/// GET /forecast -> forecast
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(spaceweather::current))
        .route("/forecast", get(spaceweather::forecast))
}
