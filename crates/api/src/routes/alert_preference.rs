//! Route definitions for the `/alert-preferences` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::alert_preference;
use crate::state::AppState;

/// Routes mounted at `/alert-preferences`.
///
/// ```text
/// GET /{user_id} -> get_preference (creates the default on first read)
/// PUT /{user_id} -> update_preference (partial merge upsert)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{user_id}",
        get(alert_preference::get_preference).put(alert_preference::update_preference),
    )
}
