//! Handlers for the `/alert-preferences` resource.
//!
//! User identity arrives as an opaque UUID path segment; authentication is
//! handled upstream of this service.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use lightstrail_core::error::CoreError;
use lightstrail_core::types::UserId;
use lightstrail_db::models::alert_preference::UpdateAlertPreference;
use lightstrail_db::repositories::AlertPreferenceRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/alert-preferences/{user_id}
///
/// Fetch the user's alert preference. A user who has never configured one
/// gets the default record created and returned (threshold 5, enabled, no
/// location).
pub async fn get_preference(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<serde_json::Value>> {
    let preference = AlertPreferenceRepo::find_or_create_default(&state.pool, user_id).await?;

    Ok(Json(serde_json::json!({ "data": preference })))
}

/// PUT /api/v1/alert-preferences/{user_id}
///
/// Create or partially update the user's alert preference. Only provided
/// fields change; the location triple is replaced as a unit.
pub async fn update_preference(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(update): Json<UpdateAlertPreference>,
) -> AppResult<Json<serde_json::Value>> {
    update
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let preference = AlertPreferenceRepo::upsert(&state.pool, user_id, &update).await?;

    Ok(Json(serde_json::json!({ "data": preference })))
}
