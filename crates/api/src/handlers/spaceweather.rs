//! Handlers for the `/space-weather` proxy endpoints.
//!
//! Thin reshaping over the SWPC feeds: fetch, derive the presentation
//! fields, and return. Nothing here is persisted.

use axum::extract::State;
use axum::Json;

use lightstrail_core::aurora::visibility_probability;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/space-weather/current
///
/// Current planetary conditions with the derived viewing probability.
pub async fn current(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let reading = state.swpc.current_reading().await?;

    Ok(Json(serde_json::json!({
        "data": {
            "kp_index": reading.kp_index,
            "bz": reading.bz,
            "solar_wind_speed": reading.solar_wind_speed,
            "observed_at": reading.observed_at,
            "probability": visibility_probability(reading.kp_index),
        }
    })))
}

/// GET /api/v1/space-weather/forecast
///
/// Three-day Kp forecast, flattened to `{valid_at, kp_index, probability}`
/// entries.
pub async fn forecast(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let entries = state.swpc.kp_forecast().await?;

    Ok(Json(serde_json::json!({ "data": entries })))
}
