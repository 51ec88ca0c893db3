//! Raw SWPC feed payloads and their reshaping into domain values.
//!
//! The SWPC publishes two JSON shapes: `/json/...` feeds are arrays of
//! objects, `/products/...` feeds are arrays of string arrays with a header
//! row. Both are decoded here and nowhere else.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use lightstrail_core::aurora::visibility_probability;
use lightstrail_core::types::Timestamp;

use crate::client::SpaceWeatherError;

/// One entry of the 1-minute planetary K index feed
/// (`/json/planetary_k_index_1m.json`).
#[derive(Debug, Deserialize)]
pub(crate) struct KpIndexEntry {
    pub time_tag: String,
    pub estimated_kp: f64,
}

/// One entry of the real-time solar wind magnetometer feed
/// (`/json/rtsw/rtsw_mag_1m.json`).
#[derive(Debug, Deserialize)]
pub(crate) struct RtswMagEntry {
    pub bz_gsm: Option<f64>,
}

/// One entry of the real-time solar wind plasma feed
/// (`/json/rtsw/rtsw_wind_1m.json`).
#[derive(Debug, Deserialize)]
pub(crate) struct RtswWindEntry {
    pub proton_speed: Option<f64>,
}

/// One forecast slot, reshaped from the three-day Kp forecast product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpForecastEntry {
    /// Start of the three-hour slot the forecast applies to (UTC).
    pub valid_at: Timestamp,
    /// Forecast Kp index for the slot.
    pub kp_index: f64,
    /// Aurora visibility probability derived from `kp_index`.
    pub probability: u8,
}

/// Parse an SWPC `time_tag` value.
///
/// The feeds are inconsistent: `/json/` feeds use `2025-03-01T12:34:00`
/// (optionally with fractional seconds or a trailing `Z`), `/products/`
/// feeds use `2025-03-01 12:00:00`. All of them are UTC.
pub(crate) fn parse_time_tag(raw: &str) -> Result<Timestamp, SpaceWeatherError> {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.and_utc());
        }
    }
    Err(SpaceWeatherError::Malformed(format!(
        "unparseable time_tag: {raw}"
    )))
}

/// Reshape the `/products/noaa-planetary-k-index-forecast.json` table into
/// forecast entries.
///
/// The product is an array of `[time_tag, kp, observed, noaa_scale]` string
/// rows, the first being a header. Rows with an unparseable Kp value make
/// the whole payload malformed; a partial forecast is never returned.
pub(crate) fn reshape_forecast(
    rows: Vec<Vec<String>>,
) -> Result<Vec<KpForecastEntry>, SpaceWeatherError> {
    rows.into_iter()
        .skip(1) // header row
        .map(|row| {
            let [time_tag, kp, ..] = row.as_slice() else {
                return Err(SpaceWeatherError::Malformed(
                    "forecast row has fewer than two columns".to_string(),
                ));
            };
            let kp_index: f64 = kp.trim().parse().map_err(|_| {
                SpaceWeatherError::Malformed(format!("unparseable forecast kp: {kp}"))
            })?;
            Ok(KpForecastEntry {
                valid_at: parse_time_tag(time_tag)?,
                kp_index,
                probability: visibility_probability(kp_index),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
