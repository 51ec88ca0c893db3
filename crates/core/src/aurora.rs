//! The Kp scale and geomagnetic reading types.
//!
//! The planetary K index (Kp) summarises global geomagnetic disturbance on a
//! 0–9 scale; higher values correlate with aurora visibility at lower
//! latitudes. Readings are transient — fetched from the upstream feed per
//! evaluation pass, consumed, and discarded.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Lower bound of the Kp scale.
pub const KP_MIN: i16 = 0;

/// Upper bound of the Kp scale.
pub const KP_MAX: i16 = 9;

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A snapshot of current geomagnetic conditions.
///
/// `kp_index` may be fractional — some upstream feeds report estimated Kp
/// in thirds (e.g. `4.33`). Bz and solar wind speed are ancillary: carried
/// for display, never consulted by the alert decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeomagneticReading {
    /// Planetary K index, 0–9, possibly fractional.
    pub kp_index: f64,
    /// North-south component of the interplanetary magnetic field, in nT.
    pub bz: Option<f64>,
    /// Solar wind bulk speed, in km/s.
    pub solar_wind_speed: Option<f64>,
    /// When the upstream feed observed these conditions (UTC).
    pub observed_at: Timestamp,
    /// Coordinates the reading applies to; `None` for a planetary reading.
    pub location: Option<GeoPoint>,
}

/// Clamp a stored Kp threshold to the valid [`KP_MIN`]..=[`KP_MAX`] range.
///
/// The data layer applies this on every write so that downstream consumers
/// (the evaluator in particular) can trust stored values.
pub fn clamp_kp_threshold(value: i16) -> i16 {
    value.clamp(KP_MIN, KP_MAX)
}

/// Aurora visibility probability for a given Kp index, as a percentage.
///
/// `min(round(kp / 9 * 100), 100)` — purely presentational, used to render
/// notification payloads and the space-weather endpoints.
pub fn visibility_probability(kp_index: f64) -> u8 {
    let percent = (kp_index / f64::from(KP_MAX) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
