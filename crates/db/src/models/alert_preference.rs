//! Alert preference entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use lightstrail_core::aurora::GeoPoint;
use lightstrail_core::types::{DbId, Timestamp, UserId};

/// A row from the `alert_preferences` table.
///
/// `last_notification_sent` is mutated only by the alert scheduler, after a
/// send has succeeded; `NULL` means "never notified".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertPreference {
    pub id: DbId,
    pub user_id: UserId,
    pub email: Option<String>,
    pub kp_threshold: i16,
    pub is_enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city_name: Option<String>,
    pub last_notification_sent: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AlertPreference {
    /// The stored location, when present.
    ///
    /// The schema guarantees the three location columns are all set or all
    /// `NULL`, so this returns `Some` exactly when the row carries a
    /// complete location.
    pub fn location(&self) -> Option<PreferenceLocation> {
        match (self.latitude, self.longitude, &self.city_name) {
            (Some(latitude), Some(longitude), Some(city_name)) => Some(PreferenceLocation {
                latitude,
                longitude,
                city_name: city_name.clone(),
            }),
            _ => None,
        }
    }

    /// The stored coordinates as a [`GeoPoint`], when present.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// A complete location: the fields travel together, never individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PreferenceLocation {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1))]
    pub city_name: String,
}

/// DTO for creating or partially updating an alert preference.
///
/// Absent fields leave the stored value unchanged; on first write, absent
/// fields fall back to the row defaults (threshold 5, enabled, no location).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAlertPreference {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 0, max = 9))]
    pub kp_threshold: Option<i16>,
    pub is_enabled: Option<bool>,
    #[validate(nested)]
    pub location: Option<PreferenceLocation>,
}
