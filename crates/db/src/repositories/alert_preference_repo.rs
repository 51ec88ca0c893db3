//! Repository for the `alert_preferences` table.

use sqlx::PgPool;

use lightstrail_core::alert::DEFAULT_KP_THRESHOLD;
use lightstrail_core::aurora::clamp_kp_threshold;
use lightstrail_core::types::{Timestamp, UserId};

use crate::models::alert_preference::{AlertPreference, UpdateAlertPreference};

/// Column list for `alert_preferences` queries.
const COLUMNS: &str = "id, user_id, email, kp_threshold, is_enabled, \
    latitude, longitude, city_name, last_notification_sent, created_at, updated_at";

/// Provides CRUD operations for per-user alert preferences.
pub struct AlertPreferenceRepo;

impl AlertPreferenceRepo {
    /// Get the preference for a user, if one exists.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<AlertPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alert_preferences WHERE user_id = $1");
        sqlx::query_as::<_, AlertPreference>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Get the preference for a user, creating the default record first if
    /// none exists (threshold 5, enabled, no location, no email).
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` so concurrent first reads
    /// for the same user cannot race into a duplicate.
    pub async fn find_or_create_default(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<AlertPreference, sqlx::Error> {
        sqlx::query("INSERT INTO alert_preferences (user_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM alert_preferences WHERE user_id = $1");
        sqlx::query_as::<_, AlertPreference>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// List all enabled preferences.
    ///
    /// Disabled rows are excluded server-side; the scheduler never sees
    /// them.
    pub async fn find_enabled(pool: &PgPool) -> Result<Vec<AlertPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alert_preferences \
             WHERE is_enabled = true \
             ORDER BY id"
        );
        sqlx::query_as::<_, AlertPreference>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert or partially update a preference.
    ///
    /// Uses `INSERT ... ON CONFLICT (user_id) DO UPDATE` with `COALESCE` so
    /// only the provided fields change. The Kp threshold is clamped to the
    /// valid scale here — the data layer owns that invariant. The location
    /// triple is bound as a unit, which keeps the all-or-nothing schema
    /// constraint satisfied.
    pub async fn upsert(
        pool: &PgPool,
        user_id: UserId,
        update: &UpdateAlertPreference,
    ) -> Result<AlertPreference, sqlx::Error> {
        let kp_threshold = update.kp_threshold.map(clamp_kp_threshold);
        let (latitude, longitude, city_name) = match &update.location {
            Some(loc) => (
                Some(loc.latitude),
                Some(loc.longitude),
                Some(loc.city_name.as_str()),
            ),
            None => (None, None, None),
        };

        let query = format!(
            "INSERT INTO alert_preferences \
                (user_id, email, kp_threshold, is_enabled, latitude, longitude, city_name) \
             VALUES ($1, $2, COALESCE($3, {DEFAULT_KP_THRESHOLD}), COALESCE($4, true), $5, $6, $7) \
             ON CONFLICT (user_id) DO UPDATE SET \
                email = COALESCE($2, alert_preferences.email), \
                kp_threshold = COALESCE($3, alert_preferences.kp_threshold), \
                is_enabled = COALESCE($4, alert_preferences.is_enabled), \
                latitude = COALESCE($5, alert_preferences.latitude), \
                longitude = COALESCE($6, alert_preferences.longitude), \
                city_name = COALESCE($7, alert_preferences.city_name), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AlertPreference>(&query)
            .bind(user_id)
            .bind(&update.email)
            .bind(kp_threshold)
            .bind(update.is_enabled)
            .bind(latitude)
            .bind(longitude)
            .bind(city_name)
            .fetch_one(pool)
            .await
    }

    /// Stamp `last_notification_sent` with the scheduler's observation time
    /// of a successful send.
    ///
    /// The timestamp is bound, never `NOW()`: every preference notified in
    /// one pass receives the same captured tick time. Returns `false` if no
    /// row matched.
    pub async fn update_last_notified(
        pool: &PgPool,
        user_id: UserId,
        sent_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alert_preferences \
             SET last_notification_sent = $2, updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(sent_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
