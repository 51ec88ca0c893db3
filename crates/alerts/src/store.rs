//! The preference-store seam.
//!
//! The scheduler talks to storage through [`PreferenceStore`] so tests can
//! substitute an in-memory fake. Production uses [`PgPreferenceStore`],
//! which delegates to the repository layer.

use async_trait::async_trait;

use lightstrail_core::types::{Timestamp, UserId};
use lightstrail_db::models::alert_preference::{AlertPreference, UpdateAlertPreference};
use lightstrail_db::repositories::AlertPreferenceRepo;
use lightstrail_db::DbPool;

/// Error type for preference-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or the query failed.
    #[error("Preference store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A targeted write matched no row.
    #[error("No alert preference for user {0}")]
    NotFound(UserId),
}

/// Persistence operations the alert system needs.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// All preferences with alerting enabled.
    async fn find_enabled(&self) -> Result<Vec<AlertPreference>, StoreError>;

    /// Record the observation time of a successful send. Partial update of
    /// that column only.
    async fn update_last_notified(
        &self,
        user_id: UserId,
        sent_at: Timestamp,
    ) -> Result<(), StoreError>;

    /// The preference for a user, if one exists.
    async fn find_by_user_id(&self, user_id: UserId)
        -> Result<Option<AlertPreference>, StoreError>;

    /// Create or partially update a preference.
    async fn upsert(
        &self,
        user_id: UserId,
        update: &UpdateAlertPreference,
    ) -> Result<AlertPreference, StoreError>;
}

/// Postgres-backed [`PreferenceStore`].
pub struct PgPreferenceStore {
    pool: DbPool,
}

impl PgPreferenceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn find_enabled(&self) -> Result<Vec<AlertPreference>, StoreError> {
        Ok(AlertPreferenceRepo::find_enabled(&self.pool).await?)
    }

    async fn update_last_notified(
        &self,
        user_id: UserId,
        sent_at: Timestamp,
    ) -> Result<(), StoreError> {
        let updated = AlertPreferenceRepo::update_last_notified(&self.pool, user_id, sent_at).await?;
        if !updated {
            return Err(StoreError::NotFound(user_id));
        }
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<AlertPreference>, StoreError> {
        Ok(AlertPreferenceRepo::find_by_user_id(&self.pool, user_id).await?)
    }

    async fn upsert(
        &self,
        user_id: UserId,
        update: &UpdateAlertPreference,
    ) -> Result<AlertPreference, StoreError> {
        Ok(AlertPreferenceRepo::upsert(&self.pool, user_id, update).await?)
    }
}
