//! The recurring alert pass.
//!
//! [`AlertScheduler`] runs as a background task, waking on a fixed interval
//! to evaluate every enabled alert preference against the current
//! geomagnetic reading and email the users whose threshold was crossed.
//! The loop exits gracefully when the provided `CancellationToken` is
//! cancelled.
//!
//! Passes never overlap: the pass body runs inside the timer task, and
//! ticks missed while a slow pass is in flight are skipped, not queued.
//! Each preference is processed independently — one recipient's failure is
//! logged and the pass moves on.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use lightstrail_core::alert::{evaluate, PreferenceSnapshot, DEFAULT_COOLDOWN};
use lightstrail_core::aurora::{visibility_probability, GeomagneticReading};
use lightstrail_core::types::Timestamp;
use lightstrail_db::models::alert_preference::AlertPreference;

use crate::sink::{AlertPayload, NotificationSink};
use crate::source::KpDataSource;
use crate::store::PreferenceStore;

/// Default minutes between alert passes.
const DEFAULT_TICK_MINUTES: u64 = 30;

// ---------------------------------------------------------------------------
// SchedulerConfig
// ---------------------------------------------------------------------------

/// Policy configuration for the alert scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How often an alert pass runs.
    pub tick_interval: Duration,
    /// Minimum elapsed time between two notifications to the same user.
    pub cooldown: Duration,
}

impl SchedulerConfig {
    /// Load configuration from environment variables.
    ///
    /// Set-but-unparseable values panic at startup; unset values use the
    /// defaults.
    ///
    /// | Variable               | Default |
    /// |------------------------|---------|
    /// | `ALERT_TICK_MINUTES`   | `30`    |
    /// | `ALERT_COOLDOWN_HOURS` | `4`     |
    pub fn from_env() -> Self {
        let tick_minutes: u64 = match std::env::var("ALERT_TICK_MINUTES") {
            Ok(raw) => raw.parse().expect("ALERT_TICK_MINUTES must be a valid u64"),
            Err(_) => DEFAULT_TICK_MINUTES,
        };

        let cooldown = match std::env::var("ALERT_COOLDOWN_HOURS") {
            Ok(raw) => {
                let hours: f64 = raw.parse().expect("ALERT_COOLDOWN_HOURS must be a valid f64");
                Duration::from_secs_f64(hours * 3600.0)
            }
            Err(_) => DEFAULT_COOLDOWN,
        };

        Self {
            tick_interval: Duration::from_secs(tick_minutes * 60),
            cooldown,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(DEFAULT_TICK_MINUTES * 60),
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

// ---------------------------------------------------------------------------
// AlertScheduler
// ---------------------------------------------------------------------------

/// Outcome of processing one preference within a pass.
#[derive(Debug, PartialEq, Eq)]
enum PassOutcome {
    Sent,
    Skipped,
    Failed,
}

/// Background service that periodically evaluates alert preferences and
/// dispatches notifications.
pub struct AlertScheduler<S, D, N> {
    store: S,
    source: D,
    sink: N,
    config: SchedulerConfig,
}

impl<S, D, N> AlertScheduler<S, D, N>
where
    S: PreferenceStore,
    D: KpDataSource,
    N: NotificationSink,
{
    /// Create a scheduler over the given collaborators.
    pub fn new(store: S, source: D, sink: N, config: SchedulerConfig) -> Self {
        Self {
            store,
            source,
            sink,
            config,
        }
    }

    /// Run the scheduler loop until `cancel` is triggered.
    ///
    /// An in-flight pass is allowed to finish; state stays consistent
    /// either way because a preference's timestamp is only written after
    /// its own send succeeded.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.config.tick_interval.as_secs(),
            cooldown_secs = self.config.cooldown.as_secs(),
            "Alert scheduler started"
        );

        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Alert scheduler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let now = Utc::now();
                    self.run_pass(now).await;
                }
            }
        }
    }

    /// Execute one full evaluation pass.
    ///
    /// `now` is captured once by the caller and used for every preference
    /// in the pass, so early and late recipients of a slow pass get the
    /// same timestamp.
    async fn run_pass(&self, now: Timestamp) {
        let preferences = match self.store.find_enabled().await {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load alert preferences, skipping pass");
                return;
            }
        };

        if preferences.is_empty() {
            tracing::debug!("No enabled alert preferences, nothing to evaluate");
            return;
        }

        // One planetary reading serves the whole pass; without a reading
        // there is no pass.
        let reading = match self.source.current_reading(None).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::error!(error = %e, "Geomagnetic reading unavailable, skipping pass");
                return;
            }
        };

        let mut sent = 0usize;
        let mut failed = 0usize;

        for preference in &preferences {
            match self.process_preference(preference, &reading, now).await {
                PassOutcome::Sent => sent += 1,
                PassOutcome::Failed => failed += 1,
                PassOutcome::Skipped => {}
            }
        }

        if sent > 0 || failed > 0 {
            tracing::info!(
                evaluated = preferences.len(),
                sent,
                failed,
                kp_index = reading.kp_index,
                "Alert pass complete"
            );
        } else {
            tracing::debug!(
                evaluated = preferences.len(),
                kp_index = reading.kp_index,
                "Alert pass complete, nothing to send"
            );
        }
    }

    /// Evaluate and, if due, notify a single preference.
    async fn process_preference(
        &self,
        preference: &AlertPreference,
        reading: &GeomagneticReading,
        now: Timestamp,
    ) -> PassOutcome {
        // A notification needs an address and a location label to render;
        // a preference missing either is skipped outright, not failed.
        let Some(email) = preference.email.as_deref() else {
            tracing::debug!(user_id = %preference.user_id, "Preference has no email, skipping");
            return PassOutcome::Skipped;
        };
        let Some(location) = preference.location() else {
            tracing::debug!(user_id = %preference.user_id, "Preference has no location, skipping");
            return PassOutcome::Skipped;
        };

        let snapshot = PreferenceSnapshot {
            is_enabled: preference.is_enabled,
            kp_threshold: preference.kp_threshold,
            last_notification_sent: preference.last_notification_sent,
        };
        let decision = evaluate(&snapshot, reading, now, self.config.cooldown);

        if !decision.should_send {
            tracing::debug!(
                user_id = %preference.user_id,
                reason = ?decision.reason,
                "No notification due"
            );
            return PassOutcome::Skipped;
        }

        let payload = AlertPayload {
            kp_index: reading.kp_index,
            city_name: location.city_name,
            probability: visibility_probability(reading.kp_index),
        };

        if let Err(e) = self.sink.send(email, &payload).await {
            // The timestamp is left untouched, so the next qualifying pass
            // retries this recipient naturally.
            tracing::warn!(
                user_id = %preference.user_id,
                error = %e,
                "Notification dispatch failed, will retry on a later pass"
            );
            return PassOutcome::Failed;
        }

        if let Err(e) = self
            .store
            .update_last_notified(preference.user_id, now)
            .await
        {
            // The send already happened; failing to record it means the
            // user may be notified again next pass (at-least-once).
            tracing::error!(
                user_id = %preference.user_id,
                error = %e,
                "Failed to record notification time after send"
            );
        }

        PassOutcome::Sent
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
