//! Notification decision logic.
//!
//! Pure logic — no database access and no clock access. The scheduler is
//! responsible for loading preferences, fetching the current reading, and
//! passing a single consistent `now` for the whole pass.

use std::time::Duration;

use serde::Serialize;

use crate::aurora::GeomagneticReading;
use crate::types::Timestamp;

/// Default minimum Kp index that triggers a notification.
pub const DEFAULT_KP_THRESHOLD: i16 = 5;

/// Default minimum elapsed time between two notifications to the same user.
///
/// Prevents repeated emails while a storm persists across consecutive
/// scheduler passes. Policy value — overridable via configuration.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(4 * 60 * 60);

/// Why a decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// The user has never been notified before.
    FirstNotification,
    /// The cooldown window since the last notification has elapsed.
    CooldownElapsed,
    /// A notification was sent too recently.
    CooldownActive,
    /// Alerting is disabled for this preference.
    Disabled,
    /// The reading did not reach the configured threshold.
    BelowThreshold,
}

/// The outcome of evaluating one preference against one reading.
///
/// Transient — logged and acted on, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationDecision {
    pub should_send: bool,
    pub reason: DecisionReason,
}

/// The slice of an alert preference the decision depends on.
///
/// The caller maps its stored preference row into this view; `kp_threshold`
/// is trusted to be within the Kp scale (the data layer clamps on write).
#[derive(Debug, Clone)]
pub struct PreferenceSnapshot {
    pub is_enabled: bool,
    pub kp_threshold: i16,
    pub last_notification_sent: Option<Timestamp>,
}

/// Decide whether a notification is due for one preference.
///
/// Rules, in order:
/// 1. Disabled preferences never send. (The scheduler pre-filters these
///    server-side, but the rule is enforced here as well so direct callers
///    get correct answers.)
/// 2. A reading below the threshold never sends; a reading exactly equal
///    to the threshold does.
/// 3. A user who has never been notified sends immediately.
/// 4. Otherwise the cooldown window applies, with an inclusive boundary:
///    elapsed time exactly equal to `cooldown` sends.
pub fn evaluate(
    preference: &PreferenceSnapshot,
    reading: &GeomagneticReading,
    now: Timestamp,
    cooldown: Duration,
) -> NotificationDecision {
    if !preference.is_enabled {
        return NotificationDecision {
            should_send: false,
            reason: DecisionReason::Disabled,
        };
    }

    if reading.kp_index < f64::from(preference.kp_threshold) {
        return NotificationDecision {
            should_send: false,
            reason: DecisionReason::BelowThreshold,
        };
    }

    let Some(last_sent) = preference.last_notification_sent else {
        return NotificationDecision {
            should_send: true,
            reason: DecisionReason::FirstNotification,
        };
    };

    let elapsed = now.signed_duration_since(last_sent);
    let cooldown = chrono::Duration::from_std(cooldown).expect("valid cooldown duration");

    if elapsed >= cooldown {
        NotificationDecision {
            should_send: true,
            reason: DecisionReason::CooldownElapsed,
        }
    } else {
        NotificationDecision {
            should_send: false,
            reason: DecisionReason::CooldownActive,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn reading(kp_index: f64) -> GeomagneticReading {
        GeomagneticReading {
            kp_index,
            bz: Some(-4.2),
            solar_wind_speed: Some(430.0),
            observed_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            location: None,
        }
    }

    fn preference(last_sent: Option<Timestamp>) -> PreferenceSnapshot {
        PreferenceSnapshot {
            is_enabled: true,
            kp_threshold: 5,
            last_notification_sent: last_sent,
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn disabled_never_sends() {
        let pref = PreferenceSnapshot {
            is_enabled: false,
            kp_threshold: 0,
            last_notification_sent: None,
        };
        // Even with a maximal reading and no prior notification.
        let decision = evaluate(&pref, &reading(9.0), now(), DEFAULT_COOLDOWN);
        assert!(!decision.should_send);
        assert_eq!(decision.reason, DecisionReason::Disabled);
    }

    #[test]
    fn below_threshold_skips() {
        let decision = evaluate(&preference(None), &reading(4.9), now(), DEFAULT_COOLDOWN);
        assert!(!decision.should_send);
        assert_eq!(decision.reason, DecisionReason::BelowThreshold);
    }

    #[test]
    fn reading_equal_to_threshold_triggers() {
        let decision = evaluate(&preference(None), &reading(5.0), now(), DEFAULT_COOLDOWN);
        assert!(decision.should_send);
        assert_eq!(decision.reason, DecisionReason::FirstNotification);
    }

    #[test]
    fn fractional_reading_compares_numerically() {
        let decision = evaluate(&preference(None), &reading(5.33), now(), DEFAULT_COOLDOWN);
        assert!(decision.should_send);
    }

    #[test]
    fn never_notified_sends_first_notification() {
        let decision = evaluate(&preference(None), &reading(6.0), now(), DEFAULT_COOLDOWN);
        assert!(decision.should_send);
        assert_eq!(decision.reason, DecisionReason::FirstNotification);
    }

    #[test]
    fn cooldown_active_one_minute_before_boundary() {
        let last = now() - chrono::Duration::hours(3) - chrono::Duration::minutes(59);
        let decision = evaluate(&preference(Some(last)), &reading(6.0), now(), DEFAULT_COOLDOWN);
        assert!(!decision.should_send);
        assert_eq!(decision.reason, DecisionReason::CooldownActive);
    }

    #[test]
    fn cooldown_boundary_is_inclusive() {
        let last = now() - chrono::Duration::hours(4);
        let decision = evaluate(&preference(Some(last)), &reading(6.0), now(), DEFAULT_COOLDOWN);
        assert!(decision.should_send);
        assert_eq!(decision.reason, DecisionReason::CooldownElapsed);
    }

    #[test]
    fn cooldown_elapsed_after_five_hours() {
        let last = now() - chrono::Duration::hours(5);
        let decision = evaluate(&preference(Some(last)), &reading(7.0), now(), DEFAULT_COOLDOWN);
        assert!(decision.should_send);
        assert_eq!(decision.reason, DecisionReason::CooldownElapsed);
    }

    #[test]
    fn threshold_check_precedes_cooldown() {
        // Below threshold reports BelowThreshold even when the user was
        // notified recently.
        let last = now() - chrono::Duration::minutes(10);
        let decision = evaluate(&preference(Some(last)), &reading(2.0), now(), DEFAULT_COOLDOWN);
        assert_eq!(decision.reason, DecisionReason::BelowThreshold);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let pref = preference(Some(now() - chrono::Duration::hours(1)));
        let r = reading(6.0);
        let first = evaluate(&pref, &r, now(), DEFAULT_COOLDOWN);
        let second = evaluate(&pref, &r, now(), DEFAULT_COOLDOWN);
        assert_eq!(first, second);
    }
}
