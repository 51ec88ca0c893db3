//! The notification-sink seam and the alert payload.

use async_trait::async_trait;
use serde::Serialize;

/// Error type for notification dispatch failures.
///
/// Dispatch failure is a value, never a panic: the scheduler must be able
/// to log it and continue with the remaining recipients.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("Message build error: {0}")]
    Build(String),
}

/// What a notification renders: the conditions and where they apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPayload {
    /// Current planetary K index.
    pub kp_index: f64,
    /// The city label from the user's stored location.
    pub city_name: String,
    /// Aurora visibility probability, as a percentage.
    pub probability: u8,
}

/// Delivers one alert notification to one recipient.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, recipient: &str, payload: &AlertPayload) -> Result<(), DispatchError>;
}
