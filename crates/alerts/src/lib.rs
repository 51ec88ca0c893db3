//! Aurora alert evaluation and notification scheduling.
//!
//! This crate drives the periodic alert pass: load enabled preferences,
//! fetch the current geomagnetic reading, decide per preference via
//! [`lightstrail_core::alert::evaluate`], and email the users whose
//! threshold was crossed.
//!
//! - [`store`] — the [`PreferenceStore`] seam and its Postgres impl.
//! - [`source`] — the [`KpDataSource`] seam over the SWPC client.
//! - [`sink`] — the [`NotificationSink`] seam and the alert payload.
//! - [`email`] — SMTP delivery via `lettre`.
//! - [`scheduler`] — the recurring [`AlertScheduler`] task.

pub mod email;
pub mod scheduler;
pub mod sink;
pub mod source;
pub mod store;

pub use email::{EmailConfig, EmailDelivery};
pub use scheduler::{AlertScheduler, SchedulerConfig};
pub use sink::{AlertPayload, DispatchError, NotificationSink};
pub use source::KpDataSource;
pub use store::{PgPreferenceStore, PreferenceStore, StoreError};
