//! LightsTrail domain types and pure alert logic.
//!
//! This crate holds everything that is independent of I/O:
//!
//! - [`types`] — shared id and timestamp aliases.
//! - [`aurora`] — the Kp scale, [`GeomagneticReading`](aurora::GeomagneticReading),
//!   and the aurora visibility probability formula.
//! - [`alert`] — the notification decision function
//!   ([`evaluate`](alert::evaluate)) and its result types.
//! - [`error`] — the domain error type.

pub mod alert;
pub mod aurora;
pub mod error;
pub mod types;
