//! Request handlers, one module per resource.

pub mod alert_preference;
pub mod spaceweather;
