//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_preference_repo;

pub use alert_preference_repo::AlertPreferenceRepo;
