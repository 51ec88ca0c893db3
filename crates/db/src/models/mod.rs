//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` update DTO (all `Option` fields) for partial merges

pub mod alert_preference;
