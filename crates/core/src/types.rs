/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// User identities are opaque UUIDs issued by the identity service.
pub type UserId = uuid::Uuid;
