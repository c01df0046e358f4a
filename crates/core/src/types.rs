/// Users are keyed by a random UUID.
pub type UserId = uuid::Uuid;

/// Products are keyed by a monotonically increasing integer.
pub type ProductId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
