/// Primary keys are UUIDv7 strings minted by [`crate::ids::new_entity_id`].
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
