/// Timestamp helpers for the persisted file format
pub mod datetime;
