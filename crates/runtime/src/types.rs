//! Common type aliases used throughout the runtime.

/// Opaque identifier of the authenticated player.
pub type UserId = String;

/// Name of a document collection in the external store.
pub type Collection = &'static str;

/// Unix timestamp in milliseconds.
pub type TimestampMs = i64;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> TimestampMs {
    chrono::Utc::now().timestamp_millis()
}
