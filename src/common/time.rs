//! Timestamp formatting for chat messages.

use chrono::{DateTime, Utc};

/// Format a point in time the way the client renders message timestamps,
/// e.g. "25 Jan 21:44".
pub fn chat_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d %b %H:%M").to_string()
}

/// Current UTC time in the chat timestamp format.
pub fn now_chat_timestamp() -> String {
    chat_timestamp(Utc::now())
}
