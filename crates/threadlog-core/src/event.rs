use std::error::Error;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::level::Level;
use crate::registry::ThreadNames;

/// One log call, captured at the call site.
#[derive(Debug, Clone)]
pub struct Event {
    pub timestamp: OffsetDateTime,
    pub thread: String,
    pub level: Level,
    pub message: String,
    pub error: Option<String>,
}

impl Event {
    /// Capture the current time and the calling thread's label.
    pub fn new(
        level: Level,
        message: &str,
        error: Option<&dyn Error>,
        names: &ThreadNames,
    ) -> Self {
        Self {
            timestamp: now(),
            thread: names.resolve_current(),
            level,
            message: normalize_message(message),
            error: error.map(|e| e.to_string()),
        }
    }

    /// Extended ISO-8601 (RFC 3339) timestamp.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| "<time-format-error>".to_string())
    }
}

// Local time when the offset is determinable; falls back to UTC.
fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Drop one trailing newline and escape the rest as `\n`.
pub fn normalize_message(message: &str) -> String {
    let message = message.strip_suffix('\n').unwrap_or(message);
    message.replace('\n', "\\n")
}
