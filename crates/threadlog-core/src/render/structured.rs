//! Single-line JSON records:
//!     {"timestamp":"..","logger":"..","level":"W","thread":"..","message":"..","error":".."}
//!
//! `error` is omitted when the event has no cause. Values are escaped with
//! `serde_json`; a value that fails to encode is written as `""` so the line
//! stays parseable.

use crate::event::Event;

pub fn render_structured(event: &Event, name: &str) -> String {
    let mut line = String::with_capacity(128 + event.message.len());
    line.push('{');
    push_field(&mut line, "timestamp", &event.timestamp_rfc3339());
    push_field(&mut line, "logger", name);
    push_field(&mut line, "level", event.level.short());
    push_field(&mut line, "thread", &event.thread);
    push_field(&mut line, "message", &event.message);
    if let Some(err) = &event.error {
        push_field(&mut line, "error", err);
    }
    line.push_str("}\n");
    line
}

fn push_field(line: &mut String, key: &str, value: &str) {
    if !line.ends_with('{') {
        line.push(',');
    }
    line.push_str(&encode(key));
    line.push(':');
    line.push_str(&encode(value));
}

fn encode(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}
