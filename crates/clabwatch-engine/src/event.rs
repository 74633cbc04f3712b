//! Parsing and classification of raw event lines.
//!
//! The event stream is newline-delimited JSON with the loose shape
//! `{ "type": "container"|"interface", "action": "...", "actor_id": "...",
//! "attributes": { ... } }`. Everything arriving here is untrusted:
//! empty lines, invalid JSON, unknown types, and noise actions are all
//! discarded without error so that one bad line can never stall ingestion.

use serde::Deserialize;
use serde_json::{Map, Value};

use clabwatch_common::constants::EXEC_ACTION_PREFIX;

/// Raw wire shape of one event line, before classification.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: Option<String>,
    action: Option<String>,
    actor_id: Option<String>,
    attributes: Option<Map<String, Value>>,
}

/// Common payload of a classified event.
#[derive(Debug, Clone)]
pub struct EventPayload {
    /// Action string as reported by the stream.
    pub action: String,
    /// Identifier of the container the event refers to, when present.
    pub actor_id: Option<String>,
    /// Loosely-typed event attributes (empty when absent on the wire).
    pub attributes: Map<String, Value>,
}

/// A normalized event accepted for reduction.
#[derive(Debug, Clone)]
pub enum ClassifiedEvent {
    /// Container lifecycle event.
    Container(EventPayload),
    /// Interface add/update/delete event.
    Interface(EventPayload),
}

/// Parses and classifies one raw line from the event stream.
///
/// Returns `None` for empty/whitespace lines, invalid JSON, payloads
/// without a recognizable `type`/`action` shape, and `exec_*` noise
/// actions. Never panics on malformed input.
#[must_use]
pub fn classify_line(line: &str) -> Option<ClassifiedEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let raw: RawEvent = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!(%err, "discarding unparseable event line");
            return None;
        }
    };

    let kind = raw.kind?;
    let action = raw.action?;
    if action.starts_with(EXEC_ACTION_PREFIX) {
        return None;
    }

    let payload = EventPayload {
        action,
        actor_id: raw.actor_id,
        attributes: raw.attributes.unwrap_or_default(),
    };

    match kind.as_str() {
        "container" => Some(ClassifiedEvent::Container(payload)),
        "interface" => Some(ClassifiedEvent::Interface(payload)),
        other => {
            tracing::debug!(kind = other, "discarding event of unknown type");
            None
        }
    }
}

/// Returns a string-valued attribute, or `None` when absent or non-string.
#[must_use]
pub fn attr_str<'a>(attributes: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attributes.get(key).and_then(Value::as_str)
}

/// Returns an unsigned integer attribute.
///
/// Accepts both JSON numbers and numeric strings; negative or garbage
/// values yield `None`.
#[must_use]
pub fn attr_u64(attributes: &Map<String, Value>, key: &str) -> Option<u64> {
    match attributes.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Returns an unsigned 32-bit attribute, with the same leniency as
/// [`attr_u64`].
#[must_use]
pub fn attr_u32(attributes: &Map<String, Value>, key: &str) -> Option<u32> {
    attr_u64(attributes, key).and_then(|n| u32::try_from(n).ok())
}
