//! Error normalization.
//!
//! # Responsibilities
//! - Convert any JSON-like value into a canonical error-level `LogEntry`
//! - Synthesize a stack when the input does not carry one
//! - Merge trailing arguments into the entry metadata
//!
//! # Design Decisions
//! - Never fails: malformed input degrades to a fallback message
//! - A pre-existing `stack` field is preserved byte-for-byte and bypasses
//!   the synthesizer
//! - Object-valued extras merge their keys; other extras land under their
//!   positional index key

use serde_json::Value;

use crate::entry::{LogEntry, Metadata};
use crate::severity::Severity;
use crate::trace::synthesize;

/// Message used when an object input offers no usable `message` field.
pub const FALLBACK_MESSAGE: &str = "No Object Message";

/// Normalize an arbitrary value into an error-level entry.
///
/// Primitive inputs use their string form as the message and get a fresh
/// stack. Objects without a `stack` field are appended to `extra` (so their
/// fields survive as metadata) and also get a fresh stack. Objects that carry
/// a string `stack` keep it unmodified.
pub fn normalize(value: Value, mut extra: Vec<Value>) -> LogEntry {
    let (message, stack) = match &value {
        Value::Object(object) => {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(FALLBACK_MESSAGE)
                .to_string();

            match object.get("stack").and_then(Value::as_str) {
                Some(stack) => (message, stack.to_string()),
                None => {
                    extra.push(value.clone());
                    let stack = synthesize(&message).display;
                    (message, stack)
                }
            }
        }
        primitive => {
            let message = primitive_message(primitive);
            let stack = synthesize(&message).display;
            (message, stack)
        }
    };

    LogEntry::new(Severity::Error, message)
        .with_stack(stack)
        .with_metadata(merge_extra(extra))
}

/// String form of a non-object value: strings unquoted, everything else via
/// its JSON rendering.
fn primitive_message(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Merge extras into a single ordered map, last write wins.
fn merge_extra(extra: Vec<Value>) -> Metadata {
    let mut metadata = Metadata::new();
    for (index, value) in extra.into_iter().enumerate() {
        match value {
            Value::Object(object) => {
                for (key, value) in object {
                    metadata.insert(key, value);
                }
            }
            other => {
                metadata.insert(index.to_string(), other);
            }
        }
    }
    metadata
}
