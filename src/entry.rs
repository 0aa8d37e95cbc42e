//! The canonical log entry shared by every channel and sink.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::severity::Severity;

/// Ordered key/value metadata attached to an entry.
///
/// `serde_json` is built with `preserve_order`, so insertion order survives
/// serialization and duplicate keys are last-write-wins.
pub type Metadata = serde_json::Map<String, Value>;

/// A structured log entry ready for routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity used for sink admission.
    pub level: Severity,

    /// Human-readable message.
    pub message: String,

    /// Call-stack trace; always present on normalized error entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Ordered metadata map.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl LogEntry {
    /// Create an entry without stack or metadata.
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            stack: None,
            metadata: Metadata::new(),
        }
    }

    /// Attach a stack trace.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}
