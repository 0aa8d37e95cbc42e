//! The sink contract: where routed entries end up.

use thiserror::Error;

use crate::entry::LogEntry;
use crate::severity::Severity;

/// A destination for routed log entries.
///
/// Implementations persist or forward entries; the router only knows the
/// threshold and the write contract. `write` must not block: asynchronous
/// sinks enqueue internally and flush from their own task.
pub trait Sink: Send + Sync {
    /// Name used in failure reports.
    fn name(&self) -> &'static str;

    /// Least-severe level this sink accepts.
    fn threshold(&self) -> Severity;

    /// Accept one entry. Errors are reported by the router, never retried.
    fn write(&self, entry: &LogEntry) -> Result<(), SinkError>;
}

/// Errors a sink write can produce.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the underlying stream failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The entry could not be serialized for this sink.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sink's transport rejected the entry.
    #[error("transport error: {0}")]
    Transport(String),

    /// The sink's background task is gone.
    #[error("sink channel closed")]
    Closed,
}
