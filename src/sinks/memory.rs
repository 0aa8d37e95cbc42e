//! In-process capture sink.

use std::sync::Mutex;

use crate::entry::LogEntry;
use crate::routing::sink::{Sink, SinkError};
use crate::severity::Severity;

/// Buffers every admitted entry in memory. Used by the test suites to assert
/// on routed entries without touching stdout or the network.
pub struct MemorySink {
    threshold: Severity,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything written so far, in write order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("memory sink mutex poisoned").clone()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, entry: &LogEntry) -> Result<(), SinkError> {
        self.entries
            .lock()
            .expect("memory sink mutex poisoned")
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_order() {
        let sink = MemorySink::new(Severity::Silly);
        sink.write(&LogEntry::new(Severity::Info, "one")).unwrap();
        sink.write(&LogEntry::new(Severity::Error, "two")).unwrap();

        let captured = sink.entries();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].message, "one");
        assert_eq!(captured[1].message, "two");
    }
}
