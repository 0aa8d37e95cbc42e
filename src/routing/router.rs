//! Severity-thresholded dispatch to registered sinks.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::entry::LogEntry;
use crate::normalize::normalize;
use crate::routing::sink::Sink;

/// Named routing lane with its own sink set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Application log entries (facade `log`/`error`).
    Default,
    /// Structured HTTP access records.
    Http,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Default => f.write_str("default"),
            Channel::Http => f.write_str("http"),
        }
    }
}

/// Holds the per-channel sink lists and performs admission-filtered dispatch.
///
/// Registration is dynamic: a sink may be added after entries have already
/// been routed; those entries are not redelivered. The sink lists are only
/// appended to, never pruned.
pub struct LogRouter {
    default_sinks: Mutex<Vec<Arc<dyn Sink>>>,
    http_sinks: Mutex<Vec<Arc<dyn Sink>>>,
}

impl LogRouter {
    /// Create a router with empty sink lists on both channels.
    pub fn new() -> Self {
        Self {
            default_sinks: Mutex::new(Vec::new()),
            http_sinks: Mutex::new(Vec::new()),
        }
    }

    /// Append a sink to a channel. Entries routed before this call are lost
    /// to the new sink.
    pub fn register(&self, channel: Channel, sink: Arc<dyn Sink>) {
        self.lane(channel)
            .lock()
            .expect("router mutex poisoned")
            .push(sink);
    }

    /// Number of sinks currently registered on a channel.
    pub fn sink_count(&self, channel: Channel) -> usize {
        self.lane(channel)
            .lock()
            .expect("router mutex poisoned")
            .len()
    }

    /// Deliver an entry to every sink on `channel` whose threshold admits the
    /// entry's level. Sink failures are reported on the default channel and
    /// do not stop dispatch.
    pub fn route(&self, channel: Channel, entry: LogEntry) {
        self.dispatch(channel, entry, true);
    }

    fn dispatch(&self, channel: Channel, entry: LogEntry, report_failures: bool) {
        // Snapshot under the lock, dispatch outside it; sink writes may be
        // arbitrarily slow to fail and must not serialize registration.
        let sinks: Vec<Arc<dyn Sink>> = self
            .lane(channel)
            .lock()
            .expect("router mutex poisoned")
            .clone();

        for sink in sinks {
            if !sink.threshold().admits(entry.level) {
                continue;
            }
            if let Err(error) = sink.write(&entry) {
                if report_failures {
                    self.report_sink_failure(sink.name(), &error);
                } else {
                    tracing::warn!(sink = sink.name(), %error, "sink write failed while reporting");
                }
            }
        }
    }

    /// One error-level entry on the default channel per failed write, never
    /// recursing into further failure reports.
    fn report_sink_failure(&self, sink_name: &str, error: &dyn std::error::Error) {
        let report = normalize(
            Value::String(format!("Sink '{sink_name}' write failed: {error}")),
            Vec::new(),
        );
        self.dispatch(Channel::Default, report, false);
    }

    fn lane(&self, channel: Channel) -> &Mutex<Vec<Arc<dyn Sink>>> {
        match channel {
            Channel::Default => &self.default_sinks,
            Channel::Http => &self.http_sinks,
        }
    }
}

impl Default for LogRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::sink::SinkError;
    use crate::severity::Severity;
    use crate::sinks::memory::MemorySink;

    /// Sink that fails every write.
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn threshold(&self) -> Severity {
            Severity::Silly
        }

        fn write(&self, _entry: &LogEntry) -> Result<(), SinkError> {
            Err(SinkError::Transport("connection reset".to_string()))
        }
    }

    #[test]
    fn test_admission_by_threshold() {
        let router = LogRouter::new();
        let errors_only = Arc::new(MemorySink::new(Severity::Error));
        let everything = Arc::new(MemorySink::new(Severity::Silly));
        router.register(Channel::Default, errors_only.clone());
        router.register(Channel::Default, everything.clone());

        router.route(Channel::Default, LogEntry::new(Severity::Warn, "careful"));
        router.route(Channel::Default, LogEntry::new(Severity::Error, "broken"));

        assert_eq!(errors_only.entries().len(), 1);
        assert_eq!(errors_only.entries()[0].message, "broken");
        assert_eq!(everything.entries().len(), 2);
    }

    #[test]
    fn test_sink_count_is_per_channel() {
        let router = LogRouter::new();
        assert_eq!(router.sink_count(Channel::Default), 0);

        router.register(Channel::Default, Arc::new(MemorySink::new(Severity::Silly)));
        router.register(Channel::Default, Arc::new(MemorySink::new(Severity::Error)));
        router.register(Channel::Http, Arc::new(MemorySink::new(Severity::Silly)));

        assert_eq!(router.sink_count(Channel::Default), 2);
        assert_eq!(router.sink_count(Channel::Http), 1);
    }

    #[test]
    fn test_channels_are_independent() {
        let router = LogRouter::new();
        let default_sink = Arc::new(MemorySink::new(Severity::Silly));
        let http_sink = Arc::new(MemorySink::new(Severity::Silly));
        router.register(Channel::Default, default_sink.clone());
        router.register(Channel::Http, http_sink.clone());

        router.route(Channel::Http, LogEntry::new(Severity::Info, "GET 200"));

        assert!(default_sink.entries().is_empty());
        assert_eq!(http_sink.entries().len(), 1);
    }

    #[test]
    fn test_late_sink_misses_earlier_entries() {
        let router = LogRouter::new();
        let early = Arc::new(MemorySink::new(Severity::Silly));
        router.register(Channel::Default, early.clone());

        router.route(Channel::Default, LogEntry::new(Severity::Info, "first"));

        let late = Arc::new(MemorySink::new(Severity::Silly));
        router.register(Channel::Default, late.clone());
        router.route(Channel::Default, LogEntry::new(Severity::Info, "second"));

        assert_eq!(early.entries().len(), 2);
        assert_eq!(late.entries().len(), 1);
        assert_eq!(late.entries()[0].message, "second");
    }

    #[test]
    fn test_failing_sink_reported_without_halting_dispatch() {
        let router = LogRouter::new();
        let witness = Arc::new(MemorySink::new(Severity::Silly));
        router.register(Channel::Http, Arc::new(BrokenSink));
        router.register(Channel::Http, witness.clone());
        let report_sink = Arc::new(MemorySink::new(Severity::Error));
        router.register(Channel::Default, report_sink.clone());

        router.route(Channel::Http, LogEntry::new(Severity::Info, "GET 200"));

        // The healthy sink behind the broken one still got the entry.
        assert_eq!(witness.entries().len(), 1);

        // The failure landed as one error entry on the default channel.
        let reports = report_sink.entries();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].level, Severity::Error);
        assert!(reports[0].message.contains("broken"));

        // The report's trace points at the caller, not at the dispatch and
        // normalization machinery that produced it.
        let stack = reports[0].stack.as_deref().unwrap();
        for line in stack.lines().skip(1) {
            assert!(!line.contains("routing/router.rs"));
            assert!(!line.contains("src/normalize.rs"));
        }
    }

    #[test]
    fn test_failing_default_sink_does_not_recurse() {
        let router = LogRouter::new();
        router.register(Channel::Default, Arc::new(BrokenSink));

        // A failing default sink would loop forever if reporting recursed.
        router.route(Channel::Default, LogEntry::new(Severity::Error, "boom"));
    }

    #[test]
    fn test_registration_order_is_dispatch_order() {
        let router = LogRouter::new();
        let shared = Arc::new(MemorySink::new(Severity::Silly));
        router.register(Channel::Default, shared.clone());
        router.route(Channel::Default, LogEntry::new(Severity::Info, "a"));
        router.route(Channel::Default, LogEntry::new(Severity::Info, "b"));

        let messages: Vec<String> = shared.entries().iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages, ["a", "b"]);
    }
}
