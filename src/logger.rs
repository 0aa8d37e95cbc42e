//! The injectable logging facade.
//!
//! # Responsibilities
//! - Own the router handle passed to call sites
//! - Expose `log`, `error` and `http` entry points
//! - Resolve the configured sink set at startup
//!
//! # Design Decisions
//! - Explicitly constructed and cloned into call sites; no process-wide
//!   global. Cloning is cheap (one `Arc`).
//! - `init` must run inside a Tokio runtime: remote sinks connect from
//!   spawned tasks and register themselves when ready.

use std::sync::Arc;

use serde_json::Value;

use crate::config::LoggerConfig;
use crate::entry::{LogEntry, Metadata};
use crate::normalize::normalize;
use crate::routing::{Channel, LogRouter};
use crate::severity::Severity;
use crate::sinks::factory;

/// Handle to the routing core. Lives for the whole process; clone it into
/// every component that logs.
#[derive(Clone)]
pub struct Logger {
    router: Arc<LogRouter>,
}

impl Logger {
    /// Wrap an existing router. Useful for tests that register their own
    /// capture sinks.
    pub fn new(router: Arc<LogRouter>) -> Self {
        Self { router }
    }

    /// Build a logger and resolve the configured sink set.
    pub fn init(config: &LoggerConfig) -> Self {
        let logger = Self::new(Arc::new(LogRouter::new()));
        factory::install(config, &logger);
        logger
    }

    /// Router access for dynamic sink registration.
    pub fn router(&self) -> &Arc<LogRouter> {
        &self.router
    }

    /// Route an entry on the default channel.
    pub fn log(&self, level: Severity, message: impl Into<String>, metadata: Metadata) {
        self.router.route(
            Channel::Default,
            LogEntry::new(level, message).with_metadata(metadata),
        );
    }

    /// Normalize any value into an error-level entry and route it on the
    /// default channel. Accepts primitives, partially-formed error objects
    /// and objects that already carry a stack.
    pub fn error(&self, value: Value, extra: Vec<Value>) {
        self.router.route(Channel::Default, normalize(value, extra));
    }

    /// Route an entry on the http channel. Used by the instrumentation
    /// middleware for access records.
    pub fn http(&self, level: Severity, message: impl Into<String>, metadata: Metadata) {
        self.router.route(
            Channel::Http,
            LogEntry::new(level, message).with_metadata(metadata),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::memory::MemorySink;
    use serde_json::json;

    fn capture() -> (Logger, Arc<MemorySink>) {
        let logger = Logger::new(Arc::new(LogRouter::new()));
        let sink = Arc::new(MemorySink::new(Severity::Silly));
        logger.router().register(Channel::Default, sink.clone());
        (logger, sink)
    }

    #[test]
    fn test_log_routes_on_default_channel() {
        let (logger, sink) = capture();
        logger.log(Severity::Info, "ready", Metadata::new());

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "ready");
        assert!(entries[0].stack.is_none());
    }

    #[test]
    fn test_error_normalizes_primitives() {
        let (logger, sink) = capture();
        logger.error(json!("disk full"), Vec::new());

        let entries = sink.entries();
        assert_eq!(entries[0].level, Severity::Error);
        assert_eq!(entries[0].message, "disk full");
        let stack = entries[0].stack.as_deref().unwrap();
        assert!(stack.starts_with("Error: disk full"));
    }

    #[test]
    fn test_http_channel_is_separate() {
        let (logger, default_sink) = capture();
        let http_sink = Arc::new(MemorySink::new(Severity::Silly));
        logger.router().register(Channel::Http, http_sink.clone());

        logger.http(Severity::Info, "GET 200", Metadata::new());

        assert!(default_sink.entries().is_empty());
        assert_eq!(http_sink.entries().len(), 1);
    }
}
