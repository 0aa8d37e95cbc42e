//! Resolves declarative sink specs into registered sinks.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::{LoggerConfig, SinkSpec};
use crate::logger::Logger;
use crate::routing::Channel;
use crate::sinks::console::{ConsoleSink, LineFormat};
use crate::sinks::remote::RemoteStoreSink;

/// Resolve every spec in the configuration and register the resulting sinks.
///
/// Console sinks register synchronously. Remote sinks connect from a spawned
/// task and register themselves once the endpoint answers; until then routed
/// entries pass them by. A failed connection is reported through the logger's
/// error path and the sink is never registered.
pub fn install(config: &LoggerConfig, logger: &Logger) {
    for spec in config.resolved_sinks() {
        match spec {
            SinkSpec::Console { threshold } => {
                let threshold = threshold.unwrap_or(config.level);
                logger.router().register(
                    Channel::Default,
                    Arc::new(ConsoleSink::new(threshold, LineFormat::Simple)),
                );
                logger.router().register(
                    Channel::Http,
                    Arc::new(ConsoleSink::new(threshold, LineFormat::Http)),
                );
            }
            SinkSpec::RemoteStore { url, threshold } => {
                let threshold = threshold.unwrap_or(config.level);
                let logger = logger.clone();
                tokio::spawn(async move {
                    match RemoteStoreSink::connect(&url, threshold).await {
                        Ok(sink) => {
                            let sink: Arc<RemoteStoreSink> = Arc::new(sink);
                            logger.router().register(Channel::Default, sink.clone());
                            logger.router().register(Channel::Http, sink);
                        }
                        Err(error) => {
                            logger.error(
                                Value::String(format!(
                                    "Remote store sink setup failed for {url}: {error}"
                                )),
                                vec![json!({ "endpoint": url })],
                            );
                        }
                    }
                });
            }
        }
    }
}
