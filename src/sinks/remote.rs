//! Asynchronous document-store sink.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::entry::LogEntry;
use crate::routing::sink::{Sink, SinkError};
use crate::severity::Severity;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Forwards entries to a remote document store over HTTP.
///
/// `write` only enqueues; a background task POSTs each entry as JSON. Push
/// failures are logged on the crate's own tracing stream and the entry is
/// dropped, matching the fire-and-forget routing contract.
pub struct RemoteStoreSink {
    threshold: Severity,
    queue: mpsc::UnboundedSender<LogEntry>,
}

impl RemoteStoreSink {
    /// Probe the endpoint and spawn the flush task.
    ///
    /// The sink is only handed back (and can only be registered) once the
    /// store answered the probe, so a misconfigured URL fails here instead of
    /// silently swallowing entries.
    pub async fn connect(url: &str, threshold: Severity) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|error| SinkError::Transport(error.to_string()))?;

        client
            .get(url)
            .send()
            .await
            .map_err(|error| SinkError::Transport(format!("probe failed: {error}")))?;

        let (queue, mut pending) = mpsc::unbounded_channel::<LogEntry>();
        let endpoint = url.to_string();

        tokio::spawn(async move {
            while let Some(entry) = pending.recv().await {
                let result = client.post(&endpoint).json(&entry).send().await;
                match result {
                    Ok(response) if !response.status().is_success() => {
                        tracing::warn!(
                            status = %response.status(),
                            endpoint = %endpoint,
                            "remote store rejected entry"
                        );
                    }
                    Err(error) => {
                        tracing::warn!(%error, endpoint = %endpoint, "remote store push failed");
                    }
                    Ok(_) => {}
                }
            }
        });

        tracing::info!(endpoint = %url, "remote store sink connected");
        Ok(Self { threshold, queue })
    }
}

impl Sink for RemoteStoreSink {
    fn name(&self) -> &'static str {
        "remote_store"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, entry: &LogEntry) -> Result<(), SinkError> {
        self.queue
            .send(entry.clone())
            .map_err(|_| SinkError::Closed)
    }
}
