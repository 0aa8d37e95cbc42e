//! Synchronous console sink.

use std::io::Write;

use serde_json::Value;

use crate::entry::LogEntry;
use crate::routing::sink::{Sink, SinkError};
use crate::severity::Severity;

/// How a console line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// `level: message` plus the stack on its own lines.
    Simple,
    /// One-line access-log rendering of an HTTP record entry.
    Http,
}

/// Writes entries to stdout, one line (or stack block) per entry.
pub struct ConsoleSink {
    threshold: Severity,
    format: LineFormat,
}

impl ConsoleSink {
    pub fn new(threshold: Severity, format: LineFormat) -> Self {
        Self { threshold, format }
    }

    fn render(&self, entry: &LogEntry) -> String {
        match self.format {
            LineFormat::Simple => render_simple(entry),
            LineFormat::Http => render_http(entry),
        }
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let line = self.render(entry);
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{line}")?;
        Ok(())
    }
}

/// When an error entry carries a stack, the stack already contains the
/// message header and replaces it.
fn render_simple(entry: &LogEntry) -> String {
    match &entry.stack {
        Some(stack) => format!("{}: {}", entry.level, stack),
        None => format!("{}: {}", entry.level, entry.message),
    }
}

/// `level: METHOD status size latency ms url (jsonMessage)`, falling back to
/// the simple format for entries without an HTTP record.
fn render_http(entry: &LogEntry) -> String {
    let record = match entry.metadata.get("httpRequest") {
        Some(Value::Object(record)) => record,
        _ => return render_simple(entry),
    };

    let method = record
        .get("requestMethod")
        .and_then(Value::as_str)
        .unwrap_or("-");
    let status = record.get("status").and_then(Value::as_u64).unwrap_or(0);
    let url = record.get("requestUrl").and_then(Value::as_str).unwrap_or("-");
    let size = record
        .get("responseSize")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let millis = record
        .get("latency")
        .and_then(|latency| {
            let seconds = latency.get("seconds")?.as_i64()?;
            let nanos = latency.get("nanos")?.as_i64()?;
            Some(seconds as f64 * 1e3 + nanos as f64 / 1e6)
        })
        .unwrap_or(0.0);

    let mut line = format!(
        "{}: {} {} {} {:.3} ms {}",
        entry.level,
        method,
        status,
        human_file_size(size),
        millis,
        url
    );
    if let Some(message) = entry.metadata.get("jsonMessage").and_then(Value::as_str) {
        line.push_str(&format!(" ({message})"));
    }
    line
}

/// Human-readable byte size, SI units.
pub fn human_file_size(bytes: u64) -> String {
    const THRESH: f64 = 1000.0;
    const UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

    let mut size = bytes as f64;
    if size < THRESH {
        return format!("{bytes} B");
    }

    let mut unit = 0;
    loop {
        size /= THRESH;
        if size < THRESH || unit == UNITS.len() - 1 {
            break;
        }
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
