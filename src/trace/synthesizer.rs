//! Call-stack capture, filtering and formatting.

use backtrace::Backtrace;

use super::frame::StackFrame;

/// Origin-path fragments that identify the logging infrastructure's own
/// frames. Anything resolving into these files is noise for the reader of a
/// synthesized trace: the synthesizer, the normalizer and router that call
/// it, and the facade. The `backtrace` fragment covers the capture machinery.
const INFRA_ORIGINS: [&str; 5] = [
    "trace/synthesizer.rs",
    "src/normalize.rs",
    "routing/router.rs",
    "src/logger.rs",
    "/backtrace-",
];

/// A synthesized trace: the rendered display string plus the surviving frames.
#[derive(Debug, Clone)]
pub struct SynthesizedTrace {
    /// `"Error: <message>"` followed by one `"    at <frame>"` line per frame.
    pub display: String,

    /// Frames that survived infrastructure filtering, caller-first.
    pub frames: Vec<StackFrame>,
}

/// Capture the current call stack, drop infrastructure frames and render the
/// result. Deterministic for an identical call stack; no side effects.
pub fn synthesize(message: &str) -> SynthesizedTrace {
    let frames = filter_frames(capture());
    let display = format_trace(message, &frames);
    SynthesizedTrace { display, frames }
}

/// Drop frames originating in the logging infrastructure itself.
///
/// Frames without a resolvable origin (native or stripped frames) are kept
/// unconditionally.
pub(crate) fn filter_frames(frames: Vec<StackFrame>) -> Vec<StackFrame> {
    frames
        .into_iter()
        .filter(|frame| match frame.origin() {
            Some(origin) => !INFRA_ORIGINS.iter().any(|infra| origin.contains(infra)),
            None => true,
        })
        .collect()
}

/// Render the display string. An empty frame list yields only the header.
pub(crate) fn format_trace(message: &str, frames: &[StackFrame]) -> String {
    let mut lines = Vec::with_capacity(frames.len() + 1);
    lines.push(format!("Error: {message}"));
    for frame in frames {
        lines.push(format!("    at {frame}"));
    }
    lines.join("\n")
}

fn capture() -> Vec<StackFrame> {
    let backtrace = Backtrace::new();
    let mut frames = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let origin = symbol.filename().map(|path| path.display().to_string());
            let name = symbol
                .name()
                .map(|name| name.to_string())
                .unwrap_or_else(|| "<unresolved>".to_string());

            let display = match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(line)) => format!("{} ({}:{})", name, file.display(), line),
                _ => name,
            };

            frames.push(StackFrame::new(display, origin));
        }
    }

    frames
}
