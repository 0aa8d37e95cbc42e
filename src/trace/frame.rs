//! A single captured call-stack frame.

/// One frame of a captured call stack.
///
/// Immutable once captured. The origin is the source path the frame resolved
/// to, when symbol information is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    display: String,
    origin: Option<String>,
}

impl StackFrame {
    /// Create a frame from its display text and optional origin path.
    pub fn new(display: impl Into<String>, origin: Option<String>) -> Self {
        Self {
            display: display.into(),
            origin,
        }
    }

    /// Source path this frame resolved to, if any.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl std::fmt::Display for StackFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}
