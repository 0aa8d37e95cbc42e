//! Stack trace synthesis subsystem.
//!
//! # Data Flow
//! ```text
//! normalize() needs a stack
//!     → synthesizer.rs (capture current call stack)
//!     → frame.rs (frame text + optional origin path)
//!     → filter out frames from the logging infrastructure itself
//!     → "Error: <message>" header + "    at <frame>" lines
//! ```
//!
//! # Design Decisions
//! - Frames whose origin cannot be resolved are kept unconditionally
//! - Filtering is a substring match on the origin path, so it works for
//!   both debug and release build layouts
//! - A trace reduced to its header line is valid output, not an error

pub mod frame;
pub mod synthesizer;

pub use frame::StackFrame;
pub use synthesizer::{synthesize, SynthesizedTrace};
