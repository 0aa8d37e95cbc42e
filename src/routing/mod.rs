//! Log routing subsystem.
//!
//! # Data Flow
//! ```text
//! Logger facade / HTTP middleware
//!     → router.rs (channel lookup, severity admission)
//!     → sink.rs (Sink trait, per-sink threshold)
//!     → console / remote / memory sink implementations
//! ```
//!
//! # Design Decisions
//! - Two fixed channels (`default`, `http`), each with its own sink list
//! - Sinks are append-only after registration; never removed at runtime
//! - Entries routed before a sink registered are not redelivered
//! - Sink writes are fire-and-forget; a failure is reported on the default
//!   channel and never halts dispatch to the remaining sinks

pub mod router;
pub mod sink;

pub use router::{Channel, LogRouter};
pub use sink::{Sink, SinkError};
