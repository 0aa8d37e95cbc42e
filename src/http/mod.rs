//! HTTP instrumentation subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → middleware.rs (monotonic sample, buffer request body)
//!     → inner service runs
//!     → middleware.rs (buffer response body, jsonMessage hook)
//!     → latency.rs (sample diff, carry normalization)
//!     → identity.rs (bearer token → caller identity or sentinel)
//!     → record.rs (status classification, redaction, HttpRequestRecord)
//!     → Logger.http() on the http channel
//! ```
//!
//! # Design Decisions
//! - The middleware only observes; the caller never sees an instrumentation
//!   failure, every error degrades to sentinel or fallback values
//! - Emission is spawned after the response is assembled so it cannot delay
//!   delivery to the client
//! - Health-check probes are suppressed entirely to avoid log flooding

pub mod identity;
pub mod latency;
pub mod middleware;
pub mod record;

pub use identity::{decode_caller_identity, CallerIdentity, NO_TOKEN_SENTINEL};
pub use latency::{monotonic_sample, Latency, MonotonicSample};
pub use middleware::{http_log_middleware, HttpLogState};
pub use record::{classify_status, redact_body, HttpRequestRecord};
