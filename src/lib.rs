//! Structured logging and HTTP instrumentation for a web service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  LOG RELAY                   │
//!                      │                                              │
//!   error(value, ..)   │  ┌───────────┐      ┌───────────────────┐    │
//!   ──────────────────▶│  │ normalize │─────▶│ trace synthesizer │    │
//!                      │  └─────┬─────┘      └───────────────────┘    │
//!                      │        │                                     │
//!   log(level, ..)     │        ▼              "default" channel      │
//!   ──────────────────▶│  ┌───────────┐      ┌──────────────────┐     │
//!                      │  │  router   │─────▶│ sinks (threshold)│     │
//!   HTTP middleware    │  └───────────┘      └──────────────────┘     │
//!   ──────────────────▶│        │              "http" channel         │
//!                      │        └────────────▶ sinks (threshold)      │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Sinks are opaque collaborators (console, remote document store); the
//! router only knows their severity threshold and write contract.

// Core pipeline
pub mod entry;
pub mod normalize;
pub mod severity;
pub mod trace;

// Routing and destinations
pub mod routing;
pub mod sinks;

// HTTP instrumentation
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod logger;

pub use config::{EnvironmentProfile, LoggerConfig, SinkSpec};
pub use entry::{LogEntry, Metadata};
pub use http::{http_log_middleware, HttpLogState};
pub use logger::Logger;
pub use routing::{Channel, LogRouter, Sink, SinkError};
pub use severity::Severity;
