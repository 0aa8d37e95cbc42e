//! Concrete sink implementations and the startup factory.
//!
//! # Data Flow
//! ```text
//! LoggerConfig.sinks (declarative SinkSpec list)
//!     → factory.rs (resolve specs once at startup)
//!     → console.rs (synchronous stdout, simple or access-log line format)
//!     → remote.rs (asynchronous document store, queue + flush task)
//!     → memory.rs (in-process capture, test suites)
//! ```
//!
//! # Design Decisions
//! - Console sinks register synchronously; remote sinks connect from a
//!   spawned task and register themselves when the endpoint answers
//! - Connection failures surface through the logger's error path, never as
//!   a startup failure

pub mod console;
pub mod factory;
pub mod memory;
pub mod remote;

pub use console::{ConsoleSink, LineFormat};
pub use memory::MemorySink;
pub use remote::RemoteStoreSink;
