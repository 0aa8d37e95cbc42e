//! Severity levels and the sink admission rule.
//!
//! # Responsibilities
//! - Define the closed, totally-ordered severity set
//! - Provide the rank used by routing decisions
//! - Parse severity names from configuration
//!
//! # Design Decisions
//! - Rank 0 is the most severe (`error`); a sink with threshold T admits
//!   level L iff rank(L) <= rank(T)
//! - Parsing is case-sensitive; fallback handling lives in the config layer

use serde::{Deserialize, Serialize};

/// Log severity, ordered `error > warn > info > verbose > debug > silly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warn,
    Info,
    Verbose,
    Debug,
    Silly,
}

impl Severity {
    /// Numeric rank; lower means more severe.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warn => 1,
            Severity::Info => 2,
            Severity::Verbose => 3,
            Severity::Debug => 4,
            Severity::Silly => 5,
        }
    }

    /// Returns true if a sink configured with this threshold accepts `level`.
    ///
    /// A threshold of `info` accepts `error`, `warn` and `info`; it rejects
    /// `verbose` and below.
    pub fn admits(self, level: Severity) -> bool {
        level.rank() <= self.rank()
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Verbose => "verbose",
            Severity::Debug => "debug",
            Severity::Silly => "silly",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warn" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "verbose" => Ok(Severity::Verbose),
            "debug" => Ok(Severity::Debug),
            "silly" => Ok(Severity::Silly),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// Error returned when a severity name is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeverity(pub String);

impl std::fmt::Display for UnknownSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown severity: {}", self.0)
    }
}

impl std::error::Error for UnknownSeverity {}
