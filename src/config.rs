//! Logger configuration.
//!
//! # Data Flow
//! ```text
//! environment (LOG_LEVEL, ENVIRONMENT_PROFILE, REMOTE_LOG_STORE_URL)
//!     → from_env() (parse, fall back, resolve profile defaults)
//! or
//! TOML file
//!     → load_config() (parse & deserialize)
//!     → LoggerConfig (immutable after startup)
//!     → sink factory resolves the declarative sink list
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - An unrecognized LOG_LEVEL falls back to `info` with a stderr
//!   diagnostic; startup never halts on a bad level name
//! - Sinks are declared as data (`SinkSpec`) and resolved exactly once

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Paths excluded from HTTP access logging (liveness/readiness probes).
pub const DEFAULT_SUPPRESSED_PATHS: [&str; 2] = ["/api/liveness_check", "/api/readiness_check"];

/// Endpoint whose attempted login identifier is attached to access records.
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";

/// Which default sink set gets constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
    #[default]
    Development,
    Production,
}

/// Declarative sink description, resolved by the factory at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkSpec {
    /// Synchronous stdout sink; simple lines on the default channel, the
    /// access-log line format on the http channel.
    Console {
        #[serde(default)]
        threshold: Option<Severity>,
    },
    /// Asynchronous document-store sink registered on both channels once its
    /// connection setup succeeds.
    RemoteStore {
        url: String,
        #[serde(default)]
        threshold: Option<Severity>,
    },
}

/// Root logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Threshold applied to sinks that do not override it.
    pub level: Severity,

    /// Selects the default sink set when `sinks` is empty.
    pub profile: EnvironmentProfile,

    /// Optional document-store endpoint for the remote sink.
    pub remote_store_url: Option<String>,

    /// Declarative sink list; empty means "use the profile defaults".
    pub sinks: Vec<SinkSpec>,

    /// Request paths excluded from HTTP access logging.
    pub suppressed_paths: Vec<String>,

    /// Login endpoint audited with the attempted identifier.
    pub login_path: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            profile: EnvironmentProfile::Development,
            remote_store_url: None,
            sinks: Vec::new(),
            suppressed_paths: DEFAULT_SUPPRESSED_PATHS
                .iter()
                .map(|path| path.to_string())
                .collect(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Assemble a configuration from the process environment.
    ///
    /// Recognized variables: `LOG_LEVEL`, `ENVIRONMENT_PROFILE`,
    /// `REMOTE_LOG_STORE_URL`.
    pub fn from_env() -> Self {
        let level = match std::env::var("LOG_LEVEL") {
            Ok(name) => parse_level(&name),
            Err(_) => Severity::Info,
        };

        let profile = match std::env::var("ENVIRONMENT_PROFILE").as_deref() {
            Ok("production") => EnvironmentProfile::Production,
            _ => EnvironmentProfile::Development,
        };

        Self {
            level,
            profile,
            remote_store_url: std::env::var("REMOTE_LOG_STORE_URL").ok(),
            ..Self::default()
        }
    }

    /// The sink list the factory will resolve: the declared list, or the
    /// profile defaults when nothing was declared.
    pub fn resolved_sinks(&self) -> Vec<SinkSpec> {
        if !self.sinks.is_empty() {
            return self.sinks.clone();
        }

        let mut sinks = vec![SinkSpec::Console { threshold: None }];
        if self.profile == EnvironmentProfile::Production {
            if let Some(url) = &self.remote_store_url {
                sinks.push(SinkSpec::RemoteStore {
                    url: url.clone(),
                    threshold: None,
                });
            }
        }
        sinks
    }
}

/// Parse a severity name, falling back to `info` with a stderr diagnostic on
/// anything outside the closed set.
pub fn parse_level(name: &str) -> Severity {
    match name.parse() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("Bad log level passed: {name}");
            Severity::Info
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LoggerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_falls_back_to_info() {
        assert_eq!(parse_level("debug"), Severity::Debug);
        assert_eq!(parse_level("LOUD"), Severity::Info);
        assert_eq!(parse_level(""), Severity::Info);
    }

    #[test]
    fn test_development_defaults_to_console_only() {
        let config = LoggerConfig::default();
        assert_eq!(
            config.resolved_sinks(),
            vec![SinkSpec::Console { threshold: None }]
        );
    }

    #[test]
    fn test_production_adds_remote_store_when_url_present() {
        let config = LoggerConfig {
            profile: EnvironmentProfile::Production,
            remote_store_url: Some("http://store.internal/logs".to_string()),
            ..LoggerConfig::default()
        };

        let sinks = config.resolved_sinks();
        assert_eq!(sinks.len(), 2);
        assert_eq!(
            sinks[1],
            SinkSpec::RemoteStore {
                url: "http://store.internal/logs".to_string(),
                threshold: None,
            }
        );
    }

    #[test]
    fn test_declared_sinks_override_profile_defaults() {
        let config = LoggerConfig {
            profile: EnvironmentProfile::Production,
            remote_store_url: Some("http://store.internal/logs".to_string()),
            sinks: vec![SinkSpec::Console {
                threshold: Some(Severity::Error),
            }],
            ..LoggerConfig::default()
        };

        assert_eq!(
            config.resolved_sinks(),
            vec![SinkSpec::Console {
                threshold: Some(Severity::Error),
            }]
        );
    }

    #[test]
    fn test_load_config_reads_toml_file() {
        let path = std::env::temp_dir().join(format!("log-relay-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "level = \"debug\"\nlogin_path = \"/api/v2/login\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.login_path, "/api/v2/login");
        assert_eq!(config.profile, EnvironmentProfile::Development);
    }

    #[test]
    fn test_load_config_missing_file_is_io_error() {
        let result = load_config(Path::new("/nonexistent/logger.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let text = r#"
            level = "warn"
            profile = "production"
            suppressed_paths = ["/healthz"]

            [[sinks]]
            kind = "console"
            threshold = "debug"

            [[sinks]]
            kind = "remote_store"
            url = "http://store.internal/logs"
        "#;

        let config: LoggerConfig = toml::from_str(text).unwrap();
        assert_eq!(config.level, Severity::Warn);
        assert_eq!(config.profile, EnvironmentProfile::Production);
        assert_eq!(config.suppressed_paths, ["/healthz"]);
        assert_eq!(config.sinks.len(), 2);
        assert_eq!(config.login_path, DEFAULT_LOGIN_PATH);
    }
}
