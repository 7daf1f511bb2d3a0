use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Diagnostic logging configuration
///
/// Logs go to stderr; the test report itself is always written to stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log line format
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    Compact,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError("observability.log_level cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl WithDefaults for ObservabilityConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
