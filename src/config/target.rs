use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Service under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Maximum response body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2 MiB
}

fn default_user_agent() -> String {
    format!("auth-smoke/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            max_body_size: default_max_body_size(),
            user_agent: default_user_agent(),
        }
    }
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Full URL for a request path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Trim surrounding whitespace and trailing slashes so paths join cleanly
    pub(crate) fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = trimmed.to_string();
    }
}

impl Validate for TargetConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError("target.base_url cannot be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "target.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ConfigError::ValidationError("target.timeout must be > 0".to_string()));
        }
        if self.connect_timeout == 0 {
            return Err(ConfigError::ValidationError("target.connect_timeout must be > 0".to_string()));
        }
        if self.connect_timeout > self.timeout {
            return Err(ConfigError::ValidationError("target.connect_timeout must be <= timeout".to_string()));
        }
        if self.max_body_size == 0 {
            return Err(ConfigError::ValidationError("target.max_body_size must be > 0".to_string()));
        }
        Ok(())
    }
}

impl WithDefaults for TargetConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
