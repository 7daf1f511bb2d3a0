use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Bearer token override for authenticated-endpoint cases
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Pre-issued bearer token; when set, the live login is skipped
    #[serde(default)]
    pub token: Option<String>,
    /// Plain environment variable read once at load time when `token` is unset
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "BUDGETWISE_TEST_JWT".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env: default_token_env(),
        }
    }
}

impl AuthConfig {
    /// Settle the override token: configured value first, then `token_env`.
    /// Blank tokens count as absent.
    pub(crate) fn resolve(&mut self, vars: &HashMap<String, String>) {
        let configured = self.token.take().filter(|token| !token.trim().is_empty());

        self.token = configured.or_else(|| {
            if self.token_env.is_empty() {
                return None;
            }

            vars.get(&self.token_env)
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
        });
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

// Keep the token out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("token_env", &self.token_env)
            .finish()
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(token) = &self.token {
            if token.chars().any(char::is_whitespace) {
                return Err(ConfigError::ValidationError("auth.token cannot contain whitespace".to_string()));
            }
        }
        Ok(())
    }
}

impl WithDefaults for AuthConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
