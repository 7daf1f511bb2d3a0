use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    AuthConfig, ConfigError, ObservabilityConfig, TargetConfig, Validate, WithDefaults,
};

/// Prefix for environment variable overrides, e.g. `AUTH_SMOKE__TARGET__BASE_URL`
pub const ENV_PREFIX: &str = "AUTH_SMOKE";

/// Top-level harness configuration that aggregates all config modules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Application metadata
    #[serde(default)]
    pub app: AppMetadata,
    /// Service under test (base URL, timeouts)
    #[serde(default)]
    pub target: TargetConfig,
    /// Bearer token override
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Suite name shown in the report banner
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Harness version
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Environment the target runs in, logged at the start of a run
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_app_name() -> String {
    "Auth API".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: default_environment(),
        }
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.version.is_empty() {
            return Err(ConfigError::ValidationError("app.version cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError("app.environment cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.target.validate()?;
        self.auth.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl WithDefaults for HarnessConfig {
    fn with_defaults() -> Self {
        Self {
            app: AppMetadata::default(),
            target: TargetConfig::with_defaults(),
            auth: AuthConfig::with_defaults(),
            observability: ObservabilityConfig::with_defaults(),
        }
    }
}

impl HarnessConfig {
    /// Defaults pointed at a different base URL
    pub fn for_target(base_url: impl Into<String>) -> Self {
        let mut config = Self::with_defaults();
        config.target.base_url = base_url.into();
        config.target.normalize();
        config
    }
}

/// Load configuration from files and the given environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: AUTH_SMOKE__TARGET__BASE_URL=http://localhost:9000
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/staging/production)
/// 4. config/default.toml (base defaults)
///
/// When no token is configured, the variable named by `auth.token_env` is
/// consulted once here so the rest of the harness never reads the environment.
pub fn load_config(vars: HashMap<String, String>) -> Result<HarnessConfig, ConfigError> {
    use config::{Config, Environment, File};

    let env = vars
        .get("APP_ENV")
        .cloned()
        .unwrap_or_else(|| "development".to_string());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(Some(vars.clone())),
        )
        .build()?;

    let mut harness_config: HarnessConfig = config.try_deserialize()?;

    harness_config.target.normalize();
    harness_config.auth.resolve(&vars);
    harness_config.validate()?;

    Ok(harness_config)
}
