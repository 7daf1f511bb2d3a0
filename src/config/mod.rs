pub mod app;
pub mod auth;
pub mod observability;
pub mod target;

pub use app::{AppMetadata, HarnessConfig};
pub use auth::AuthConfig;
pub use observability::{LogFormat, ObservabilityConfig};
pub use target::TargetConfig;

use std::collections::HashMap;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Checks a configuration section for values the harness cannot run with
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Builds a configuration section entirely from its defaults
pub trait WithDefaults {
    fn with_defaults() -> Self;
}

/// Load the harness configuration from files and the process environment
pub fn load() -> Result<HarnessConfig, ConfigError> {
    app::load_config(std::env::vars().collect())
}

/// Load the harness configuration using an explicit set of environment variables
///
/// The map stands in for the process environment, both for the
/// `AUTH_SMOKE__*` overrides and for the plain token variable.
pub fn load_with_env(vars: HashMap<String, String>) -> Result<HarnessConfig, ConfigError> {
    app::load_config(vars)
}
