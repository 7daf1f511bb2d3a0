use tracing_subscriber::EnvFilter;

use crate::config::{HarnessConfig, LogFormat, ObservabilityConfig};

/// Initialize diagnostic logging with tracing-subscriber.
///
/// Uses the `RUST_LOG` env var if set, otherwise falls back to the configured
/// level. Events go to stderr so they never interleave with the report on stdout.
pub fn init(config: &ObservabilityConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (tests, embedding); keep it.
    let result = match config.log_format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}

/// Record the effective configuration once logging is up
pub fn log_loaded(config: &HarnessConfig) {
    tracing::debug!(
        base_url = %config.target.base_url,
        environment = %config.app.environment,
        timeout_secs = config.target.timeout,
        token_override = config.auth.token().is_some(),
        "Configuration loaded"
    );
}
