//! Unit tests for configuration loading
//!
//! This test suite ensures the configuration system works correctly across
//! all scenarios including:
//! - Loading default configuration
//! - Environment-specific overrides
//! - Environment variable precedence
//! - Bearer token override resolution
//! - Invalid value detection

use auth_smoke::config::*;
use serial_test::serial;
use std::collections::HashMap;
use std::env;

// Test utilities for creating temporary config files
mod utils {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    /// Create a temporary config file with the given content
    pub fn create_temp_config(path: &str, content: &str) {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Remove a temporary config file
    pub fn remove_temp_config(path: &str) {
        let _ = fs::remove_file(path);
    }

    /// Clean up environment variables with the AUTH_SMOKE prefix
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("AUTH_SMOKE"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
    }

    pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

// =============================================================================
// Test 1: Loading Default Configuration Successfully
// =============================================================================

#[test]
#[serial]
fn test_load_default_config_success() {
    // A developer's config/local.toml is layered over the defaults
    if std::path::Path::new("config/local.toml").exists() {
        eprintln!("config/local.toml present, skipping default value checks");
        return;
    }

    let config = load_with_env(HashMap::new());

    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());

    let config = config.unwrap();

    assert_eq!(config.app.name, "Auth API");
    assert_eq!(config.app.environment, "development");

    assert_eq!(config.target.base_url, "http://localhost:8787");
    assert_eq!(config.target.timeout, 30);
    assert_eq!(config.target.connect_timeout, 5);
    assert_eq!(config.target.max_body_size, 2 * 1024 * 1024);

    assert!(config.auth.token.is_none());
    assert_eq!(config.auth.token_env, "BUDGETWISE_TEST_JWT");

    assert_eq!(config.observability.log_level, "warn");
    assert_eq!(config.observability.log_format, LogFormat::Compact);
}

// =============================================================================
// Test 2: Environment Variable Override
// =============================================================================

#[test]
#[serial]
fn test_env_var_overrides_target() {
    let config = load_with_env(utils::vars(&[
        ("AUTH_SMOKE__TARGET__BASE_URL", "https://api.example.com/"),
        ("AUTH_SMOKE__TARGET__TIMEOUT", "60"),
        ("AUTH_SMOKE__TARGET__CONNECT_TIMEOUT", "10"),
    ]))
    .unwrap();

    assert_eq!(config.target.base_url, "https://api.example.com");
    assert_eq!(config.target.timeout, 60);
    assert_eq!(config.target.connect_timeout, 10);
}

#[test]
#[serial]
fn test_env_var_overrides_app_name() {
    let config = load_with_env(utils::vars(&[("AUTH_SMOKE__APP__NAME", "Staging Auth")])).unwrap();

    assert_eq!(config.app.name, "Staging Auth");
}

#[test]
#[serial]
fn test_env_var_overrides_log_format() {
    let config = load_with_env(utils::vars(&[
        ("AUTH_SMOKE__OBSERVABILITY__LOG_FORMAT", "pretty"),
        ("AUTH_SMOKE__OBSERVABILITY__LOG_LEVEL", "debug"),
    ]))
    .unwrap();

    assert_eq!(config.observability.log_format, LogFormat::Pretty);
    assert_eq!(config.observability.log_level, "debug");
}

// =============================================================================
// Test 3: Bearer Token Override
// =============================================================================

#[test]
#[serial]
fn test_token_from_prefixed_env_var() {
    let config = load_with_env(utils::vars(&[("AUTH_SMOKE__AUTH__TOKEN", "abc.def.ghi")])).unwrap();

    assert_eq!(config.auth.token(), Some("abc.def.ghi"));
}

#[test]
#[serial]
fn test_token_from_token_env() {
    let config = load_with_env(utils::vars(&[("BUDGETWISE_TEST_JWT", "jwt-from-ci")])).unwrap();

    assert_eq!(config.auth.token(), Some("jwt-from-ci"));
}

#[test]
#[serial]
fn test_configured_token_beats_token_env() {
    let config = load_with_env(utils::vars(&[
        ("AUTH_SMOKE__AUTH__TOKEN", "explicit"),
        ("BUDGETWISE_TEST_JWT", "jwt-from-ci"),
    ]))
    .unwrap();

    assert_eq!(config.auth.token(), Some("explicit"));
}

#[test]
#[serial]
fn test_custom_token_env_name() {
    let config = load_with_env(utils::vars(&[
        ("AUTH_SMOKE__AUTH__TOKEN_ENV", "STAGING_JWT"),
        ("STAGING_JWT", "staging-token"),
        ("BUDGETWISE_TEST_JWT", "ignored"),
    ]))
    .unwrap();

    assert_eq!(config.auth.token(), Some("staging-token"));
}

#[test]
#[serial]
fn test_empty_token_env_value_is_absent() {
    let config = load_with_env(utils::vars(&[("BUDGETWISE_TEST_JWT", "")])).unwrap();

    assert!(config.auth.token().is_none());
}

// =============================================================================
// Test 4: Environment-Specific Files
// =============================================================================

#[test]
#[serial]
fn test_app_env_file_overrides_defaults() {
    let path = "config/unit-staging.toml";
    utils::create_temp_config(
        path,
        r#"
[app]
environment = "staging"

[target]
base_url = "https://staging.example.com"
"#,
    );

    let config = load_with_env(utils::vars(&[("APP_ENV", "unit-staging")]));
    utils::remove_temp_config(path);

    let config = config.unwrap();
    assert_eq!(config.app.environment, "staging");
    assert_eq!(config.target.base_url, "https://staging.example.com");
    // Untouched keys keep their defaults
    assert_eq!(config.target.timeout, 30);
}

#[test]
#[serial]
fn test_env_var_beats_environment_file() {
    let path = "config/unit-precedence.toml";
    utils::create_temp_config(
        path,
        r#"
[target]
base_url = "https://from-file.example.com"
"#,
    );

    let config = load_with_env(utils::vars(&[
        ("APP_ENV", "unit-precedence"),
        ("AUTH_SMOKE__TARGET__BASE_URL", "https://from-env.example.com"),
    ]));
    utils::remove_temp_config(path);

    assert_eq!(config.unwrap().target.base_url, "https://from-env.example.com");
}

// =============================================================================
// Test 5: Validation
// =============================================================================

#[test]
#[serial]
fn test_invalid_base_url_is_rejected() {
    let result = load_with_env(utils::vars(&[("AUTH_SMOKE__TARGET__BASE_URL", "localhost:8787")]));

    match result {
        Err(ConfigError::ValidationError(message)) => assert!(message.contains("target.base_url")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    let result = load_with_env(utils::vars(&[("AUTH_SMOKE__TARGET__TIMEOUT", "0")]));

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
#[serial]
fn test_non_numeric_timeout_is_a_load_error() {
    let result = load_with_env(utils::vars(&[("AUTH_SMOKE__TARGET__TIMEOUT", "soon")]));

    assert!(matches!(result, Err(ConfigError::Load(_))));
}

// =============================================================================
// Test 6: Process Environment
// =============================================================================

#[test]
#[serial]
fn test_load_reads_process_environment() {
    utils::clean_env_vars();
    unsafe {
        env::remove_var("APP_ENV");
        env::set_var("AUTH_SMOKE__TARGET__BASE_URL", "http://127.0.0.1:9999");
    };

    let config = load();

    utils::clean_env_vars();

    assert_eq!(config.unwrap().target.base_url, "http://127.0.0.1:9999");
}
