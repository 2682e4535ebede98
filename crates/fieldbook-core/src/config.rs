use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.scheduling-provider.example/v1/";
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    use chrono_tz::Tz;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let provider_api_key = require("FIELDBOOK_PROVIDER_API_KEY")?;

    let env = parse_environment(&or_default("FIELDBOOK_ENV", "development"));

    let bind_addr = or_default("FIELDBOOK_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("FIELDBOOK_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("FIELDBOOK_LOG_LEVEL", "info");

    let provider_base_url = or_default("FIELDBOOK_PROVIDER_BASE_URL", DEFAULT_PROVIDER_BASE_URL);
    let geocoder_base_url = or_default("FIELDBOOK_GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL);
    let geocoder_api_key = lookup("FIELDBOOK_GEOCODER_API_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let provider_timeout_secs = parse_u64("FIELDBOOK_PROVIDER_TIMEOUT_SECS", "10")?;
    if provider_timeout_secs == 0 {
        return Err(invalid(
            "FIELDBOOK_PROVIDER_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let provider_max_retries = parse_u32("FIELDBOOK_PROVIDER_MAX_RETRIES", "1")?;

    let reference_tz = or_default("FIELDBOOK_REFERENCE_TZ", "America/Los_Angeles")
        .parse::<Tz>()
        .map_err(|e| invalid("FIELDBOOK_REFERENCE_TZ", e.to_string()))?;

    let default_duration_minutes = parse_u32("FIELDBOOK_DEFAULT_DURATION_MINUTES", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider_base_url,
        provider_api_key,
        geocoder_base_url,
        geocoder_api_key,
        provider_timeout_secs,
        provider_max_retries,
        reference_tz,
        default_duration_minutes,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
