use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Does not read `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Kept separate from the process environment so tests can drive it from a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    let webhook_url = require("VERITHRAX_WEBHOOK_URL")?;
    validate_http_url("VERITHRAX_WEBHOOK_URL", &webhook_url)?;

    let site_url = or_default("VERITHRAX_SITE_URL", "http://localhost");
    validate_http_url("VERITHRAX_SITE_URL", &site_url)?;

    let env = parse_environment(&or_default("VERITHRAX_ENV", "development"))?;
    let bind_addr = parse_addr("VERITHRAX_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("VERITHRAX_LOG_LEVEL", "info");
    let settings_path = PathBuf::from(or_default(
        "VERITHRAX_SETTINGS_PATH",
        "./config/settings.yaml",
    ));
    let webhook_timeout_secs = parse_secs("VERITHRAX_WEBHOOK_TIMEOUT_SECS", "60")?;
    let woo_timeout_secs = parse_secs("VERITHRAX_WOO_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VERITHRAX_USER_AGENT", "verithrax/0.1 (product-webhook)");

    Ok(AppConfig {
        env,
        webhook_url,
        site_url: site_url.trim_end_matches('/').to_string(),
        bind_addr,
        log_level,
        settings_path,
        webhook_timeout_secs,
        woo_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VERITHRAX_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn validate_http_url(var: &str, value: &str) -> Result<(), ConfigError> {
    let has_scheme = value.starts_with("http://") || value.starts_with("https://");
    let has_host = value
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.trim_matches('/').is_empty());
    if has_scheme && has_host {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{value}\" is not an http(s) URL"),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
