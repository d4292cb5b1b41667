use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so parsing can be tested
/// against a plain `HashMap` without touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let request_timeout_secs = parse_positive_u64("SHOPSCRAPE_REQUEST_TIMEOUT_SECS", "5")?;
    let max_pages = u32::try_from(parse_positive_u64("SHOPSCRAPE_MAX_PAGES", "200")?).map_err(
        |e| ConfigError::InvalidEnvVar {
            var: "SHOPSCRAPE_MAX_PAGES".to_string(),
            reason: e.to_string(),
        },
    )?;
    let user_agent = or_default("SHOPSCRAPE_USER_AGENT", "shopscrape/0.1 (+catalog-export)");
    let log_level = or_default("SHOPSCRAPE_LOG_LEVEL", "info");
    let out_dir = PathBuf::from(or_default("SHOPSCRAPE_OUT_DIR", "./out"));

    Ok(AppConfig {
        request_timeout_secs,
        user_agent,
        max_pages,
        log_level,
        out_dir,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
