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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let scrape_api_key = require("GEOLENS_SCRAPE_API_KEY")?;
    let llm_api_key = require("GEOLENS_LLM_API_KEY")?;

    let env = parse_environment(&or_default("GEOLENS_ENV", "development"));
    let log_level = or_default("GEOLENS_LOG_LEVEL", "info");

    let scrape_api_url = or_default(
        "GEOLENS_SCRAPE_API_URL",
        "https://api.firecrawl.dev/v1/scrape",
    );
    let scrape_timeout_secs = parse_u64("GEOLENS_SCRAPE_TIMEOUT_SECS", "30")?;

    let llm_api_url = or_default(
        "GEOLENS_LLM_API_URL",
        "https://api.openai.com/v1/chat/completions",
    );
    let llm_model = or_default("GEOLENS_LLM_MODEL", "gpt-4o-mini");
    let llm_timeout_secs = parse_u64("GEOLENS_LLM_TIMEOUT_SECS", "60")?;

    let db_max_connections = parse_u32("GEOLENS_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("GEOLENS_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("GEOLENS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        scrape_api_url,
        scrape_api_key,
        scrape_timeout_secs,
        llm_api_url,
        llm_api_key,
        llm_model,
        llm_timeout_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
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
