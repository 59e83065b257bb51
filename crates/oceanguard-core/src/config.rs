use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_REDDIT_COMMUNITIES: &str =
    "environment,ocean,marinebiology,climatechange,pollution,collapse";

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
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = lookup("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());

    let env = parse_environment(&or_default("OCEANGUARD_ENV", "development"))?;

    let bind_addr = or_default("OCEANGUARD_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("OCEANGUARD_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("OCEANGUARD_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("OCEANGUARD_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("OCEANGUARD_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "OCEANGUARD_DB_MIN_CONNECTIONS",
            format!("must not exceed OCEANGUARD_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("OCEANGUARD_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let reddit_user_agent = or_default(
        "OCEANGUARD_REDDIT_USER_AGENT",
        "OceanGuard:v1.0.0 (by /u/oceanguard)",
    );
    let reddit_communities = parse_list(&or_default(
        "OCEANGUARD_REDDIT_COMMUNITIES",
        DEFAULT_REDDIT_COMMUNITIES,
    ));
    if reddit_communities.is_empty() {
        return Err(invalid(
            "OCEANGUARD_REDDIT_COMMUNITIES",
            "at least one community is required".to_string(),
        ));
    }
    let reddit_max_communities = parse_usize("OCEANGUARD_REDDIT_MAX_COMMUNITIES", "2")?;
    let reddit_post_limit = parse_u32("OCEANGUARD_REDDIT_POST_LIMIT", "25")?;
    let reddit_timeout_secs = parse_u64("OCEANGUARD_REDDIT_TIMEOUT_SECS", "5")?;
    let reddit_inter_request_delay_ms =
        parse_u64("OCEANGUARD_REDDIT_INTER_REQUEST_DELAY_MS", "2000")?;

    let alerts_user_agent = or_default(
        "OCEANGUARD_ALERTS_USER_AGENT",
        "OceanGuard-App/1.0 (contact@oceanguard.com)",
    );
    let alerts_timeout_secs = parse_u64("OCEANGUARD_ALERTS_TIMEOUT_SECS", "10")?;
    let openweather_api_key = lookup("OPENWEATHER_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());

    let analytics_cache_ttl_secs = parse_u64("OCEANGUARD_ANALYTICS_CACHE_TTL_SECS", "300")?;
    let alerts_refresh_secs = parse_u64("OCEANGUARD_ALERTS_REFRESH_SECS", "300")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        reddit_user_agent,
        reddit_communities,
        reddit_max_communities,
        reddit_post_limit,
        reddit_timeout_secs,
        reddit_inter_request_delay_ms,
        alerts_user_agent,
        alerts_timeout_secs,
        openweather_api_key,
        analytics_cache_ttl_secs,
        alerts_refresh_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OCEANGUARD_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
