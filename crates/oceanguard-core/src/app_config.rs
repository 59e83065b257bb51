use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Only commands that touch the local report store need it; see
    /// [`AppConfig::database_url`].
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub reddit_user_agent: String,
    pub reddit_communities: Vec<String>,
    pub reddit_max_communities: usize,
    pub reddit_post_limit: u32,
    pub reddit_timeout_secs: u64,
    pub reddit_inter_request_delay_ms: u64,
    pub alerts_user_agent: String,
    pub alerts_timeout_secs: u64,
    pub openweather_api_key: Option<String>,
    pub analytics_cache_ttl_secs: u64,
    pub alerts_refresh_secs: u64,
}

impl AppConfig {
    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` is unset or blank.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field("reddit_communities", &self.reddit_communities)
            .field("reddit_max_communities", &self.reddit_max_communities)
            .field("reddit_post_limit", &self.reddit_post_limit)
            .field("reddit_timeout_secs", &self.reddit_timeout_secs)
            .field(
                "reddit_inter_request_delay_ms",
                &self.reddit_inter_request_delay_ms,
            )
            .field("alerts_user_agent", &self.alerts_user_agent)
            .field("alerts_timeout_secs", &self.alerts_timeout_secs)
            .field(
                "openweather_api_key",
                &self.openweather_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("analytics_cache_ttl_secs", &self.analytics_cache_ttl_secs)
            .field("alerts_refresh_secs", &self.alerts_refresh_secs)
            .finish()
    }
}
