//! Server configuration from environment variables

use a11y_core::{CoreError, CoreResult, FailurePolicy};
use a11y_tools::{FetchConfig, ToolConfig};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL; results stay in memory when unset
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
    pub tools: ToolConfig,
    pub fetch: FetchConfig,
    pub failure_policy: FailurePolicy,
    /// Directory for raw validator dumps; logged at debug level when unset
    pub diagnostics_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 10,
            bind_addr: "0.0.0.0:8000".to_string(),
            tools: ToolConfig::default(),
            fetch: FetchConfig::default(),
            failure_policy: FailurePolicy::default(),
            diagnostics_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        config.database_url = get("DATABASE_URL");
        if let Some(v) = get("A11Y_DB_MAX_CONNECTIONS") {
            config.max_connections = parse_number("A11Y_DB_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = get("A11Y_BIND_ADDR") {
            config.bind_addr = v;
        }
        if let Some(v) = get("A11Y_PYTHON") {
            config.tools.python = PathBuf::from(v);
        }
        if let Some(v) = get("A11Y_VALIDATOR_TIMEOUT_SECS") {
            config.tools.timeout_secs = parse_number("A11Y_VALIDATOR_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("A11Y_FETCH_TIMEOUT_SECS") {
            config.fetch.timeout_secs = parse_number("A11Y_FETCH_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("A11Y_USER_AGENT") {
            config.fetch.user_agent = v;
        }
        if let Some(v) = get("A11Y_FAILURE_POLICY") {
            config.failure_policy = v.parse()?;
        }
        config.diagnostics_dir = get("A11Y_DIAGNOSTICS_DIR").map(PathBuf::from);

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> CoreResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::Config(format!("{} must be a number, got {:?}", key, value)))
}
