//! Configuration for the OpenAlex MCP server.
//!
//! Settings are read once at startup into a [`Config`] and handed to the
//! client; nothing is looked up from the environment afterwards.

use std::time::Duration;

use anyhow::Context;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// Request timeout for a single upstream call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Contact address sent as `mailto` to join the polite pool.
    pub const CONTACT_EMAIL: &str = "researcher@example.com";

    /// User-Agent header sent with every request.
    pub const USER_AGENT: &str = concat!("OpenAlexMCPServer/", env!("CARGO_PKG_VERSION"));

    /// Largest page OpenAlex is asked for.
    pub const MAX_PER_PAGE: i64 = 50;

    /// Page size used when a caller gives no limit.
    pub const DEFAULT_LIMIT: i64 = 10;
}

/// Environment variable names (all share the `OPENALEX_` prefix).
pub mod env {
    pub const APP_NAME: &str = "OPENALEX_APP_NAME";
    pub const LOG_LEVEL: &str = "OPENALEX_LOG_LEVEL";
    pub const API_BASE_URL: &str = "OPENALEX_API_BASE_URL";
    pub const API_TIMEOUT: &str = "OPENALEX_API_TIMEOUT";
    pub const CONTACT_EMAIL: &str = "OPENALEX_CONTACT_EMAIL";
}

/// Default application name, also reported as `serverInfo.name`.
pub const DEFAULT_APP_NAME: &str = "openalex-mcp-server";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application name.
    pub app_name: String,

    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Base URL of the OpenAlex API (overridable for mock servers).
    pub api_base_url: String,

    /// Timeout applied to each upstream request.
    pub request_timeout: Duration,

    /// Contact email appended to search requests.
    pub contact_email: String,

    /// User-Agent header value.
    pub user_agent: String,
}

impl Config {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            api_base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            contact_email: api::CONTACT_EMAIL.to_string(),
            user_agent: api::USER_AGENT.to_string(),
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            ..Self::new()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if `OPENALEX_API_TIMEOUT` is not a positive number of seconds.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns error if the timeout value is invalid.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::new();

        if let Some(name) = get(env::APP_NAME) {
            config.app_name = name;
        }
        if let Some(level) = get(env::LOG_LEVEL) {
            config.log_level = level.to_lowercase();
        }
        if let Some(url) = get(env::API_BASE_URL) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(env::API_TIMEOUT) {
            config.request_timeout = parse_timeout(&raw)
                .with_context(|| format!("invalid {} value {raw:?}", env::API_TIMEOUT))?;
        }
        if let Some(email) = get(env::CONTACT_EMAIL) {
            config.contact_email = email;
        }

        Ok(config)
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a timeout given in (possibly fractional) seconds.
pub fn parse_timeout(raw: &str) -> anyhow::Result<Duration> {
    let secs: f64 = raw.trim().parse().context("expected a number of seconds")?;
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("timeout must be greater than zero");
    }
    Duration::try_from_secs_f64(secs).context("timeout is out of range")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.app_name, "openalex-mcp-server");
        assert_eq!(config.api_base_url, "https://api.openalex.org");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("OpenAlexMCPServer/"));
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENALEX_APP_NAME", "custom"),
            ("OPENALEX_LOG_LEVEL", "DEBUG"),
            ("OPENALEX_API_BASE_URL", "http://localhost:9999/"),
            ("OPENALEX_API_TIMEOUT", "10"),
            ("OPENALEX_CONTACT_EMAIL", "me@example.org"),
        ]))
        .unwrap();

        assert_eq!(config.app_name, "custom");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_base_url, "http://localhost:9999");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.contact_email, "me@example.org");
    }

    #[test]
    fn test_config_blank_values_use_defaults() {
        let config = Config::from_lookup(lookup(&[("OPENALEX_APP_NAME", "  ")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        assert!(Config::from_lookup(lookup(&[("OPENALEX_API_TIMEOUT", "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[("OPENALEX_API_TIMEOUT", "0")])).is_err());
    }

    #[test]
    fn test_parse_timeout_fractional() {
        assert_eq!(parse_timeout("2.5").unwrap(), Duration::from_millis(2500));
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("1e300").is_err());
    }

    #[test]
    fn test_for_testing_trims_slash() {
        let config = Config::for_testing("http://127.0.0.1:1234/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:1234");
    }
}
