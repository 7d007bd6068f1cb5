//! Service configuration.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the working directory.

use std::time::Duration;

use tracing::warn;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8090;
/// Default base URL of the Infinity HTTP API.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:23820";
/// Database whose tables are listed in the page content region.
pub const DEFAULT_DATABASE: &str = "default_db";
/// Default backend request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration shared by all services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name of the running service, used in logs and responses.
    pub service_name: String,
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Table-store backend settings.
    pub backend: BackendConfig,
}

/// Settings for the table-store backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend HTTP API, without trailing slash.
    pub base_url: String,
    /// Database whose tables the page lists.
    pub default_database: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Applies a `.env` file from the working directory, if any.
///
/// Variables already present in the environment win over the file.
pub fn load_dotenv() {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!(path = %path.display(), "已加载 .env 文件");
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            default_database: DEFAULT_DATABASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("INFINITY_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);
        let default_database = lookup("DEFAULT_DATABASE")
            .filter(|db| !db.is_empty())
            .unwrap_or(defaults.default_database);
        let timeout = parse_or_default(
            "BACKEND_TIMEOUT_SECS",
            lookup("BACKEND_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        );

        Self {
            base_url,
            default_database,
            timeout: Duration::from_secs(timeout),
        }
    }
}

impl AppConfig {
    /// Loads configuration for the named service from the environment.
    pub fn load_with_service(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    fn from_lookup(service_name: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or_default("SERVER_PORT", lookup("SERVER_PORT"), DEFAULT_PORT),
            backend: BackendConfig::from_lookup(&lookup),
        }
    }

    /// Returns the `host:port` listen address.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %value, default = %default, "无法解析配置项，使用默认值");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup("dashboard", lookup_from(&[]));
        assert_eq!(config.service_name, "dashboard");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.backend.default_database, "default_db");
        assert_eq!(config.backend.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(
            "dashboard",
            lookup_from(&[
                ("SERVER_PORT", "9000"),
                ("INFINITY_API_URL", "http://infinity:23820/"),
                ("DEFAULT_DATABASE", "analytics"),
                ("BACKEND_TIMEOUT_SECS", "3"),
            ]),
        );
        assert_eq!(config.port, 9000);
        assert_eq!(config.backend.base_url, "http://infinity:23820");
        assert_eq!(config.backend.default_database, "analytics");
        assert_eq!(config.backend.timeout, Duration::from_secs(3));
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = AppConfig::from_lookup("dashboard", lookup_from(&[("SERVER_PORT", "abc")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_empty_database_name_is_ignored() {
        let backend = BackendConfig::from_lookup(lookup_from(&[("DEFAULT_DATABASE", "")]));
        assert_eq!(backend.default_database, DEFAULT_DATABASE);
    }
}
