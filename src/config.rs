//! Configuration module for postboard.

use serde::Deserialize;
use std::path::Path;

use crate::{BoardError, Result};

/// Environment variable that overrides `database.url`.
pub const DATABASE_URL_ENV: &str = "POSTBOARD_DATABASE_URL";

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (`sqlite://path/to.db`, `sqlite::memory:` or `postgres://...`).
    #[serde(default = "default_db_url")]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a free connection before giving up.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_db_url() -> String {
    "sqlite://data/postboard.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

/// Paging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PagingConfig {
    /// Page size used when a caller does not pick one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound for any requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/postboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Paging configuration.
    #[serde(default)]
    pub paging: PagingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `POSTBOARD_DATABASE_URL`: Override the database connection URL
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(BoardError::Config("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(BoardError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.paging.default_page_size == 0 || self.paging.max_page_size == 0 {
            return Err(BoardError::Config(
                "page sizes must be at least 1".to_string(),
            ));
        }
        if self.paging.default_page_size > self.paging.max_page_size {
            return Err(BoardError::Config(format!(
                "paging.default_page_size ({}) exceeds paging.max_page_size ({})",
                self.paging.default_page_size, self.paging.max_page_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.database.url, "sqlite://data/postboard.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout_secs, 5);

        assert_eq!(config.paging.default_page_size, 10);
        assert_eq!(config.paging.max_page_size, 100);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/postboard.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[database]
url = "postgres://localhost/board"
max_connections = 20
acquire_timeout_secs = 2

[paging]
default_page_size = 20
max_page_size = 50

[logging]
level = "debug"
file = "/var/log/postboard.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.database.url, "postgres://localhost/board");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.acquire_timeout_secs, 2);
        assert_eq!(config.paging.default_page_size, 20);
        assert_eq!(config.paging.max_page_size, 50);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "/var/log/postboard.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[paging]
max_page_size = 30
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.paging.max_page_size, 30);
        assert_eq!(config.paging.default_page_size, 10);
        assert_eq!(config.database.url, "sqlite://data/postboard.db");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        if let Err(BoardError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_load_with_env_overrides_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\nurl = \"sqlite://from-file.db\"\n").unwrap();

        let original = std::env::var(DATABASE_URL_ENV).ok();
        std::env::set_var(DATABASE_URL_ENV, "sqlite://from-env.db");

        let config = Config::load_with_env(&path).unwrap();
        assert_eq!(config.database.url, "sqlite://from-env.db");

        if let Some(val) = original {
            std::env::set_var(DATABASE_URL_ENV, val);
        } else {
            std::env::remove_var(DATABASE_URL_ENV);
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_default_page_size_too_large() {
        let mut config = Config::default();
        config.paging.default_page_size = 500;

        let result = config.validate();
        if let Err(BoardError::Config(msg)) = result {
            assert!(msg.contains("default_page_size"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_zero_page_size() {
        let mut config = Config::default();
        config.paging.max_page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_url() {
        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(matches!(config.validate(), Err(BoardError::Config(_))));
    }
}
