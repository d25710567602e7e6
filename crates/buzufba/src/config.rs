//! Configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use buzufba_db::PgPoolConfig;
use eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the buzufba daemon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server and logging settings
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// Route store settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Daemon server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address and port to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Log level or filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, overridden by `DATABASE_URL`
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Seconds before idle connections are closed, `0` keeps them open
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Apply embedded migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
    /// Load the UFBA timetable when the routes table is empty
    #[serde(default)]
    pub seed: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            run_migrations: false,
            seed: false,
        }
    }
}

impl DatabaseConfig {
    /// Build the pool settings
    ///
    /// # Errors
    /// Returns error if no database URL is configured
    pub fn pool_config(&self) -> eyre::Result<PgPoolConfig> {
        let url = self
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| eyre!("no database url configured (set database.url or DATABASE_URL)"))?;

        let idle_timeout =
            (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs));

        Ok(PgPoolConfig::with_url(url)
            .with_max_connections(self.max_connections)
            .with_min_connections(self.min_connections)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_idle_timeout(idle_timeout))
    }
}

/// Allowed origins for cross-origin requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API, `"*"` allows any
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_origins(),
        }
    }
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.origins.iter().any(|o| o == "*")
    }
}

fn default_bind() -> String {
    "0.0.0.0:3333".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_idle_timeout_secs() -> u64 {
    600
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid configuration
    pub fn parse(content: &str) -> eyre::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// First existing file among the default locations
    #[must_use]
    pub fn locate() -> Option<PathBuf> {
        let paths = [
            Some(PathBuf::from("buzufba.toml")),
            Some(PathBuf::from("/etc/buzufba/buzufba.toml")),
            dirs::config_dir().map(|p| p.join("buzufba/buzufba.toml")),
        ];

        paths.into_iter().flatten().find(|path| path.exists())
    }

    /// Replace the database URL when one is given
    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database.url = Some(url);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.daemon.bind, "0.0.0.0:3333");
        assert_eq!(config.daemon.log_format, LogFormat::Pretty);
        assert!(config.cors.allows_any());
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [daemon]
            bind = "127.0.0.1:8080"
            log_level = "debug"
            log_format = "json"

            [database]
            url = "postgres://localhost/buzufba"
            max_connections = 4
            idle_timeout_secs = 0
            run_migrations = true
            seed = true

            [cors]
            origins = ["https://meu-buzufba.vercel.app"]
            "#,
        )
        .unwrap();

        assert_eq!(config.daemon.bind, "127.0.0.1:8080");
        assert_eq!(config.daemon.log_format, LogFormat::Json);
        assert!(config.database.run_migrations);
        assert!(config.database.seed);
        assert!(!config.cors.allows_any());

        let pool = config.database.pool_config().unwrap();
        assert_eq!(pool.url, "postgres://localhost/buzufba");
        assert_eq!(pool.max_connections, 4);
        assert_eq!(pool.min_connections, 1);
        assert_eq!(pool.idle_timeout, None);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        assert!(Config::parse("[daemon]\nlog_format = \"xml\"").is_err());
    }

    #[test]
    fn test_pool_config_requires_url() {
        assert!(DatabaseConfig::default().pool_config().is_err());

        let blank = DatabaseConfig {
            url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.pool_config().is_err());
    }

    #[test]
    fn test_database_url_override() {
        let config = Config::default()
            .with_database_url(Some("postgres://db/buzufba".to_string()));
        assert_eq!(config.database.url.as_deref(), Some("postgres://db/buzufba"));

        let config = config.with_database_url(None);
        assert_eq!(config.database.url.as_deref(), Some("postgres://db/buzufba"));
    }
}
