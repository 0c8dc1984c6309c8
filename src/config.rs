//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the configured admin secret.
pub const SECRET_ENV: &str = "CLASS_BOARD_SECRET";

const APP_NAME: &str = "class-board";

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which store backs the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Remote,
    Local,
}

/// Store selection and the shared admin secret.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,
    /// Sent with every request and checked by the authorization prompt.
    #[serde(default)]
    pub admin_secret: String,
}

/// Remote endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub api_url: String,
    pub verify_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Local snapshot store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    pub database_path: PathBuf,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily-rolling log files. Console only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Attempt to load config with detailed result.
    ///
    /// The admin secret from [`SECRET_ENV`] takes precedence over the file.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    let config = config.with_secret_override(std::env::var(SECRET_ENV).ok());
                    match config.validate() {
                        Ok(()) => ConfigLoadResult::Loaded(config),
                        Err(e) => ConfigLoadResult::Invalid(e),
                    }
                }
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Replace the admin secret when an override is present and non-empty.
    pub fn with_secret_override(mut self, secret: Option<String>) -> Self {
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.store.admin_secret = secret;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.admin_secret.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Admin secret cannot be empty (set store.admin_secret or {SECRET_ENV})"
            )));
        }
        match self.store.backend {
            Backend::Remote => {
                if !self.remote.api_url.starts_with("http") {
                    return Err(ConfigError::Validation(
                        "API URL must start with http:// or https://".to_string(),
                    ));
                }
                if !self.remote.verify_url.starts_with("http") {
                    return Err(ConfigError::Validation(
                        "Verify URL must start with http:// or https://".to_string(),
                    ));
                }
                if self.remote.timeout_secs < 1 {
                    return Err(ConfigError::Validation(
                        "Request timeout must be at least 1 second".to_string(),
                    ));
                }
            }
            Backend::Local => {
                if self.local.database_path.as_os_str().is_empty() {
                    return Err(ConfigError::Validation("Database path cannot be empty".to_string()));
                }
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("Log level cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl LocalConfig {
    /// Build connection string for SeaORM; the file is created on first use.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database_path.display())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            verify_url: "http://localhost:8080/verify-password".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        let database_path = directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join("class-board.db"))
            .unwrap_or_else(|| PathBuf::from("class-board.db"));
        Self { database_path }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}
