//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::admin::DEFAULT_ADMIN_PASSWORD;
use crate::api::DEFAULT_API_BASE;
use crate::session::STORE_KEY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend location
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Absolute URL, or a path resolved against `origin`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_origin() -> String {
    "http://localhost:7071".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
        }
    }
}

impl ApiConfig {
    /// Absolute base URL without trailing slash
    pub fn resolved_base_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            format!(
                "{}/{}",
                self.origin.trim_end_matches('/'),
                base.trim_start_matches('/')
            )
        }
    }
}

/// Admin dashboard gate
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the persisted session lives
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    let name = format!("{}.json", STORE_KEY);
    dirs::data_local_dir()
        .map(|p| p.join("wabash").join(&name).to_string_lossy().to_string())
        .unwrap_or(name)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// never a silent fall back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("wabash").join("config.toml")),
            Some(PathBuf::from("./wabash.toml")),
        ];
        let candidates: Vec<PathBuf> = config_paths.into_iter().flatten().collect();

        match Self::load_first(&candidates)? {
            Some(config) => Ok(config),
            None => {
                tracing::debug!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Load the first existing file among `paths`
    fn load_first(paths: &[PathBuf]) -> Result<Option<Self>, ConfigError> {
        for path in paths {
            if path.exists() {
                let config = Self::load_with_env(path)?;
                tracing::debug!("Loaded config from {:?}", path);
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
        if let Some(base_url) = var("WABASH_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Some(origin) = var("WABASH_API_ORIGIN") {
            self.api.origin = origin;
        }

        if let Some(password) = var("WABASH_ADMIN_PASSWORD") {
            self.admin.password = password;
        }

        if let Some(file) = var("WABASH_SESSION_FILE") {
            self.session.file = file;
        }

        if let Some(level) = var("WABASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("WABASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Wabash Process Tracker Configuration
#
# Environment variables override these settings:
# - WABASH_API_BASE_URL
# - WABASH_API_ORIGIN
# - WABASH_ADMIN_PASSWORD
# - WABASH_SESSION_FILE
# - WABASH_LOG_LEVEL
# - WABASH_LOG_FORMAT

[api]
# Backend base path; a relative path is resolved against `origin`
base_url = "/api"

# Origin serving the backend (the development proxy target by default)
origin = "http://localhost:7071"

[admin]
# Shared password for the admin commands. Checked on this machine only:
# it is not an access control on the backend.
password = "root"

[session]
# File holding the operator name and the running work session
# file = "~/.local/share/wabash/wabash-process-store.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
