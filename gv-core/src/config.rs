//! Application configuration management.
//!
//! Handles loading, saving, and accessing application configuration: account
//! credentials, the default forwarding phone, service URLs, logging and
//! download preferences. Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::constants::{self, Endpoints};
use crate::error::{GvError, GvResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Account credentials.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Calling defaults.
    #[serde(default)]
    pub gvoice: VoiceConfig,

    /// Service location and transport settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Recording download settings.
    #[serde(default)]
    pub downloads: DownloadConfig,
}

/// Account credentials. Either may be left out and supplied at runtime.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Google account email address associated with the Voice account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Raw account password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Calling defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Number calls are placed from (rings first, then bridges).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_number: Option<String>,

    /// Phone type code of the forwarding number:
    /// 1 home, 2 mobile, 3 work, 7 gizmo.
    #[serde(default = "default_phone_type")]
    pub phone_type: u8,
}

/// Service location and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service root, e.g. "https://www.google.com/voice/".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Login form URL.
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// User agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// Recording download settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory recordings are saved to. If empty, uses the working directory.
    #[serde(default)]
    pub directory: String,
}

// Default value functions for serde

fn default_phone_type() -> u8 {
    constants::DEFAULT_PHONE_TYPE
}

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_login_url() -> String {
    constants::DEFAULT_LOGIN_URL.to_string()
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            forwarding_number: None,
            phone_type: default_phone_type(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_url: default_login_url(),
            timeout_ms: default_timeout(),
            user_agent: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ServiceConfig {
    /// Endpoints resolved against the configured URLs.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            &AppConfig::sanitize_base_url(&self.base_url),
            &self.login_url,
        )
    }

    /// Effective user agent.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(constants::USER_AGENT)
    }
}

impl AppConfig {
    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> GvResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> GvResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| GvError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> GvResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> GvResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Platform::log_dir()
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Get the effective download directory, using the configured path or the
    /// current working directory.
    pub fn effective_download_dir(&self) -> GvResult<PathBuf> {
        if self.downloads.directory.is_empty() {
            Ok(std::env::current_dir()?)
        } else {
            Ok(PathBuf::from(&self.downloads.directory))
        }
    }

    /// Sanitize and normalize a service base URL.
    ///
    /// Ensures the address has a scheme and ends with exactly one slash.
    pub fn sanitize_base_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return constants::DEFAULT_BASE_URL.to_string();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        format!("{}/", with_scheme.trim_end_matches('/'))
    }
}

/// Thread-safe configuration holder for shared access across commands.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }

    /// Write the current configuration to `path`.
    pub async fn save_to(&self, path: &Path) -> GvResult<()> {
        self.inner.read().await.save_to_file(path)
    }
}
