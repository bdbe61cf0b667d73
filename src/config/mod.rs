//! Configuration for the gitops console
//!
//! Console settings live in a TOML file inside the application data
//! directory. A missing file means defaults; a malformed one is reported and
//! replaced by defaults at startup.
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.gitops-console/`
//! - **macOS**: `~/Library/Application Support/dev.gitops-console/`
//! - **Windows**: `%APPDATA%\dev.gitops-console\`
//!
//! Setting `GITOPS_CONSOLE_DATA_DIR` overrides the location.
//!
//! # Files
//!
//! - `config.toml` - Console settings ([`ConsoleConfig`])
//! - `active_mqtt_profile.json` - The active MQTT profile (see [`crate::profile`])
//! - `logs/` - Daily rolling log files
//!
//! # Example
//!
//! ```no_run
//! use gitops_console::config::ConsoleConfig;
//!
//! let mut config = ConsoleConfig::load_or_default();
//! config.page_size = 25;
//! config.save().unwrap();
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.gitops-console";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "GITOPS_CONSOLE_DATA_DIR";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Log directory name inside the data directory
pub const LOG_DIR: &str = "logs";

/// Default rows per table page
pub const DEFAULT_PAGE_SIZE: usize = crate::table::DEFAULT_PAGE_SIZE;

/// Default pipeline shown on the pipelines page
pub const DEFAULT_PIPELINE_ID: &str = "default";

/// Default notification lifetime in seconds
pub const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 4;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs_next::data_dir().map(|p| p.join(APP_ID)),
    }
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        ConsoleError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            ConsoleError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Console Config ====================

/// Console settings persisted across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Rows per page in every table
    pub page_size: usize,

    /// Pipeline shown when the pipelines page opens
    pub default_pipeline_id: String,

    /// How long toast notifications stay visible
    pub notification_ttl_secs: u64,

    /// Also write logs to a daily file in the data directory
    pub log_to_file: bool,

    /// Enable dark mode
    pub dark_mode: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_pipeline_id: DEFAULT_PIPELINE_ID.to_string(),
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
            log_to_file: true,
            dark_mode: true,
        }
    }
}

impl ConsoleConfig {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            ConsoleError::Config("Could not determine config path".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConsoleError::Config(format!("Failed to parse config {:?}: {}", path, e))
        })?;
        Ok(config.sanitized())
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConsoleError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConsoleError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ConsoleError::Config(format!("Failed to write config {:?}: {}", path, e))
        })
    }

    /// Notification lifetime as a `Duration`
    pub fn notification_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.notification_ttl_secs)
    }

    fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!("page_size of 0 in config, using {}", DEFAULT_PAGE_SIZE);
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.default_pipeline_id.trim().is_empty() {
            self.default_pipeline_id = DEFAULT_PIPELINE_ID.to_string();
        }
        self
    }
}
