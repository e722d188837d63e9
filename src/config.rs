//! Configuration management for taskdeck.
//!
//! This module handles the `.taskdeck/config.yaml` file which holds the
//! engine's timing and notification settings.

use crate::error::{Error, Result};
use crate::paths;
use crate::templates;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file path relative to a base directory.
pub const CONFIG_FILE_PATH: &str = ".taskdeck/config.yaml";

/// Default debounce delay for search terms, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Default interval between notification scans, in seconds (20 minutes).
pub const DEFAULT_NOTIFICATION_INTERVAL_SECS: u64 = 1200;

/// Default number of notifications shown as "recent".
pub const DEFAULT_RECENT_NOTIFICATION_LIMIT: usize = 3;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Quiet period before a search term takes effect.
    pub search_debounce_ms: u64,

    /// Interval between notification scans while a session is active.
    pub notification_interval_secs: u64,

    /// How many notifications the recent view shows.
    pub recent_notification_limit: usize,

    /// Keep the notification log when a session ends.
    pub retain_notifications_across_sessions: bool,

    /// Tera template overriding the notification message.
    /// None means the embedded template is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_template: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            notification_interval_secs: DEFAULT_NOTIFICATION_INTERVAL_SECS,
            recent_notification_limit: DEFAULT_RECENT_NOTIFICATION_LIMIT,
            retain_notifications_across_sessions: false,
            notification_template: None,
        }
    }
}

impl EngineConfig {
    /// Load config from a specific base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load_file(&config_path).map(Some)
    }

    /// Load config from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the project's config, falling back to the home directory's,
    /// then to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load_or_default(project_dir: &Path) -> Result<Self> {
        match paths::resolve_config_path(project_dir) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Check that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero notification interval or
    /// a notification template that does not render.
    pub fn validate(&self) -> Result<()> {
        if self.notification_interval_secs == 0 {
            return Err(Error::InvalidConfig(
                "notification_interval_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(template) = &self.notification_template {
            templates::check_notification_template(template)
                .map_err(|e| Error::InvalidConfig(format!("notification_template: {e}")))?;
        }
        Ok(())
    }

    /// Search debounce delay.
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Interval between notification scans.
    #[must_use]
    pub const fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_interval_secs)
    }

    /// Get the config file path for a base directory.
    #[must_use]
    pub fn config_path(base_dir: &Path) -> PathBuf {
        paths::config_path(base_dir)
    }
}
