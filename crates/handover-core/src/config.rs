//! Configuration module for Handover.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Email, TransferMode};
use crate::usecases::walk_tree::DEFAULT_MAX_DEPTH;

/// Google Drive v3 REST endpoint.
pub const DEFAULT_DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Largest page size the Drive `files.list` endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Handover.
///
/// Every section is optional in the YAML file; missing sections take their
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub drive: DriveConfig,
    pub transfer: TransferConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
}

/// Storage provider endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Base URL of the Drive REST API.
    pub base_url: String,
    /// Items requested per listing page.
    pub page_size: u32,
    /// Whether granting edit access emails the new editor.
    pub send_notification_email: bool,
}

/// Batch transfer behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Mode used when the CLI is not given `--mode`.
    pub default_mode: TransferMode,
    /// Maximum folder nesting followed during expansion.
    pub max_depth: usize,
    /// Whether ownership mode also reassigns folders.
    pub ownership_includes_folders: bool,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

/// Credential lookup settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Keyring username the access token is stored under.
    pub account: Option<String>,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Write the configuration as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/handover/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("handover")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DRIVE_BASE_URL.to_string(),
            page_size: 100,
            send_notification_email: false,
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            default_mode: TransferMode::Share,
            max_depth: DEFAULT_MAX_DEPTH,
            ownership_includes_folders: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"drive.page_size"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- drive ---
        if !(self.drive.base_url.starts_with("https://")
            || self.drive.base_url.starts_with("http://"))
        {
            errors.push(ValidationError {
                field: "drive.base_url".into(),
                message: format!("must be an http(s) URL, got '{}'", self.drive.base_url),
            });
        }
        if self.drive.page_size == 0 || self.drive.page_size > MAX_PAGE_SIZE {
            errors.push(ValidationError {
                field: "drive.page_size".into(),
                message: format!("must be in range 1..={MAX_PAGE_SIZE}"),
            });
        }

        // --- transfer ---
        if self.transfer.max_depth == 0 {
            errors.push(ValidationError {
                field: "transfer.max_depth".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- auth ---
        if let Some(account) = &self.auth.account {
            if let Err(e) = Email::new(account.clone()) {
                errors.push(ValidationError {
                    field: "auth.account".into(),
                    message: e.to_string(),
                });
            }
        }

        errors
    }

    /// Apply a dot-notation `key = value` pair, e.g. `drive.page_size = 200`.
    ///
    /// Only parses the value; call [`validate`](Self::validate) afterwards
    /// for range checks.
    pub fn set_value(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        use anyhow::Context;

        match key {
            "drive.base_url" => self.drive.base_url = value.to_string(),
            "drive.page_size" => {
                self.drive.page_size = value
                    .parse()
                    .context("Expected a positive integer for drive.page_size")?;
            }
            "drive.send_notification_email" => {
                self.drive.send_notification_email = value
                    .parse()
                    .context("Expected true or false for drive.send_notification_email")?;
            }
            "transfer.default_mode" => {
                self.transfer.default_mode = value.parse()?;
            }
            "transfer.max_depth" => {
                self.transfer.max_depth = value
                    .parse()
                    .context("Expected a positive integer for transfer.max_depth")?;
            }
            "transfer.ownership_includes_folders" => {
                self.transfer.ownership_includes_folders = value
                    .parse()
                    .context("Expected true or false for transfer.ownership_includes_folders")?;
            }
            "logging.level" => self.logging.level = value.to_string(),
            "auth.account" => {
                self.auth.account = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            other => anyhow::bail!("Unknown configuration key: {other}"),
        }
        Ok(())
    }
}

/// Keys accepted by [`Config::set_value`], with a short description each.
pub const SETTABLE_KEYS: &[(&str, &str)] = &[
    ("drive.base_url", "Drive REST API base URL"),
    ("drive.page_size", "Items per listing page (1-1000)"),
    ("drive.send_notification_email", "Email new editors (true|false)"),
    ("transfer.default_mode", "share|transfer-ownership"),
    ("transfer.max_depth", "Maximum folder nesting to expand"),
    ("transfer.ownership_includes_folders", "Reassign folders too (true|false)"),
    ("logging.level", "trace|debug|info|warn|error"),
    ("auth.account", "Keyring account holding the access token"),
];

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Config`].
///
/// Starts from [`Config::default`] and lets callers override individual fields.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pre-populated with default values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- drive ---

    pub fn drive_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.drive.base_url = url.into();
        self
    }

    pub fn drive_page_size(mut self, n: u32) -> Self {
        self.config.drive.page_size = n;
        self
    }

    pub fn drive_send_notification_email(mut self, send: bool) -> Self {
        self.config.drive.send_notification_email = send;
        self
    }

    // --- transfer ---

    pub fn transfer_default_mode(mut self, mode: TransferMode) -> Self {
        self.config.transfer.default_mode = mode;
        self
    }

    pub fn transfer_max_depth(mut self, depth: usize) -> Self {
        self.config.transfer.max_depth = depth;
        self
    }

    pub fn transfer_ownership_includes_folders(mut self, include: bool) -> Self {
        self.config.transfer.ownership_includes_folders = include;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- auth ---

    pub fn auth_account(mut self, account: impl Into<String>) -> Self {
        self.config.auth.account = Some(account.into());
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
