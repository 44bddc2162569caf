//! Per-invocation state shared by every subcommand
//!
//! Holds the output format, the loaded configuration and its path, and the
//! token given on the command line, and knows how to turn them into a
//! ready-to-use storage provider.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use handover_core::config::Config;
use handover_drive::auth::{resolve_credentials, DEFAULT_ACCOUNT};
use handover_drive::provider::DriveStorageProvider;
use tracing::debug;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Configuration file contents, read before logging is set up
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: Config,
    /// Whether the file existed
    pub found: bool,
}

impl LoadedConfig {
    /// Reads `path` or the default location
    ///
    /// A missing file yields the defaults; an unreadable or malformed one
    /// is an error.
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Config::default_path);

        if !path.exists() {
            return Ok(Self {
                path,
                config: Config::default(),
                found: false,
            });
        }
        let config =
            Config::load(&path).with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(Self {
            path,
            config,
            found: true,
        })
    }
}

pub struct CliContext {
    pub format: OutputFormat,
    pub quiet: bool,
    pub config_path: PathBuf,
    pub config: Config,
    /// Token passed with `--token`
    pub token: Option<String>,
}

impl CliContext {
    pub fn new(
        format: OutputFormat,
        quiet: bool,
        loaded: LoadedConfig,
        token: Option<String>,
    ) -> Self {
        if loaded.found {
            debug!(path = %loaded.path.display(), "Loaded configuration");
        } else {
            debug!(path = %loaded.path.display(), "No configuration file, using defaults");
        }

        Self {
            format,
            quiet,
            config_path: loaded.path,
            config: loaded.config,
            token,
        }
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format, self.quiet)
    }

    /// Keyring account the access token lives under
    pub fn account(&self) -> &str {
        self.config.auth.account.as_deref().unwrap_or(DEFAULT_ACCOUNT)
    }

    /// Fails with every validation error when the configuration is invalid
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.config.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!(
            "Invalid configuration in {}: {}",
            self.config_path.display(),
            lines.join("; ")
        )
    }

    /// Resolves credentials and builds the Drive provider
    pub fn provider(&self) -> Result<Arc<DriveStorageProvider>> {
        self.ensure_valid()?;
        let (credentials, source) = resolve_credentials(self.token.as_deref(), self.account())?;
        debug!(%source, account = self.account(), "Resolved access token");
        Ok(Arc::new(DriveStorageProvider::from_config(
            &self.config.drive,
            &credentials,
        )))
    }
}
