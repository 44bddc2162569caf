//! Config command - View and manage Handover configuration
//!
//! Provides the `handover config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use anyhow::{Context, Result};
use clap::Subcommand;
use handover_core::config::{Config, SETTABLE_KEYS};
use tracing::info;

use crate::context::CliContext;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "transfer.max_depth")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Set { key, value } => self.execute_set(ctx, key, value),
            ConfigCommand::Validate => self.execute_validate(ctx),
        }
    }

    fn execute_show(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.format.is_json() {
            let json = serde_json::to_value(&ctx.config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&ctx.config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }
        Ok(())
    }

    fn execute_set(&self, ctx: &CliContext, key: &str, value: &str) -> Result<()> {
        let formatter = ctx.formatter();
        let mut config = ctx.config.clone();

        info!(key = %key, value = %value, "Setting configuration value");

        if let Err(e) = config.set_value(key, value) {
            if ctx.format.is_json() {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "value": value,
                    "error": format!("{e:#}"),
                }));
            } else {
                formatter.error(&format!("Failed to set '{}': {:#}", key, e));
                formatter.info("");
                formatter.info("Supported keys:");
                for (name, help) in SETTABLE_KEYS {
                    formatter.info(&format!("  {:<38} - {}", name, help));
                }
            }
            anyhow::bail!("configuration unchanged");
        }

        // Validate the new config before saving
        let errors = config.validate();
        if !errors.is_empty() {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            if ctx.format.is_json() {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "value": value,
                    "errors": error_msgs,
                }));
            } else {
                formatter.error(&format!(
                    "Invalid value for '{}': {}",
                    key,
                    error_msgs.join("; ")
                ));
            }
            anyhow::bail!("configuration unchanged");
        }

        config
            .save(&ctx.config_path)
            .with_context(|| format!("Failed to write {}", ctx.config_path.display()))?;

        if ctx.format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": value,
                "config_path": ctx.config_path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {} = {}", key, value));
            formatter.info(&format!("Saved to {}", ctx.config_path.display()));
        }
        Ok(())
    }

    fn execute_validate(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();

        // The context already parsed the file; a missing file means defaults
        let exists = ctx.config_path.exists();
        let errors = ctx.config.validate();

        if ctx.format.is_json() {
            let error_list: Vec<serde_json::Value> = errors
                .iter()
                .map(|e| serde_json::json!({"field": e.field, "message": e.message}))
                .collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": ctx.config_path.display().to_string(),
                "file_exists": exists,
                "errors": error_list,
            }));
        } else {
            if !exists {
                formatter.warn(&format!(
                    "{} does not exist; checking built-in defaults",
                    ctx.config_path.display()
                ));
            }
            if errors.is_empty() {
                formatter.success("Configuration is valid");
            } else {
                for e in &errors {
                    formatter.failure(&e.to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("{} configuration error(s)", errors.len())
        }
    }
}
