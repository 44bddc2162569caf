//! Transfer command - Share items with, or hand their ownership to, another account
//!
//! Provides the `handover transfer` CLI command which:
//! 1. Validates the target address and item identifiers
//! 2. Expands folder roots into their full contents
//! 3. Applies the mutation to every item and prints the batch report
//!
//! The command exits non-zero when any item failed.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use handover_core::config::TransferConfig;
use handover_core::domain::{TransferMode, TransferReport, TransferRequest};
use handover_core::usecases::{TransferItemsUseCase, TransferOptions};
use tracing::info;

use crate::context::CliContext;
use crate::output::OutputFormatter;

/// Mutation applied to every item
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Grant edit access
    Share,
    /// Make the target the owner
    Ownership,
}

impl From<ModeArg> for TransferMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Share => TransferMode::Share,
            ModeArg::Ownership => TransferMode::TransferOwnership,
        }
    }
}

#[derive(Debug, Args)]
pub struct TransferCommand {
    /// Account receiving the items (email address)
    pub target: String,

    /// File or folder identifiers; folders include everything below them
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Transfer mode (defaults to transfer.default_mode from the config)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Override transfer.max_depth for this run
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only hand over files; folders keep their owner (ownership mode only)
    #[arg(long)]
    pub files_only: bool,
}

impl TransferCommand {
    /// Runs the batch; returns whether every item succeeded
    pub async fn execute(&self, ctx: &CliContext) -> Result<bool> {
        let formatter = ctx.formatter();

        let (mode, options) = self.settings(&ctx.config.transfer)?;
        let request = TransferRequest::parse(&self.ids, &self.target, mode)
            .context("Invalid transfer request")?;

        let provider = ctx.provider()?;
        info!(recipient = %request.target, mode = %mode, roots = request.roots.len(), "Transfer requested");

        let report = TransferItemsUseCase::new(provider, options)
            .transfer(&request)
            .await;

        if ctx.format.is_json() {
            let json =
                serde_json::to_value(&report).context("Failed to serialize transfer report")?;
            formatter.print_json(&json);
        } else {
            print_report(&report, &*formatter);
        }

        Ok(report.is_clean())
    }

    /// Merges the flags over the configured defaults
    fn settings(&self, config: &TransferConfig) -> Result<(TransferMode, TransferOptions)> {
        let mode = self
            .mode
            .map(TransferMode::from)
            .unwrap_or(config.default_mode);

        let mut options = TransferOptions::from(config);
        if let Some(depth) = self.max_depth {
            anyhow::ensure!(depth > 0, "--max-depth must be greater than 0");
            options.max_depth = depth;
        }
        if self.files_only {
            anyhow::ensure!(
                mode == TransferMode::TransferOwnership,
                "--files-only requires ownership mode"
            );
            options.ownership_includes_folders = false;
        }
        Ok((mode, options))
    }
}

fn print_report(report: &TransferReport, fmt: &dyn OutputFormatter) {
    for success in &report.successes {
        fmt.success(&format!("{} ({})", success.name, success.id));
    }
    for failure in &report.failures {
        fmt.failure(&format!("{} [{}]: {}", failure.id, failure.kind, failure.error));
    }
    for warning in &report.warnings {
        fmt.warn(warning);
    }

    fmt.info("");
    let verb = match report.mode {
        TransferMode::Share => "Shared",
        TransferMode::TransferOwnership => "Transferred",
    };
    let summary = format!(
        "{verb} {} of {} items with {} ({} failed)",
        report.successes.len(),
        report.total,
        report.target,
        report.failures.len()
    );
    if report.is_clean() {
        fmt.success(&summary);
    } else {
        fmt.error(&summary);
    }
    if let Some(ms) = report.duration_ms() {
        fmt.info(&format!("Batch {} finished in {} ms", report.batch_id, ms));
    }
}
