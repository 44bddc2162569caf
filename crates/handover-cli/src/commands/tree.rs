//! Tree command - Preview what a folder expands to
//!
//! Provides the `handover tree` CLI command which walks a folder exactly as
//! a transfer would, without changing anything.

use anyhow::{Context, Result};
use clap::Args;
use handover_core::domain::ItemId;
use handover_core::usecases::WalkTreeUseCase;

use crate::context::CliContext;

#[derive(Debug, Args)]
pub struct TreeCommand {
    /// Folder identifier to expand
    pub folder_id: String,

    /// Override transfer.max_depth for this walk
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl TreeCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let folder_id = ItemId::new(self.folder_id.clone()).context("Invalid folder id")?;
        let max_depth = self.max_depth.unwrap_or(ctx.config.transfer.max_depth);
        anyhow::ensure!(max_depth > 0, "--max-depth must be greater than 0");

        let walker = WalkTreeUseCase::new(ctx.provider()?, max_depth);
        let items = walker
            .walk_items(&folder_id)
            .await
            .with_context(|| format!("Failed to expand folder {folder_id}"))?;

        if ctx.format.is_json() {
            let json = serde_json::json!({
                "root": folder_id,
                "count": items.len(),
                "items": items,
            });
            formatter.print_json(&json);
            return Ok(());
        }

        formatter.success(&format!("{folder_id}: {} items below", items.len()));
        for item in &items {
            let marker = if item.is_folder() { "/" } else { "" };
            formatter.info(&format!("{}  {}{}", item.id, item.name, marker));
        }
        Ok(())
    }
}
