//! List command - Show the files and folders the account owns
//!
//! Provides the `handover list` CLI command, used to pick transfer roots.

use anyhow::{Context, Result};
use clap::Args;
use handover_core::domain::Item;
use handover_core::usecases::{ListOwnedItemsUseCase, OwnedFilter};

use crate::context::CliContext;
use crate::output::{human_size, OutputFormatter};

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only list folders
    #[arg(long, conflicts_with = "files")]
    pub folders: bool,

    /// Only list files
    #[arg(long)]
    pub files: bool,
}

impl ListCommand {
    fn filter(&self) -> OwnedFilter {
        match (self.folders, self.files) {
            (true, _) => OwnedFilter::Folders,
            (_, true) => OwnedFilter::Files,
            _ => OwnedFilter::All,
        }
    }

    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let provider = ctx.provider()?;

        let owned = ListOwnedItemsUseCase::new(provider)
            .list(self.filter())
            .await
            .context("Failed to list owned items")?;

        if ctx.format.is_json() {
            let json = serde_json::to_value(&owned).context("Failed to serialize listing")?;
            formatter.print_json(&json);
            return Ok(());
        }

        if owned.is_empty() {
            formatter.success("No owned items found");
            return Ok(());
        }

        if !owned.folders.is_empty() {
            formatter.success(&format!("Folders ({})", owned.folders.len()));
            for folder in &owned.folders {
                formatter.info(&item_line(folder));
            }
        }
        if !owned.files.is_empty() {
            formatter.success(&format!(
                "Files ({}, {})",
                owned.files.len(),
                human_size(owned.total_size())
            ));
            for file in &owned.files {
                formatter.info(&item_line(file));
            }
        }
        Ok(())
    }
}

fn item_line(item: &Item) -> String {
    let mut line = format!("{:<44} {}", item.id.as_str(), item.name);
    if let Some(size) = item.size {
        line.push_str(&format!("  {}", human_size(size)));
    }
    if let Some(modified) = item.modified {
        line.push_str(&format!("  {}", modified.format("%Y-%m-%d %H:%M")));
    }
    line
}
