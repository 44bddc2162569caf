//! Batch transfer use case
//!
//! Hands a set of files and folders over to another account, either by
//! granting edit access (share) or by making that account the owner.
//!
//! A batch runs in two passes:
//! 1. **Expansion** - every root is kept, and roots that resolve as folders
//!    are followed by everything [`WalkTreeUseCase`] finds below them
//! 2. **Mutation** - each expanded identifier is resolved and mutated in
//!    turn; failures are recorded in the report and never stop the batch
//!
//! Nothing is retried or rolled back. Items handed over before a failure
//! stay handed over.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::TransferConfig;
use crate::domain::{
    Email, ErrorKind, ItemId, TransferMode, TransferReport, TransferRequest,
    OWNERSHIP_UNSUPPORTED_MESSAGE,
};
use crate::ports::{IStorageProvider, ProviderError};
use crate::usecases::walk_tree::{WalkTreeUseCase, DEFAULT_MAX_DEPTH};

/// Tunables for a [`TransferItemsUseCase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Nesting limit passed to the tree walker
    pub max_depth: usize,
    /// Whether ownership mode also reassigns folders (not just files)
    pub ownership_includes_folders: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ownership_includes_folders: true,
        }
    }
}

impl From<&TransferConfig> for TransferOptions {
    fn from(config: &TransferConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            ownership_includes_folders: config.ownership_includes_folders,
        }
    }
}

/// Use case for bulk sharing or ownership transfer
pub struct TransferItemsUseCase {
    provider: Arc<dyn IStorageProvider>,
    walker: WalkTreeUseCase,
    options: TransferOptions,
}

impl TransferItemsUseCase {
    /// Creates a new TransferItemsUseCase
    ///
    /// # Arguments
    ///
    /// * `provider` - Storage provider the mutations are issued against
    /// * `options` - Walk depth limit and folder handling
    pub fn new(provider: Arc<dyn IStorageProvider>, options: TransferOptions) -> Self {
        Self {
            walker: WalkTreeUseCase::new(Arc::clone(&provider), options.max_depth),
            provider,
            options,
        }
    }

    /// Processes a whole request and returns its report
    ///
    /// Never fails: every problem ends up as a failure entry or a warning.
    pub async fn transfer(&self, request: &TransferRequest) -> TransferReport {
        let mut report = TransferReport::begin(request);
        info!(
            batch = %report.batch_id,
            roots = request.roots.len(),
            recipient = %request.target,
            mode = %request.mode,
            "Starting transfer batch"
        );

        let work = self.expand(&request.roots, &mut report).await;
        debug!(batch = %report.batch_id, items = work.len(), "Expansion complete");

        for item_id in work {
            self.apply(item_id, request, &mut report).await;
        }

        report.finish();
        info!(
            batch = %report.batch_id,
            total = report.total,
            succeeded = report.successes.len(),
            failed = report.failures.len(),
            "Transfer batch finished"
        );
        report
    }

    /// Builds the flat working list for `roots`
    ///
    /// A folder root is immediately followed by its descendants. Roots that
    /// do not resolve as folders stay single items; if a walk fails the
    /// root also stays a single item and a warning is added to `report`.
    pub async fn expand(&self, roots: &[ItemId], report: &mut TransferReport) -> Vec<ItemId> {
        let mut work = Vec::with_capacity(roots.len());

        for root in roots {
            work.push(root.clone());

            let folder = match self.provider.get_folder(root).await {
                Ok(folder) => folder,
                Err(e) if e.is_unresolved() => {
                    debug!(id = %root, "Root is not a folder");
                    continue;
                }
                Err(e) => {
                    warn!(id = %root, error = %e, "Could not resolve root as a folder");
                    continue;
                }
            };

            match self.walker.walk_from(&folder).await {
                Ok(descendants) => work.extend(descendants.into_iter().map(|item| item.id)),
                Err(e) => {
                    warn!(id = %root, error = %e, "Folder expansion abandoned");
                    report.warn(format!(
                        "{root}: contents of folder '{}' were not expanded: {e}",
                        folder.name
                    ));
                }
            }
        }

        work
    }

    /// Applies the request's mutation to one item and records the outcome
    async fn apply(&self, item_id: ItemId, request: &TransferRequest, report: &mut TransferReport) {
        let outcome = match request.mode {
            TransferMode::Share => self.share(&item_id, &request.target).await,
            TransferMode::TransferOwnership => self.hand_over(&item_id, &request.target).await,
        };

        match outcome {
            Ok(name) => {
                debug!(id = %item_id, name = %name, "Item handed over");
                report.record_success(item_id, name);
            }
            Err(ProviderError::UnsupportedTransfer(reason))
                if request.mode == TransferMode::TransferOwnership =>
            {
                debug!(id = %item_id, reason = %reason, "Ownership change refused");
                report.record_failure(
                    item_id,
                    ErrorKind::UnsupportedTransfer,
                    OWNERSHIP_UNSUPPORTED_MESSAGE,
                );
            }
            Err(e) => {
                debug!(id = %item_id, error = %e, "Item failed");
                report.record_failure(item_id, e.kind(), e.to_string());
            }
        }
    }

    /// Grants edit access, trying the id as a file and then as a folder
    ///
    /// Returns the display name of whatever was shared.
    async fn share(&self, item_id: &ItemId, target: &Email) -> Result<String, ProviderError> {
        let item = match self.provider.get_file(item_id).await {
            Ok(file) => file,
            Err(e) if e.is_unresolved() => self.provider.get_folder(item_id).await?,
            Err(e) => return Err(e),
        };
        self.provider.add_editor(&item, target).await?;
        Ok(item.name)
    }

    /// Makes `target` the owner, trying the id as a file and, when enabled,
    /// as a folder
    async fn hand_over(&self, item_id: &ItemId, target: &Email) -> Result<String, ProviderError> {
        let item = match self.provider.get_file(item_id).await {
            Ok(file) => file,
            Err(e) if e.is_unresolved() && self.options.ownership_includes_folders => {
                self.provider.get_folder(item_id).await?
            }
            Err(e) => return Err(e),
        };
        self.provider.set_owner(&item, target).await?;
        Ok(item.name)
    }
}
