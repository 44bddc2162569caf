//! Folder tree walking use case
//!
//! Flattens a folder into the identifiers of everything beneath it, in
//! depth-first pre-order: a folder's files first, then each subfolder
//! followed immediately by its own contents.
//!
//! The walk keeps the chain of folders between the root and the current
//! position. A folder that shows up again inside its own subtree is a cycle
//! and aborts the walk; the same folder reached through two unrelated
//! branches is walked twice, once per reference.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Item, ItemId};
use crate::ports::{IStorageProvider, ProviderError};

/// Default limit on folder nesting below the walked root
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Reasons a walk stops before covering the whole tree
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalkError {
    /// Resolving or listing a folder failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A folder contains one of its own ancestors
    #[error("Folder cycle detected: {folder_id} contains itself")]
    CycleDetected { folder_id: ItemId },

    /// The tree nests deeper than the configured limit
    #[error("Folder nesting exceeds {max_depth} levels")]
    DepthExceeded { max_depth: usize },
}

/// One open folder on the walk stack
struct Frame {
    folder: ItemId,
    subfolders: std::vec::IntoIter<Item>,
}

/// Use case for expanding a folder into its descendants
pub struct WalkTreeUseCase {
    provider: Arc<dyn IStorageProvider>,
    max_depth: usize,
}

impl WalkTreeUseCase {
    /// Creates a walker over `provider` with the given nesting limit
    pub fn new(provider: Arc<dyn IStorageProvider>, max_depth: usize) -> Self {
        Self {
            provider,
            max_depth,
        }
    }

    /// Returns the identifiers of every file and folder below `folder_id`
    ///
    /// The root itself is not part of the output.
    ///
    /// # Errors
    ///
    /// Fails if `folder_id` is not an accessible folder, if any listing
    /// fails, or on a cycle or excessive depth.
    pub async fn walk(&self, folder_id: &ItemId) -> Result<Vec<ItemId>, WalkError> {
        Ok(self
            .walk_items(folder_id)
            .await?
            .into_iter()
            .map(|item| item.id)
            .collect())
    }

    /// Like [`walk`](Self::walk), but returns the item snapshots
    pub async fn walk_items(&self, folder_id: &ItemId) -> Result<Vec<Item>, WalkError> {
        let root = self.provider.get_folder(folder_id).await?;
        self.walk_from(&root).await
    }

    /// Walks below an already-resolved folder
    pub async fn walk_from(&self, root: &Item) -> Result<Vec<Item>, WalkError> {
        let mut out = Vec::new();
        let mut stack = vec![self.open(&root.id, &mut out).await?];

        while let Some(frame) = stack.last_mut() {
            let Some(sub) = frame.subfolders.next() else {
                stack.pop();
                continue;
            };

            if stack.iter().any(|f| f.folder == sub.id) {
                warn!(folder = %sub.id, root = %root.id, "Folder cycle detected");
                return Err(WalkError::CycleDetected { folder_id: sub.id });
            }
            if stack.len() > self.max_depth {
                warn!(root = %root.id, max_depth = self.max_depth, "Folder nesting too deep");
                return Err(WalkError::DepthExceeded {
                    max_depth: self.max_depth,
                });
            }

            let sub_id = sub.id.clone();
            out.push(sub);
            let frame = self.open(&sub_id, &mut out).await?;
            stack.push(frame);
        }

        debug!(root = %root.id, descendants = out.len(), "Walk complete");
        Ok(out)
    }

    /// Emits a folder's files and returns a frame over its subfolders
    async fn open(&self, folder: &ItemId, out: &mut Vec<Item>) -> Result<Frame, WalkError> {
        let files = self.provider.list_child_files(folder).await?;
        let folders = self.provider.list_child_folders(folder).await?;
        debug!(
            folder = %folder,
            files = files.len(),
            folders = folders.len(),
            "Listed folder"
        );
        out.extend(files);
        Ok(Frame {
            folder: folder.clone(),
            subfolders: folders.into_iter(),
        })
    }
}
