//! Owned-item listing use case
//!
//! Lists the files and folders the authenticated account owns, which is
//! what a user picks transfer roots from.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DomainError, Item};
use crate::ports::{IStorageProvider, ProviderError};

/// Which kinds of owned items to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnedFilter {
    #[default]
    All,
    Folders,
    Files,
}

impl FromStr for OwnedFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(OwnedFilter::All),
            "folders" => Ok(OwnedFilter::Folders),
            "files" => Ok(OwnedFilter::Files),
            other => Err(DomainError::ValidationFailed(format!(
                "unknown filter '{other}'; expected all, folders or files"
            ))),
        }
    }
}

/// Owned items, folders and files kept apart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnedItems {
    pub folders: Vec<Item>,
    pub files: Vec<Item>,
}

impl OwnedItems {
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes across the listed files
    pub fn total_size(&self) -> u64 {
        self.files.iter().filter_map(|f| f.size).sum()
    }
}

/// Use case for listing owned items
pub struct ListOwnedItemsUseCase {
    provider: Arc<dyn IStorageProvider>,
}

impl ListOwnedItemsUseCase {
    pub fn new(provider: Arc<dyn IStorageProvider>) -> Self {
        Self { provider }
    }

    /// Lists owned folders and/or files, each in provider order
    ///
    /// # Errors
    ///
    /// Returns the first provider failure.
    pub async fn list(&self, filter: OwnedFilter) -> Result<OwnedItems, ProviderError> {
        let mut owned = OwnedItems::default();

        if filter != OwnedFilter::Files {
            owned.folders = self.provider.list_owned_folders().await?;
        }
        if filter != OwnedFilter::Folders {
            owned.files = self.provider.list_owned_files().await?;
        }

        debug!(
            folders = owned.folders.len(),
            files = owned.files.len(),
            "Listed owned items"
        );
        Ok(owned)
    }
}
