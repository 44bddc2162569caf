//! Item entity
//!
//! An [`Item`] is an immutable snapshot of a file or folder as reported by
//! the storage provider. Items are fetched on demand and never persisted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::ItemId;

/// Whether an item is a file or a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Folder,
}

impl ItemKind {
    /// Returns true for [`ItemKind::Folder`]
    pub fn is_folder(&self) -> bool {
        matches!(self, ItemKind::Folder)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::File => write!(f, "file"),
            ItemKind::Folder => write!(f, "folder"),
        }
    }
}

/// A file or folder record in the remote storage system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Provider-assigned identifier
    pub id: ItemId,
    /// File or folder
    pub kind: ItemKind,
    /// Display name
    pub name: String,
    /// Email of the current owner, when the provider reports one
    pub owner: Option<String>,
    /// Size in bytes (files only)
    pub size: Option<u64>,
    /// Last modification time
    pub modified: Option<DateTime<Utc>>,
}

impl Item {
    /// Creates a file snapshot with only the required fields set
    pub fn file(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: ItemKind::File,
            name: name.into(),
            owner: None,
            size: None,
            modified: None,
        }
    }

    /// Creates a folder snapshot with only the required fields set
    pub fn folder(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: ItemKind::Folder,
            name: name.into(),
            owner: None,
            size: None,
            modified: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}
