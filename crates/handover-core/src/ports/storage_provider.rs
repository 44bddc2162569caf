//! Storage provider port (driven/secondary port)
//!
//! This module defines the interface the use cases need from a cloud
//! storage provider: resolving items by kind, listing folder children and
//! owned items, and the two permission mutations (set owner, add editor).
//! The primary implementation targets Google Drive v3 in `handover-drive`.
//!
//! ## Design Notes
//!
//! - Methods return [`ProviderError`] rather than `anyhow::Error` so that
//!   callers can branch on the failure classification (not found, access
//!   denied, wrong kind, policy refusal) instead of matching message text.
//! - Uses `#[async_trait]` for async trait methods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Email, ErrorKind, Item, ItemId, ItemKind};

// ============================================================================
// ProviderError
// ============================================================================

/// Classified failure of a single provider call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The identifier does not resolve to any item
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller's credentials do not grant access
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The identifier resolves, but to the other kind of item
    #[error("{id} is a {actual}, not a {expected}")]
    WrongKind {
        id: ItemId,
        expected: ItemKind,
        actual: ItemKind,
    },

    /// The provider refused an ownership change by policy (e.g. cross-domain)
    #[error("Ownership transfer not supported: {0}")]
    UnsupportedTransfer(String),

    /// Any other provider failure, message passed through verbatim
    #[error("{0}")]
    Unknown(String),
}

impl ProviderError {
    /// The report classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::NotFound(_) => ErrorKind::NotFound,
            ProviderError::AccessDenied(_) => ErrorKind::AccessDenied,
            ProviderError::WrongKind { .. } => ErrorKind::WrongKind,
            ProviderError::UnsupportedTransfer(_) => ErrorKind::UnsupportedTransfer,
            ProviderError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// True when the identifier simply is not an item of the requested kind,
    /// which makes trying the other kind worthwhile
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            ProviderError::NotFound(_) | ProviderError::WrongKind { .. }
        )
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Bearer credentials handed to a provider adapter
///
/// Acquisition and refresh happen outside this crate; the adapter only
/// attaches the access token to each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token for authenticating API requests
    pub access_token: String,
    /// When the access token expires, if known
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Returns true if the token is known to have expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }
}

// ============================================================================
// IStorageProvider trait
// ============================================================================

/// Port trait for cloud storage provider operations
///
/// Every call is a single request/response against the remote provider.
/// Implementations must not retry; callers decide what a failure means.
#[async_trait::async_trait]
pub trait IStorageProvider: Send + Sync {
    /// Lists every folder owned by the authenticated account
    async fn list_owned_folders(&self) -> Result<Vec<Item>, ProviderError>;

    /// Lists every file owned by the authenticated account
    async fn list_owned_files(&self) -> Result<Vec<Item>, ProviderError>;

    /// Resolves `id` as a file
    ///
    /// Fails with [`ProviderError::WrongKind`] when `id` is a folder.
    async fn get_file(&self, id: &ItemId) -> Result<Item, ProviderError>;

    /// Resolves `id` as a folder
    ///
    /// Fails with [`ProviderError::WrongKind`] when `id` is a file.
    async fn get_folder(&self, id: &ItemId) -> Result<Item, ProviderError>;

    /// Direct child files of a folder, in provider listing order
    async fn list_child_files(&self, folder: &ItemId) -> Result<Vec<Item>, ProviderError>;

    /// Direct child folders of a folder, in provider listing order
    async fn list_child_folders(&self, folder: &ItemId) -> Result<Vec<Item>, ProviderError>;

    /// Makes `account` the owner of `item`
    async fn set_owner(&self, item: &Item, account: &Email) -> Result<(), ProviderError>;

    /// Grants `account` edit permission on `item`
    ///
    /// Granting to an account that already has edit access succeeds.
    async fn add_editor(&self, item: &Item, account: &Email) -> Result<(), ProviderError>;
}
