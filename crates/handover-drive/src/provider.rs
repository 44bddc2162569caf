//! DriveStorageProvider - IStorageProvider implementation for Google Drive
//!
//! Wraps the [`DriveClient`] and maps its responses onto the
//! [`IStorageProvider`] port contract.
//!
//! ## Design Notes
//!
//! - Kind checks happen here: Drive has a single `files.get` for both
//!   files and folders, so `get_file`/`get_folder` fetch the resource and
//!   compare its mime type against the requested kind.
//! - [`DriveError`](crate::DriveError) values are classified into
//!   [`ProviderError`] through its `From` impl.

use handover_core::config::DriveConfig;
use handover_core::domain::{Email, Item, ItemId, ItemKind};
use handover_core::ports::{Credentials, IStorageProvider, ProviderError};
use tracing::{debug, warn};

use crate::client::{children_query, owned_query, DriveClient, PermissionRequest, PermissionRole};

/// Storage provider implementation that delegates to the Google Drive API
pub struct DriveStorageProvider {
    client: DriveClient,
    /// Whether edit grants email the grantee
    send_notification_email: bool,
}

impl DriveStorageProvider {
    /// Creates a new `DriveStorageProvider` wrapping the given [`DriveClient`]
    pub fn new(client: DriveClient) -> Self {
        Self {
            client,
            send_notification_email: false,
        }
    }

    /// Builds a provider from the `drive` configuration section
    pub fn from_config(config: &DriveConfig, credentials: &Credentials) -> Self {
        if credentials.is_expired() {
            warn!("Access token has expired; Drive will likely reject requests");
        }
        Self::new(DriveClient::from_config(config, &credentials.access_token))
            .with_notification_email(config.send_notification_email)
    }

    pub fn with_notification_email(mut self, send: bool) -> Self {
        self.send_notification_email = send;
        self
    }

    pub fn client(&self) -> &DriveClient {
        &self.client
    }

    async fn resolve(&self, id: &ItemId, expected: ItemKind) -> Result<Item, ProviderError> {
        let item = self.client.get_file(id.as_str()).await?.into_item()?;
        if item.kind != expected {
            debug!(%id, %expected, actual = %item.kind, "Item resolved to the other kind");
            return Err(ProviderError::WrongKind {
                id: id.clone(),
                expected,
                actual: item.kind,
            });
        }
        Ok(item)
    }

    async fn list(&self, query: &str) -> Result<Vec<Item>, ProviderError> {
        self.client
            .list_files(query)
            .await?
            .into_iter()
            .map(|f| f.into_item().map_err(ProviderError::from))
            .collect()
    }
}

#[async_trait::async_trait]
impl IStorageProvider for DriveStorageProvider {
    async fn list_owned_folders(&self) -> Result<Vec<Item>, ProviderError> {
        self.list(&owned_query(ItemKind::Folder)).await
    }

    async fn list_owned_files(&self) -> Result<Vec<Item>, ProviderError> {
        self.list(&owned_query(ItemKind::File)).await
    }

    async fn get_file(&self, id: &ItemId) -> Result<Item, ProviderError> {
        self.resolve(id, ItemKind::File).await
    }

    async fn get_folder(&self, id: &ItemId) -> Result<Item, ProviderError> {
        self.resolve(id, ItemKind::Folder).await
    }

    async fn list_child_files(&self, folder: &ItemId) -> Result<Vec<Item>, ProviderError> {
        self.list(&children_query(folder, ItemKind::File)).await
    }

    async fn list_child_folders(&self, folder: &ItemId) -> Result<Vec<Item>, ProviderError> {
        self.list(&children_query(folder, ItemKind::Folder)).await
    }

    async fn set_owner(&self, item: &Item, account: &Email) -> Result<(), ProviderError> {
        debug!(id = %item.id, kind = %item.kind, %account, "DriveStorageProvider::set_owner");
        let body = PermissionRequest::user(PermissionRole::Owner, account.as_str());
        self.client
            .create_permission(item.id.as_str(), &body, true, true)
            .await?;
        Ok(())
    }

    async fn add_editor(&self, item: &Item, account: &Email) -> Result<(), ProviderError> {
        debug!(id = %item.id, kind = %item.kind, %account, "DriveStorageProvider::add_editor");
        let body = PermissionRequest::user(PermissionRole::Writer, account.as_str());
        self.client
            .create_permission(
                item.id.as_str(),
                &body,
                false,
                self.send_notification_email,
            )
            .await?;
        Ok(())
    }
}
