//! Google Drive v3 API client
//!
//! Provides a typed HTTP client for the Drive REST API. Handles the bearer
//! authorization header, JSON (de)serialization, `nextPageToken` pagination
//! and mapping of error responses onto [`DriveError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use handover_drive::client::DriveClient;
//!
//! # async fn example() -> Result<(), handover_drive::DriveError> {
//! let client = DriveClient::new("access-token-here");
//! let file = client.get_file("1AbCdEf").await?;
//! println!("{} ({})", file.name, file.mime_type);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use handover_core::config::{DriveConfig, DEFAULT_DRIVE_BASE_URL};
use handover_core::domain::{Item, ItemId, ItemKind};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DriveError;

/// Mime type Drive uses to mark folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Fields requested for every file resource
const FILE_FIELDS: &str = "id,name,mimeType,size,modifiedTime,owners(emailAddress)";

/// Default number of items per listing page
const DEFAULT_PAGE_SIZE: u32 = 100;

// ============================================================================
// Drive API response types
// ============================================================================

/// A file resource as returned by `files.get` / `files.list`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Byte size; Drive encodes int64 values as strings
    pub size: Option<String>,
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owners: Vec<DriveUser>,
}

/// A user reference inside a file resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveUser {
    pub email_address: Option<String>,
}

impl DriveFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    pub fn kind(&self) -> ItemKind {
        if self.is_folder() {
            ItemKind::Folder
        } else {
            ItemKind::File
        }
    }

    /// Converts the resource into a domain [`Item`]
    pub fn into_item(self) -> Result<Item, DriveError> {
        let kind = self.kind();
        let id = ItemId::new(self.id)
            .map_err(|e| DriveError::InvalidResponse(format!("bad file id: {e}")))?;

        let mut item = match kind {
            ItemKind::File => Item::file(id, self.name),
            ItemKind::Folder => Item::folder(id, self.name),
        };
        if let Some(owner) = self.owners.into_iter().find_map(|o| o.email_address) {
            item = item.with_owner(owner);
        }
        if let Some(size) = self.size.as_deref().and_then(|s| s.parse().ok()) {
            item = item.with_size(size);
        }
        if let Some(modified) = self.modified_time {
            item = item.with_modified(modified);
        }
        Ok(item)
    }
}

/// One page of a `files.list` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListPage {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

/// Error envelope Drive returns on non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

// ============================================================================
// Permissions
// ============================================================================

/// Role granted by a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionRole {
    Owner,
    Writer,
}

/// Body of `permissions.create` for a single user grantee
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequest {
    pub role: PermissionRole,
    #[serde(rename = "type")]
    pub grantee_type: &'static str,
    pub email_address: String,
}

impl PermissionRequest {
    pub fn user(role: PermissionRole, email: impl Into<String>) -> Self {
        Self {
            role,
            grantee_type: "user",
            email_address: email.into(),
        }
    }
}

/// Permission resource returned by `permissions.create`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub role: Option<PermissionRole>,
}

// ============================================================================
// Queries
// ============================================================================

fn mime_clause(kind: ItemKind) -> String {
    match kind {
        ItemKind::Folder => format!("mimeType = '{FOLDER_MIME_TYPE}'"),
        ItemKind::File => format!("mimeType != '{FOLDER_MIME_TYPE}'"),
    }
}

/// `files.list` query for the direct, untrashed children of `folder`
pub fn children_query(folder: &ItemId, kind: ItemKind) -> String {
    format!(
        "'{}' in parents and {} and trashed = false",
        folder,
        mime_clause(kind)
    )
}

/// `files.list` query for untrashed items owned by the caller
pub fn owned_query(kind: ItemKind) -> String {
    format!("'me' in owners and {} and trashed = false", mime_clause(kind))
}

// ============================================================================
// DriveClient
// ============================================================================

/// HTTP client for Google Drive v3 calls
///
/// Wraps `reqwest::Client` with the bearer token and base URL. Every
/// method issues its requests sequentially and never retries.
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// OAuth2 access token
    access_token: String,
    /// Items requested per listing page
    page_size: u32,
}

impl DriveClient {
    /// Creates a new DriveClient against the public Drive endpoint
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DEFAULT_DRIVE_BASE_URL)
    }

    /// Creates a new DriveClient with a custom base URL (useful for testing)
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Creates a client from the `drive` configuration section
    pub fn from_config(config: &DriveConfig, access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, config.base_url.clone()).with_page_size(config.page_size)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to base URL (e.g., "/files/{id}")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Sends a request and turns non-success statuses into [`DriveError`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, DriveError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_status(status.as_u16(), &body))
    }

    /// Fetches a single file resource (`GET /files/{id}`)
    pub async fn get_file(&self, id: &str) -> Result<DriveFile, DriveError> {
        debug!(id, "Fetching file metadata");

        let response = self
            .send(
                self.request(Method::GET, &format!("/files/{id}"))
                    .query(&[("fields", FILE_FIELDS), ("supportsAllDrives", "true")]),
            )
            .await?;

        response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(format!("file resource: {e}")))
    }

    /// Runs a `files.list` query, following `nextPageToken` to the end
    pub async fn list_files(&self, query: &str) -> Result<Vec<DriveFile>, DriveError> {
        let fields = format!("nextPageToken,files({FILE_FIELDS})");
        let page_size = self.page_size.to_string();
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let mut request = self.request(Method::GET, "/files").query(&[
                ("q", query),
                ("fields", fields.as_str()),
                ("pageSize", page_size.as_str()),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: FileListPage = self
                .send(request)
                .await?
                .json()
                .await
                .map_err(|e| DriveError::InvalidResponse(format!("file list: {e}")))?;
            pages += 1;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(query, pages, items = files.len(), "Listed files");
        Ok(files)
    }

    /// Creates a permission on a file or folder (`POST /files/{id}/permissions`)
    ///
    /// With `transfer_ownership` set, Drive makes the grantee the owner and
    /// always notifies them; otherwise `send_notification_email` decides.
    pub async fn create_permission(
        &self,
        id: &str,
        permission: &PermissionRequest,
        transfer_ownership: bool,
        send_notification_email: bool,
    ) -> Result<Permission, DriveError> {
        debug!(
            id,
            role = ?permission.role,
            grantee = %permission.email_address,
            "Creating permission"
        );

        let mut request = self
            .request(Method::POST, &format!("/files/{id}/permissions"))
            .query(&[("supportsAllDrives", "true")])
            .json(permission);
        request = if transfer_ownership {
            request.query(&[("transferOwnership", "true")])
        } else {
            request.query(&[(
                "sendNotificationEmail",
                if send_notification_email { "true" } else { "false" },
            )])
        };

        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(format!("permission resource: {e}")))
    }
}

/// Builds a [`DriveError`] from a status code and the raw response body
pub(crate) fn error_from_status(status: u16, body: &str) -> DriveError {
    let (message, reason) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (
            envelope.error.message,
            envelope.error.errors.into_iter().find_map(|d| d.reason),
        ),
        Err(_) if body.trim().is_empty() => (format!("HTTP {status}"), None),
        Err(_) => (body.trim().to_string(), None),
    };

    match status {
        400 => DriveError::BadRequest { reason, message },
        401 => DriveError::Unauthorized(message),
        403 => DriveError::Forbidden { reason, message },
        404 => DriveError::NotFound(message),
        _ => DriveError::Status { status, message },
    }
}
