//! Handover Drive - Google Drive v3 API client
//!
//! Provides async client for:
//! - Item lookups and paginated folder/ownership listings
//! - Permission changes (ownership transfer, edit grants)
//! - Bearer token storage in the system keyring
//!
//! ## Modules
//!
//! - [`auth`] - Token storage and resolution
//! - [`client`] - Google Drive REST HTTP client
//! - [`provider`] - `IStorageProvider` implementation over [`client::DriveClient`]

pub mod auth;
pub mod client;
pub mod provider;

use handover_core::ports::ProviderError;
use thiserror::Error;

/// Drive `errors[].reason` values meaning an ownership change is refused by
/// policy rather than by missing permissions
pub const OWNERSHIP_POLICY_REASONS: &[&str] = &[
    "consentRequiredForOwnershipTransfer",
    "ownershipChangeAcrossDomainNotPermitted",
    "crossDomainMoveRestriction",
    "publishOutNotPermitted",
    "ownerOnTeamDriveItemNotSupported",
];

/// Errors that can occur when communicating with the Google Drive API
#[derive(Debug, Error)]
pub enum DriveError {
    /// Authentication credentials are missing, invalid or expired (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request was refused (403)
    #[error("Forbidden: {message}")]
    Forbidden {
        /// First `errors[].reason` from the response body, if any
        reason: Option<String>,
        message: String,
    },

    /// The requested resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was malformed or rejected (400)
    #[error("Bad request: {message}")]
    BadRequest {
        reason: Option<String>,
        message: String,
    },

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DriveError {
    /// True when Drive refused an ownership change by policy
    pub fn is_ownership_policy(&self) -> bool {
        match self {
            DriveError::Forbidden { reason, .. } => reason
                .as_deref()
                .is_some_and(|r| OWNERSHIP_POLICY_REASONS.contains(&r)),
            DriveError::BadRequest { reason, message } => {
                reason.as_deref() == Some("invalidSharingRequest")
                    && message.to_lowercase().contains("owner")
            }
            _ => false,
        }
    }
}

impl From<DriveError> for ProviderError {
    fn from(err: DriveError) -> Self {
        if err.is_ownership_policy() {
            return match err {
                DriveError::Forbidden { message, .. } | DriveError::BadRequest { message, .. } => {
                    ProviderError::UnsupportedTransfer(message)
                }
                other => ProviderError::UnsupportedTransfer(other.to_string()),
            };
        }
        match err {
            DriveError::NotFound(msg) => ProviderError::NotFound(msg),
            DriveError::Unauthorized(msg) => ProviderError::AccessDenied(msg),
            DriveError::Forbidden { message, .. } => ProviderError::AccessDenied(message),
            DriveError::BadRequest { message, .. } => ProviderError::Unknown(message),
            DriveError::Status { message, .. } => ProviderError::Unknown(message),
            other => ProviderError::Unknown(other.to_string()),
        }
    }
}
