//! Domain error types
//!
//! Errors raised while constructing or validating domain values such as
//! item identifiers, account emails and transfer modes.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Invalid provider item identifier
    #[error("Invalid item ID: {0}")]
    InvalidItemId(String),

    /// Unknown transfer mode name
    #[error("Invalid transfer mode: {0}")]
    InvalidMode(String),

    /// Invalid ID format (batch identifiers)
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
