//! Domain entities and business logic
//!
//! This module contains the core domain types for Handover:
//! - Newtypes for item identifiers and account addresses
//! - The item snapshot returned by the storage provider
//! - Transfer request and report types
//! - Domain-specific error types

pub mod errors;
pub mod item;
pub mod newtypes;
pub mod transfer;

// Re-export commonly used types
pub use errors::DomainError;
pub use item::{Item, ItemKind};
pub use newtypes::*;
pub use transfer::{
    ErrorKind, TransferFailure, TransferMode, TransferReport, TransferRequest, TransferSuccess,
    OWNERSHIP_UNSUPPORTED_MESSAGE,
};
