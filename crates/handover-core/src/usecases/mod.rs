//! Use cases (interactors) for Handover
//!
//! This module contains the application use cases that orchestrate
//! domain entities and the storage provider port. Use cases are thin
//! coordinators that delegate I/O to the port.
//!
//! ## Use Cases
//!
//! - [`WalkTreeUseCase`] - Flatten a folder into its descendants
//! - [`TransferItemsUseCase`] - Bulk share or ownership transfer
//! - [`ListOwnedItemsUseCase`] - List the account's own files and folders

pub mod list_owned;
pub mod transfer_items;
pub mod walk_tree;

#[cfg(test)]
pub(crate) mod test_support;

pub use list_owned::{ListOwnedItemsUseCase, OwnedFilter, OwnedItems};
pub use transfer_items::{TransferItemsUseCase, TransferOptions};
pub use walk_tree::{WalkError, WalkTreeUseCase, DEFAULT_MAX_DEPTH};
