//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the domain core depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IStorageProvider`] - Cloud storage lookups and permission changes

pub mod storage_provider;

pub use storage_provider::{Credentials, IStorageProvider, ProviderError};
