//! Handover Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Item`, `TransferRequest`, `TransferReport`
//! - **Use cases** - `WalkTreeUseCase`, `TransferItemsUseCase`, `ListOwnedItemsUseCase`
//! - **Port definitions** - `IStorageProvider`, implemented by adapter crates
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
