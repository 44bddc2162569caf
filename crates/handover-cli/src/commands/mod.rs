//! Subcommand implementations for the `handover` binary

pub mod auth;
pub mod completions;
pub mod config;
pub mod list;
pub mod transfer;
pub mod tree;
