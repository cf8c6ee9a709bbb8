//! Taneleer - shared item vaults kept in a plain text ledger
//!
//! This library provides the vault engine behind the `vault` command: named
//! vaults of item quantities, a compact modification language
//! (`thomas -20gp`), atomic batches, and a display overlay of item names,
//! notes, priority and items kept at zero.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Ledger, operations and the display overlay
//! - `parser`: The modification command language
//! - `storage`: The `$`/`~` flat-file format and the store abstraction
//! - `services`: Command handling on top of storage
//! - `display`: Rendering vaults, tallies and the overlay
//! - `audit`: Audit logging system
//! - `cli`: clap subcommands for the `vault` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use taneleer::config::paths::VaultPaths;
//! use taneleer::services::LedgerService;
//! use taneleer::storage::Storage;
//!
//! let storage = Storage::new(VaultPaths::new()?)?;
//! let reply = LedgerService::new(&storage).update("thomas +50gp")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod storage;

pub use error::{VaultError, VaultResult};
