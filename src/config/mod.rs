//! Configuration module for Taneleer
//!
//! This module provides configuration management including:
//! - Path resolution for the ledger, overlay, settings and audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
