//! Custom error types for Taneleer
//!
//! This module defines the error hierarchy for the vault engine using thiserror
//! for ergonomic error definitions. Every error except [`VaultError::Format`]
//! is recoverable: it is reported back to whoever issued the command and no
//! state is written.

use thiserror::Error;

use crate::parser::CommandError;

/// The main error type for vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// A persisted file does not follow the `$`/`~` grammar.
    ///
    /// The store is considered corrupt past this point.
    #[error("Unrecognized formatting in {file} at line {line}: {reason}")]
    Format {
        file: String,
        line: usize,
        reason: String,
    },

    /// Malformed user command
    #[error(transparent)]
    Parse(#[from] CommandError),

    /// Validation errors for commands and names
    #[error("{0}")]
    Validation(String),

    /// A subtraction would take an item below zero
    #[error("This action would reduce {item} below zero. Try a value {available} or lower.")]
    Overdraw { item: String, available: u64 },

    /// A subtraction against an item the vault does not hold
    #[error("You cannot reduce {item} below 0.")]
    BelowZero { item: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A vault was requested by name and does not exist
    #[error("Vault *{name}* does not exist. Try: {}.", list_names(.available))]
    VaultNotFound {
        name: String,
        available: Vec<String>,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

fn list_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("`{}`", name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl VaultError {
    /// Create a "not found" error for vaults
    pub fn vault_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Vault",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for item notes
    pub fn note_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Note",
            identifier: identifier.into(),
        }
    }

    /// Create a format error for a persisted file
    pub fn format(file: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Check if this error means the store can no longer be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::VaultNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Overdraw { .. } | Self::BelowZero { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
