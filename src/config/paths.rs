//! Path management for Taneleer
//!
//! Resolves where the ledger, the overlay, the settings and the audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `TANELEER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/taneleer` or `~/.config/taneleer`
//! 3. Windows: `%APPDATA%\taneleer`
//!
//! The ledger file alone can be moved elsewhere with `VAULT_LOCATION`.

use std::path::PathBuf;

use crate::error::VaultError;

/// Environment variable overriding the base directory
pub const DATA_DIR_VAR: &str = "TANELEER_DATA_DIR";

/// Environment variable overriding the ledger file
pub const VAULT_LOCATION_VAR: &str = "VAULT_LOCATION";

/// Manages all paths used by Taneleer
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Base directory for all Taneleer data
    base_dir: PathBuf,
    /// Explicit ledger file location, if overridden
    ledger_override: Option<PathBuf>,
}

impl VaultPaths {
    /// Create a new VaultPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = match std::env::var(DATA_DIR_VAR) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_path()?,
        };
        let paths = Self::with_base_dir(base_dir);

        Ok(match std::env::var(VAULT_LOCATION_VAR) {
            Ok(ledger_file) => paths.with_ledger_file(PathBuf::from(ledger_file)),
            Err(_) => paths,
        })
    }

    /// Create VaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            ledger_override: None,
        }
    }

    /// Use a specific ledger file instead of the one in the base directory
    pub fn with_ledger_file(mut self, ledger_file: PathBuf) -> Self {
        self.ledger_override = Some(ledger_file);
        self
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the ledger file (vault.txt)
    pub fn ledger_file(&self) -> PathBuf {
        self.ledger_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("vault.txt"))
    }

    /// Get the path to the overlay file (vault-config.txt)
    pub fn overlay_file(&self) -> PathBuf {
        self.base_dir.join("vault-config.txt")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| VaultError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("taneleer"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| VaultError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("taneleer"))
}
