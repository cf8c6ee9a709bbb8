//! Storage layer for Taneleer
//!
//! The ledger and the overlay are kept in two flat text files (see
//! [`codec`]) written atomically. Every command reads both files fresh and
//! writes back in full; nothing is cached between commands.
//!
//! Services talk to storage through the [`VaultStore`] trait so another
//! backend can be handed in. Callers must serialize commands that write:
//! two concurrent read-modify-write cycles will lose one of the updates.

pub mod codec;
pub mod file_io;

pub use codec::{decode_ledger, decode_overlay, encode_ledger, encode_overlay};
pub use file_io::{read_text, write_text_atomic};

use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::VaultPaths;
use crate::config::settings::Settings;
use crate::error::VaultResult;
use crate::models::{Ledger, Overlay};

/// Where vault state is loaded from and saved to
pub trait VaultStore {
    /// Load the ledger; the global vault is always present in the result
    fn load_ledger(&self) -> VaultResult<Ledger>;

    /// Save the ledger, dropping zero quantities the overlay does not keep
    fn save_ledger(&self, ledger: &Ledger, overlay: &Overlay) -> VaultResult<()>;

    fn load_overlay(&self) -> VaultResult<Overlay>;

    fn save_overlay(&self, overlay: &Overlay) -> VaultResult<()>;

    /// Record changes that were just persisted
    fn record(&self, entries: &[AuditEntry]) -> VaultResult<()> {
        let _ = entries;
        Ok(())
    }
}

/// File-backed store
pub struct Storage {
    paths: VaultPaths,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with audit logging enabled
    pub fn new(paths: VaultPaths) -> VaultResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Create a Storage instance honouring the user's settings
    pub fn with_settings(paths: VaultPaths, settings: &Settings) -> VaultResult<Self> {
        let mut storage = Self::new(paths)?;
        if !settings.audit_enabled {
            storage.audit = None;
        }
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    /// Get the audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }
}

impl VaultStore for Storage {
    fn load_ledger(&self) -> VaultResult<Ledger> {
        let path = self.paths.ledger_file();
        let mut ledger = match read_text(&path)? {
            Some(contents) => decode_ledger(&path.display().to_string(), &contents)?,
            None => Ledger::new(),
        };
        ledger.ensure_global();

        debug!(path = %path.display(), vaults = ledger.len(), "loaded ledger");
        Ok(ledger)
    }

    fn save_ledger(&self, ledger: &Ledger, overlay: &Overlay) -> VaultResult<()> {
        let path = self.paths.ledger_file();
        write_text_atomic(&path, &encode_ledger(ledger, overlay))?;

        debug!(path = %path.display(), vaults = ledger.len(), "saved ledger");
        Ok(())
    }

    fn load_overlay(&self) -> VaultResult<Overlay> {
        let path = self.paths.overlay_file();
        match read_text(&path)? {
            Some(contents) => decode_overlay(&path.display().to_string(), &contents),
            None => Ok(Overlay::new()),
        }
    }

    fn save_overlay(&self, overlay: &Overlay) -> VaultResult<()> {
        let path = self.paths.overlay_file();
        write_text_atomic(&path, &encode_overlay(overlay))?;

        debug!(path = %path.display(), "saved overlay");
        Ok(())
    }

    fn record(&self, entries: &[AuditEntry]) -> VaultResult<()> {
        match &self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_missing_files_load_empty() {
        let (_temp_dir, storage) = create_test_storage();

        let ledger = storage.load_ledger().unwrap();
        assert_eq!(ledger.names(), vec!["global"]);
        assert!(ledger.account("global").unwrap().is_empty());
        assert!(storage.load_overlay().unwrap().is_empty());
    }

    #[test]
    fn test_global_added_when_file_omits_it() {
        let (temp_dir, storage) = create_test_storage();
        fs::write(temp_dir.path().join("vault.txt"), "$ thomas\n~ 5 gp").unwrap();

        let ledger = storage.load_ledger().unwrap();
        assert_eq!(ledger.names(), vec!["global", "thomas"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, storage) = create_test_storage();

        let mut ledger = storage.load_ledger().unwrap();
        ledger.account_mut("global").unwrap().set("gp", 50);
        ledger.insert_vault("thomas");
        ledger.account_mut("thomas").unwrap().set("sp", 0);
        storage.save_ledger(&ledger, &Overlay::new()).unwrap();

        let on_disk = fs::read_to_string(temp_dir.path().join("vault.txt")).unwrap();
        assert_eq!(on_disk, "$ global\n~ 50 gp\n$ thomas");

        let reloaded = storage.load_ledger().unwrap();
        assert_eq!(reloaded.account("global").unwrap().get("gp"), Some(50));
        assert!(reloaded.account("thomas").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_ledger_is_fatal() {
        let (temp_dir, storage) = create_test_storage();
        fs::write(temp_dir.path().join("vault.txt"), "$ global\nnonsense").unwrap();

        let err = storage.load_ledger().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_overlay_save_and_reload() {
        let (_temp_dir, storage) = create_test_storage();

        let mut overlay = Overlay::new();
        overlay.replace_priority(["sp", "gp"]);
        storage.save_overlay(&overlay).unwrap();

        assert_eq!(storage.load_overlay().unwrap(), overlay);
    }

    #[test]
    fn test_record_respects_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let storage = Storage::with_settings(paths, &settings).unwrap();

        let entry = AuditEntry::create(EntityType::Vault, "thomas", &json!([]), None);
        storage.record(&[entry]).unwrap();

        assert!(storage.audit().is_none());
        assert!(!temp_dir.path().join("audit.log").exists());
    }

    #[test]
    fn test_record_appends_to_audit_log() {
        let (_temp_dir, storage) = create_test_storage();

        let entry = AuditEntry::create(EntityType::Vault, "thomas", &json!([]), None);
        storage.record(&[entry]).unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
    }
}
