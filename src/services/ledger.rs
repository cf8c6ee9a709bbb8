//! Ledger service
//!
//! Command handling for vault contents: modification batches, vault creation
//! and deletion, zeroing items and showing vaults. Every call loads the
//! ledger and overlay fresh from the store and writes back in full.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::display::{format_tally, format_vault};
use crate::error::{VaultError, VaultResult};
use crate::models::{is_valid_name, GLOBAL_VAULT};
use crate::parser::parse_command;
use crate::storage::VaultStore;

use super::mutation::{apply_batch, Applied};

/// Name that selects the cross-vault tally in [`LedgerService::show`]
pub const TALLY_SELECTOR: &str = "*";

/// Service for vault and item changes
pub struct LedgerService<'a, S: VaultStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: VaultStore + ?Sized> LedgerService<'a, S> {
    /// Create a new ledger service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Parse and apply a modification command, one operation per line
    ///
    /// Nothing is saved unless every line parses and applies.
    pub fn update(&self, text: &str) -> VaultResult<String> {
        let mut ledger = self.store.load_ledger()?;
        let overlay = self.store.load_overlay()?;

        let operations = parse_command(text, &ledger)?;
        let applied = apply_batch(&mut ledger, &operations)?;

        self.store.save_ledger(&ledger, &overlay)?;
        self.store.record(&audit_entries(&applied))?;

        info!(operations = applied.len(), "applied modification batch");

        Ok(applied
            .iter()
            .map(Applied::confirmation)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Create an empty vault
    pub fn add_vault(&self, name: &str) -> VaultResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::Validation(
                "You must give a new vault name. Try: `vault add <name>`".into(),
            ));
        }

        let mut ledger = self.store.load_ledger()?;
        if ledger.contains(name) {
            return Err(VaultError::Duplicate {
                entity_type: "Vault",
                identifier: name.to_string(),
            });
        }
        if !is_valid_name(name) {
            return Err(VaultError::Validation(
                "Non-alphabetical characters are not valid in vault names.".into(),
            ));
        }

        let overlay = self.store.load_overlay()?;
        ledger.insert_vault(name);
        self.store.save_ledger(&ledger, &overlay)?;

        let message = format!("Created a new vault *{}*.", name);
        self.store.record(&[AuditEntry::create(
            EntityType::Vault,
            name,
            &ledger.account(name),
            Some(message.clone()),
        )])?;

        info!(vault = name, "created vault");
        Ok(message)
    }

    /// Permanently remove a vault
    ///
    /// `confirmation` must repeat the vault name exactly, otherwise nothing
    /// happens. Deleting `global` empties it; it is recreated on next load.
    pub fn delete_vault(&self, name: &str, confirmation: Option<&str>) -> VaultResult<String> {
        let mut ledger = self.store.load_ledger()?;
        if !ledger.contains(name) {
            return Err(VaultError::vault_not_found(name));
        }

        if confirmation != Some(name) {
            return Err(VaultError::Validation(format!(
                "Vault *{}* was not deleted. Repeat the vault name to confirm: `vault delete {} {}`",
                name, name, name
            )));
        }

        let overlay = self.store.load_overlay()?;
        let removed = ledger
            .remove_vault(name)
            .ok_or_else(|| VaultError::vault_not_found(name))?;
        self.store.save_ledger(&ledger, &overlay)?;

        let message = format!("Vault *{}* has been deleted.", name);
        self.store.record(&[AuditEntry::delete(
            EntityType::Vault,
            name,
            &removed,
            Some(message.clone()),
        )])?;

        info!(vault = name, "deleted vault");
        Ok(message)
    }

    /// Force an item's quantity to zero
    ///
    /// The item is dropped from the file on save unless it is a zero exception.
    pub fn zero_item(&self, vault: &str, item: &str) -> VaultResult<String> {
        let mut ledger = self.store.load_ledger()?;
        let overlay = self.store.load_overlay()?;

        let account = ledger
            .account_mut(vault)
            .ok_or_else(|| VaultError::vault_not_found(vault))?;
        let before = account
            .get(item)
            .ok_or_else(|| VaultError::item_not_found(format!("{}/{}", vault, item)))?;
        account.set(item, 0);

        self.store.save_ledger(&ledger, &overlay)?;

        let message = format!("Vault item *{}* in vault `{}` was set to 0.", item, vault);
        self.store.record(&[AuditEntry::update(
            EntityType::Item,
            format!("{}/{}", vault, item),
            &before,
            &0u64,
            Some(message.clone()),
        )])?;

        info!(vault, item, "zeroed item");
        Ok(message)
    }

    /// Render a vault, or every vault summed when given `*`
    ///
    /// With no name the global vault is shown.
    pub fn show(&self, name: Option<&str>) -> VaultResult<String> {
        let ledger = self.store.load_ledger()?;
        let overlay = self.store.load_overlay()?;

        let name = name.map(str::trim).unwrap_or(GLOBAL_VAULT);
        if name == TALLY_SELECTOR {
            return format_tally(&ledger, &overlay);
        }

        match ledger.account(name) {
            Some(account) => Ok(format_vault(name, account, &overlay)),
            None => Err(VaultError::VaultNotFound {
                name: name.to_string(),
                available: ledger.names(),
            }),
        }
    }

    /// Names of every vault, in stored order
    pub fn vault_names(&self) -> VaultResult<Vec<String>> {
        Ok(self.store.load_ledger()?.names())
    }
}

fn audit_entries(applied: &[Applied]) -> Vec<AuditEntry> {
    applied
        .iter()
        .map(|a| {
            let id = format!("{}/{}", a.operation.target_vault, a.operation.item);
            match a.before {
                Some(before) => AuditEntry::update(
                    EntityType::Item,
                    id,
                    &before,
                    &a.total,
                    Some(a.confirmation()),
                ),
                None => AuditEntry::create(EntityType::Item, id, &a.total, Some(a.confirmation())),
            }
        })
        .collect()
}
