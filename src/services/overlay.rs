//! Overlay service
//!
//! Configuration commands: display names, notes, priority and zero
//! exceptions. These never touch the ledger.

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::display::format_overlay;
use crate::error::{VaultError, VaultResult};
use crate::models::{is_valid_name, Overlay};
use crate::storage::VaultStore;

/// Service for display overlay changes
pub struct OverlayService<'a, S: VaultStore + ?Sized> {
    store: &'a S,
}

fn validate_item(item: &str) -> VaultResult<()> {
    if is_valid_name(item) {
        Ok(())
    } else {
        Err(VaultError::Validation(format!(
            "`{}` is not a valid item name. Names must be alphabetical.",
            item
        )))
    }
}

/// Collapse runs of whitespace so the text survives a save and reload
fn normalize_text(text: &str) -> VaultResult<String> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(VaultError::Validation("Text cannot be empty.".into()));
    }
    Ok(text)
}

impl<'a, S: VaultStore + ?Sized> OverlayService<'a, S> {
    /// Create a new overlay service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load, change and save the overlay, then record the change
    fn modify<F>(&self, change: F) -> VaultResult<String>
    where
        F: FnOnce(&mut Overlay) -> VaultResult<(AuditEntry, String)>,
    {
        let mut overlay = self.store.load_overlay()?;
        let (entry, message) = change(&mut overlay)?;
        self.store.save_overlay(&overlay)?;

        info!(entity = %entry.entity_type, id = %entry.entity_id, "updated overlay");
        self.store.record(&[entry])?;
        Ok(message)
    }

    /// Show an item under a different name
    pub fn set_display_name(&self, item: &str, name: &str) -> VaultResult<String> {
        validate_item(item)?;
        let name = normalize_text(name)?;

        self.modify(|overlay| {
            let before = overlay.display_names.insert(item.to_string(), name.clone());
            let message = format!("Item *{}* is now shown as _{}_.", item, name);
            let entry = match before {
                Some(before) => AuditEntry::update(
                    EntityType::DisplayName,
                    item,
                    &before,
                    &name,
                    Some(message.clone()),
                ),
                None => AuditEntry::create(EntityType::DisplayName, item, &name, Some(message.clone())),
            };
            Ok((entry, message))
        })
    }

    /// Go back to showing an item under its own name
    pub fn clear_display_name(&self, item: &str) -> VaultResult<String> {
        self.modify(|overlay| {
            let before = overlay.display_names.remove(item).ok_or_else(|| VaultError::NotFound {
                entity_type: "Display name",
                identifier: item.to_string(),
            })?;
            let message = format!("Item *{}* is shown under its own name again.", item);
            let entry =
                AuditEntry::delete(EntityType::DisplayName, item, &before, Some(message.clone()));
            Ok((entry, message))
        })
    }

    /// Attach a note to an item
    pub fn set_note(&self, item: &str, note: &str) -> VaultResult<String> {
        validate_item(item)?;
        let note = normalize_text(note)?;

        self.modify(|overlay| {
            let before = overlay.item_notes.insert(item.to_string(), note.clone());
            let message = format!("Item *{}* now has the note ({}).", item, note);
            let entry = match before {
                Some(before) => {
                    AuditEntry::update(EntityType::Note, item, &before, &note, Some(message.clone()))
                }
                None => AuditEntry::create(EntityType::Note, item, &note, Some(message.clone())),
            };
            Ok((entry, message))
        })
    }

    /// Remove an item's note
    pub fn delete_note(&self, item: &str) -> VaultResult<String> {
        self.modify(|overlay| {
            let before = overlay
                .item_notes
                .remove(item)
                .ok_or_else(|| VaultError::note_not_found(item))?;
            let message = format!("Removed the note on *{}*.", item);
            let entry = AuditEntry::delete(EntityType::Note, item, &before, Some(message.clone()));
            Ok((entry, message))
        })
    }

    /// Replace the priority list; an empty list clears it
    pub fn set_priority<T: AsRef<str>>(&self, items: &[T]) -> VaultResult<String> {
        for item in items {
            validate_item(item.as_ref())?;
        }

        self.modify(|overlay| {
            let before = overlay.priority.clone();
            overlay.replace_priority(items.iter().map(|i| i.as_ref().to_string()));

            let message = if overlay.priority.is_empty() {
                "Cleared the item priority.".to_string()
            } else {
                format!("Items now show in the order: {}.", overlay.priority.join(", "))
            };
            let entry = AuditEntry::update(
                EntityType::Priority,
                "priority",
                &before,
                &overlay.priority,
                Some(message.clone()),
            );
            Ok((entry, message))
        })
    }

    /// Keep an item in the ledger file when it reaches zero
    pub fn add_zero_exception(&self, item: &str) -> VaultResult<String> {
        validate_item(item)?;

        self.modify(|overlay| {
            if !overlay.zero_exceptions.insert(item.to_string()) {
                return Err(VaultError::Duplicate {
                    entity_type: "Zero exception",
                    identifier: item.to_string(),
                });
            }
            let message = format!("Item *{}* is kept when it reaches 0.", item);
            let entry = AuditEntry::create(EntityType::ZeroException, item, &item, Some(message.clone()));
            Ok((entry, message))
        })
    }

    /// Let an item be dropped from the ledger file again when it reaches zero
    pub fn remove_zero_exception(&self, item: &str) -> VaultResult<String> {
        self.modify(|overlay| {
            if !overlay.zero_exceptions.remove(item) {
                return Err(VaultError::NotFound {
                    entity_type: "Zero exception",
                    identifier: item.to_string(),
                });
            }
            let message = format!("Item *{}* is removed when it reaches 0.", item);
            let entry = AuditEntry::delete(EntityType::ZeroException, item, &item, Some(message.clone()));
            Ok((entry, message))
        })
    }

    /// Render the current overlay
    pub fn show(&self) -> VaultResult<String> {
        Ok(format_overlay(&self.store.load_overlay()?))
    }
}
