//! Overlay CLI commands
//!
//! Implements `vault config` for display names, notes, priority and zero
//! exceptions.

use clap::Subcommand;

use crate::error::VaultResult;
use crate::services::OverlayService;
use crate::storage::VaultStore;

/// Overlay subcommands
#[derive(Subcommand)]
pub enum OverlayCommands {
    /// Show the current display settings
    Show,
    /// Show an item under another name
    Name {
        /// Item name as stored
        item: String,
        /// Text to show instead
        #[arg(required = true, num_args = 1..)]
        display: Vec<String>,
    },
    /// Show an item under its own name again
    Unname {
        item: String,
    },
    /// Attach a note to an item
    Note {
        item: String,
        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove an item's note
    Unnote {
        item: String,
    },
    /// Items to list first, in order; no items clears the list
    Priority {
        items: Vec<String>,
    },
    /// Keep an item in the vault file when it reaches zero
    Keep {
        item: String,
    },
    /// Drop an item from the vault file again when it reaches zero
    Unkeep {
        item: String,
    },
}

/// Handle an overlay command
pub fn handle_overlay_command<S: VaultStore + ?Sized>(
    store: &S,
    cmd: OverlayCommands,
) -> VaultResult<()> {
    let service = OverlayService::new(store);

    let message = match cmd {
        OverlayCommands::Show => service.show()?,
        OverlayCommands::Name { item, display } => {
            service.set_display_name(&item, &display.join(" "))?
        }
        OverlayCommands::Unname { item } => service.clear_display_name(&item)?,
        OverlayCommands::Note { item, text } => service.set_note(&item, &text.join(" "))?,
        OverlayCommands::Unnote { item } => service.delete_note(&item)?,
        OverlayCommands::Priority { items } => service.set_priority(&items)?,
        OverlayCommands::Keep { item } => service.add_zero_exception(&item)?,
        OverlayCommands::Unkeep { item } => service.remove_zero_exception(&item)?,
    };

    println!("{}", message.trim_end());
    Ok(())
}
