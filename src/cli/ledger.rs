//! Ledger CLI commands
//!
//! Implements CLI commands for vault contents.

use std::io::Read;

use clap::Subcommand;

use crate::error::VaultResult;
use crate::services::LedgerService;
use crate::storage::VaultStore;

/// Vault subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Modify items, e.g. `thomas -20gp`; reads stdin when no text is given
    ///
    /// Arguments are joined into a single line. Pipe several lines through
    /// stdin to apply them as one batch.
    #[command(alias = "u")]
    Update {
        /// One modification line; a batch of several lines must come from stdin
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Show a vault's contents (`*` sums every vault)
    Show {
        /// Vault name, defaults to global
        vault: Option<String>,
    },
    /// Add an empty vault
    Add {
        /// Alphabetic vault name
        vault: String,
    },
    /// Delete a vault and everything in it
    Delete {
        /// Vault to delete
        vault: String,
        /// The vault name again, to confirm
        confirm: Option<String>,
    },
    /// Set an item in a vault to zero
    Zero {
        /// Vault holding the item
        vault: String,
        /// Item to zero
        item: String,
    },
    /// List vault names
    List,
}

/// Handle a ledger command
pub fn handle_ledger_command<S: VaultStore + ?Sized>(
    store: &S,
    cmd: LedgerCommands,
) -> VaultResult<()> {
    let service = LedgerService::new(store);

    match cmd {
        LedgerCommands::Update { text } => {
            let text = if text.is_empty() {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                input
            } else {
                text.join(" ")
            };
            println!("{}", service.update(&text)?);
        }

        LedgerCommands::Show { vault } => {
            println!("{}", service.show(vault.as_deref())?);
        }

        LedgerCommands::Add { vault } => {
            println!("{}", service.add_vault(&vault)?);
        }

        LedgerCommands::Delete { vault, confirm } => {
            println!("{}", service.delete_vault(&vault, confirm.as_deref())?);
        }

        LedgerCommands::Zero { vault, item } => {
            println!("{}", service.zero_item(&vault, &item)?);
        }

        LedgerCommands::List => {
            for name in service.vault_names()? {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
