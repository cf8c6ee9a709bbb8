//! Display formatting for vault output
//!
//! Turns ledger state and the overlay into the text handed back to whoever
//! issued a command.

pub mod overlay;
pub mod vault;

pub use overlay::format_overlay;
pub use vault::{format_holding, format_items, format_tally, format_vault, order_holdings};

/// Usage summary for the modification commands
pub fn help_text() -> &'static str {
    "*_Taneleer's Vault_*
`vault update [vault] [+/-/@][amount][item]` - modify an item in the given vault. Assumes `global` if no vault is given, or if the vault does not exist. Arguments form one line; several lines piped through stdin apply together or not at all.
`vault add <vault>` - add a vault with the given name
`vault show [vault]` - show contents of the given vault. Assumes `global` if no vault is given. Sums all vaults if `*` is given.
`vault list` - list every vault
`vault zero <vault> <item>` - set an item to zero
`vault delete <vault> <vault>` - delete a vault; repeat its name to confirm
`vault config ...` - display names, notes, priority and items kept at zero"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_mentions_every_operator() {
        let help = help_text();
        assert!(help.contains("+/-/@"));
        assert!(help.contains("`*`"));
        assert!(help.contains("stdin"));
    }
}
