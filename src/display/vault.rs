//! Vault display formatting
//!
//! Renders vault contents and the cross-vault tally as chat-style text, with
//! `*bold*` and `_emphasis_` markers.

use crate::error::VaultResult;
use crate::models::{Account, Holding, Ledger, Overlay};

/// Order holdings by the overlay's priority list, then by stored order
pub fn order_holdings<'a>(account: &'a Account, overlay: &Overlay) -> Vec<&'a Holding> {
    let mut holdings: Vec<&Holding> = account.iter().collect();
    // stable: unprioritized items keep their stored order
    holdings.sort_by_key(|h| match overlay.priority_index(&h.item) {
        Some(index) => (0, index),
        None => (1, 0),
    });
    holdings
}

/// Format a single holding, e.g. `50 Gold Pieces` or `_3 sp_ (from the dragon)`
pub fn format_holding(holding: &Holding, overlay: &Overlay) -> String {
    let label = overlay.display_name(&holding.item);
    match overlay.note(&holding.item) {
        Some(note) => format!("_{} {}_ ({})", holding.quantity, label, note),
        None => format!("{} {}", holding.quantity, label),
    }
}

/// Format an account's items as a comma separated list
pub fn format_items(account: &Account, overlay: &Overlay) -> String {
    order_holdings(account, overlay)
        .into_iter()
        .map(|h| format_holding(h, overlay))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format one vault's contents
pub fn format_vault(name: &str, account: &Account, overlay: &Overlay) -> String {
    if account.is_empty() {
        return format!("Vault *{}* contains no items.", name);
    }

    format!(
        "_Vault *{}* contains:_ {}",
        name,
        format_items(account, overlay)
    )
}

/// Format the sum of every vault followed by a per-vault breakdown
pub fn format_tally(ledger: &Ledger, overlay: &Overlay) -> VaultResult<String> {
    let tally = ledger.tally()?;

    let mut output = if tally.is_empty() {
        "Tally of *all vaults* contains no items.".to_string()
    } else {
        format!(
            "_Tally of *all vaults* contains:_ {}",
            format_items(&tally, overlay)
        )
    };

    for vault in ledger.iter() {
        output.push_str("\n\t");
        output.push_str(&format_vault(&vault.name, &vault.account, overlay));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(items: &[(&str, u64)]) -> Account {
        items.iter().copied().collect()
    }

    #[test]
    fn test_priority_then_stored_order() {
        let mut overlay = Overlay::new();
        overlay.replace_priority(["sp", "gp"]);
        let account = account(&[("gp", 1), ("sp", 2), ("cp", 3)]);

        let order: Vec<_> = order_holdings(&account, &overlay)
            .iter()
            .map(|h| h.item.as_str())
            .collect();
        assert_eq!(order, vec!["sp", "gp", "cp"]);
        assert_eq!(format_items(&account, &overlay), "2 sp, 1 gp, 3 cp");
    }

    #[test]
    fn test_unprioritized_items_keep_stored_order() {
        let mut overlay = Overlay::new();
        overlay.replace_priority(["pp"]);
        let account = account(&[("gp", 1), ("cp", 2), ("pp", 3), ("sp", 4)]);

        assert_eq!(
            format_items(&account, &overlay),
            "3 pp, 1 gp, 2 cp, 4 sp"
        );
    }

    #[test]
    fn test_display_names_and_notes() {
        let mut overlay = Overlay::new();
        overlay
            .display_names
            .insert("gp".into(), "Gold Pieces".into());
        overlay
            .item_notes
            .insert("sp".into(), "from the dragon".into());

        let account = account(&[("gp", 50), ("sp", 3)]);
        assert_eq!(
            format_vault("global", &account, &overlay),
            "_Vault *global* contains:_ 50 Gold Pieces, _3 sp_ (from the dragon)"
        );
    }

    #[test]
    fn test_empty_vault() {
        assert_eq!(
            format_vault("thomas", &Account::new(), &Overlay::new()),
            "Vault *thomas* contains no items."
        );
    }

    #[test]
    fn test_tally_with_breakdown() {
        let mut ledger = Ledger::new();
        ledger.reset_vault("global").set("gp", 10);
        ledger.reset_vault("thomas").set("gp", 5);
        ledger.reset_vault("empty");

        assert_eq!(
            format_tally(&ledger, &Overlay::new()).unwrap(),
            "_Tally of *all vaults* contains:_ 15 gp\
             \n\t_Vault *global* contains:_ 10 gp\
             \n\t_Vault *thomas* contains:_ 5 gp\
             \n\tVault *empty* contains no items."
        );
    }

    #[test]
    fn test_empty_tally() {
        let mut ledger = Ledger::new();
        ledger.ensure_global();

        assert_eq!(
            format_tally(&ledger, &Overlay::new()).unwrap(),
            "Tally of *all vaults* contains no items.\n\tVault *global* contains no items."
        );
    }
}
