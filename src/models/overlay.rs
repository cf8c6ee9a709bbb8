//! Display overlay
//!
//! Presentation settings layered over the ledger: display names, item notes,
//! priority ordering and the items allowed to persist at zero.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Configuration overlay read before every render and mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    /// Item name to the text shown in its place
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,

    /// Item name to a free-text annotation
    #[serde(default)]
    pub item_notes: BTreeMap<String, String>,

    /// Items rendered first, in this order
    #[serde(default)]
    pub priority: Vec<String>,

    /// Items kept in the ledger file when their quantity reaches zero
    #[serde(default)]
    pub zero_exceptions: BTreeSet<String>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to show for an item, falling back to the item name
    pub fn display_name<'a>(&'a self, item: &'a str) -> &'a str {
        self.display_names
            .get(item)
            .map(String::as_str)
            .unwrap_or(item)
    }

    pub fn note(&self, item: &str) -> Option<&str> {
        self.item_notes.get(item).map(String::as_str)
    }

    /// Position of an item in the priority list
    pub fn priority_index(&self, item: &str) -> Option<usize> {
        self.priority.iter().position(|p| p == item)
    }

    pub fn keeps_zero(&self, item: &str) -> bool {
        self.zero_exceptions.contains(item)
    }

    /// Replace the priority list wholesale, dropping repeated names
    pub fn replace_priority<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        self.priority = items
            .into_iter()
            .map(Into::into)
            .filter(|item| seen.insert(item.clone()))
            .collect();
    }

    /// Check if nothing has been configured
    pub fn is_empty(&self) -> bool {
        self.display_names.is_empty()
            && self.item_notes.is_empty()
            && self.priority.is_empty()
            && self.zero_exceptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut overlay = Overlay::new();
        overlay
            .display_names
            .insert("gp".into(), "Gold Pieces".into());

        assert_eq!(overlay.display_name("gp"), "Gold Pieces");
        assert_eq!(overlay.display_name("sp"), "sp");
    }

    #[test]
    fn test_replace_priority_is_wholesale() {
        let mut overlay = Overlay::new();
        overlay.replace_priority(["gp", "sp"]);
        overlay.replace_priority(["cp", "cp", "pp"]);

        assert_eq!(overlay.priority, vec!["cp", "pp"]);
        assert_eq!(overlay.priority_index("pp"), Some(1));
        assert_eq!(overlay.priority_index("gp"), None);
    }

    #[test]
    fn test_keeps_zero() {
        let mut overlay = Overlay::new();
        assert!(overlay.is_empty());
        overlay.zero_exceptions.insert("rations".into());

        assert!(overlay.keeps_zero("rations"));
        assert!(!overlay.keeps_zero("gp"));
        assert!(!overlay.is_empty());
    }
}
