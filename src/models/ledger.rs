//! Ledger model
//!
//! A ledger maps vault names to accounts, and an account maps item names to
//! non-negative quantities. Both keep insertion order: the ledger file is
//! written back in the order it was read, and unprioritized items render in
//! the order they were first stored.

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

/// The vault every ledger holds, whether or not the file mentions it
pub const GLOBAL_VAULT: &str = "global";

/// Check that a vault or item name is a non-empty run of letters
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_alphabetic)
}

/// One item quantity inside an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub item: String,
    pub quantity: u64,
}

/// Item quantities owned by one vault
///
/// Kept as a `Vec` so items stay in the order they were first stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account {
    holdings: Vec<Holding>,
}

impl Account {
    /// Create an empty account
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity of an item, if the account holds it
    pub fn get(&self, item: &str) -> Option<u64> {
        self.holdings
            .iter()
            .find(|h| h.item == item)
            .map(|h| h.quantity)
    }

    /// Check if the account holds an item (even at zero)
    pub fn contains(&self, item: &str) -> bool {
        self.holdings.iter().any(|h| h.item == item)
    }

    /// Assign a quantity, appending the item if it is new
    pub fn set(&mut self, item: &str, quantity: u64) {
        match self.holdings.iter_mut().find(|h| h.item == item) {
            Some(holding) => holding.quantity = quantity,
            None => self.holdings.push(Holding {
                item: item.to_string(),
                quantity,
            }),
        }
    }

    /// Iterate holdings in stored order
    pub fn iter(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.iter()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, u64)> for Account {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut account = Account::new();
        for (item, quantity) in iter {
            account.set(item, quantity);
        }
        account
    }
}

/// A named vault and the account it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub name: String,
    pub account: Account,
}

/// Every vault known to the store
///
/// A `Vec` rather than a map: the ledger file is written back in read order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    vaults: Vec<Vault>,
}

impl Ledger {
    /// Create a ledger with no vaults at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the global vault exists, placing it first if it was missing
    pub fn ensure_global(&mut self) {
        if !self.contains(GLOBAL_VAULT) {
            self.vaults.insert(
                0,
                Vault {
                    name: GLOBAL_VAULT.to_string(),
                    account: Account::new(),
                },
            );
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vaults.iter().any(|v| v.name == name)
    }

    /// Get a vault's account by name
    pub fn account(&self, name: &str) -> Option<&Account> {
        self.vaults
            .iter()
            .find(|v| v.name == name)
            .map(|v| &v.account)
    }

    /// Get a vault's account by name, mutably
    pub fn account_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.vaults
            .iter_mut()
            .find(|v| v.name == name)
            .map(|v| &mut v.account)
    }

    /// Add an empty vault; returns false if the name is already taken
    pub fn insert_vault(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.vaults.push(Vault {
            name: name.to_string(),
            account: Account::new(),
        });
        true
    }

    /// Open a vault with empty contents, keeping its position if it existed
    pub fn reset_vault(&mut self, name: &str) -> &mut Account {
        let index = match self.vaults.iter().position(|v| v.name == name) {
            Some(index) => {
                self.vaults[index].account = Account::new();
                index
            }
            None => {
                self.vaults.push(Vault {
                    name: name.to_string(),
                    account: Account::new(),
                });
                self.vaults.len() - 1
            }
        };
        &mut self.vaults[index].account
    }

    /// Remove a vault and everything in it
    pub fn remove_vault(&mut self, name: &str) -> Option<Account> {
        let index = self.vaults.iter().position(|v| v.name == name)?;
        Some(self.vaults.remove(index).account)
    }

    /// Resolve a requested vault, falling back to global for unknown names
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        if self.contains(name) {
            name
        } else {
            GLOBAL_VAULT
        }
    }

    /// Vault names in stored order
    pub fn names(&self) -> Vec<String> {
        self.vaults.iter().map(|v| v.name.clone()).collect()
    }

    /// Iterate vaults in stored order
    pub fn iter(&self) -> impl Iterator<Item = &Vault> {
        self.vaults.iter()
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    /// Sum identical item names across every vault
    ///
    /// Items appear in the order they are first met walking the vaults. A
    /// sum that does not fit in a quantity is an error rather than a wrong
    /// total.
    pub fn tally(&self) -> VaultResult<Account> {
        let mut tally = Account::new();
        for vault in &self.vaults {
            for holding in vault.account.iter() {
                let total = tally
                    .get(&holding.item)
                    .unwrap_or(0)
                    .checked_add(holding.quantity)
                    .ok_or_else(|| {
                        VaultError::Validation(format!(
                            "The tally of {} across all vaults is too large to show.",
                            holding.item
                        ))
                    })?;
                tally.set(&holding.item, total);
            }
        }
        Ok(tally)
    }
}
