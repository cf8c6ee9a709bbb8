//! Mutation operations
//!
//! The parser turns each command line into one [`Operation`]; the ledger
//! service applies them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an operation changes an item's quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// `+`: increment, creating the item if needed
    Add,
    /// `-`: decrement, never below zero
    Subtract,
    /// `@`: assign outright
    Set,
}

impl OperationKind {
    /// Parse an operator symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '@' => Some(Self::Set),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Set => '@',
        }
    }
}

impl Default for OperationKind {
    fn default() -> Self {
        Self::Add
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single validated change against one vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub target_vault: String,
    pub kind: OperationKind,
    pub item: String,
    /// Always greater than zero
    pub amount: u64,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}{}",
            self.target_vault, self.kind, self.amount, self.item
        )
    }
}
