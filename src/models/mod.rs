//! Core data models for Taneleer
//!
//! This module contains the data structures of the vault domain: the ledger
//! of vaults and their item quantities, the display overlay, and the
//! operations parsed from user commands.

pub mod ledger;
pub mod operation;
pub mod overlay;

pub use ledger::{is_valid_name, Account, Holding, Ledger, Vault, GLOBAL_VAULT};
pub use operation::{Operation, OperationKind};
pub use overlay::Overlay;
