//! Service layer for Taneleer
//!
//! The service layer provides command handling on top of the storage layer:
//! parsing, validation, mutation and rendering, with a fresh load and a full
//! write-back per call.

pub mod ledger;
pub mod mutation;
pub mod overlay;

pub use ledger::LedgerService;
pub use mutation::{apply, apply_batch, Applied};
pub use overlay::OverlayService;
