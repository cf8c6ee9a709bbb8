//! Audit logging system for Taneleer
//!
//! Records every persisted change to vaults, items and the overlay in an
//! append-only audit log.
//!
//! - `AuditEntry`: a single entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: writes entries to the audit log file as line-delimited
//!   JSON (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use taneleer::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::update(EntityType::Item, "thomas/gp", &50u64, &30u64, None);
//! logger.log_batch(&[entry])?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
