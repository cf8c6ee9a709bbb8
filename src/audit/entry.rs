//! Audit entry data structures
//!
//! Entries record which vault, item or overlay setting changed, how, and
//! the values on either side of the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the audited entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// The part of the vault state a change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Vault,
    Item,
    DisplayName,
    Note,
    Priority,
    ZeroException,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Vault => write!(f, "Vault"),
            EntityType::Item => write!(f, "Item"),
            EntityType::DisplayName => write!(f, "DisplayName"),
            EntityType::Note => write!(f, "Note"),
            EntityType::Priority => write!(f, "Priority"),
            EntityType::ZeroException => write!(f, "ZeroException"),
        }
    }
}

/// A single audit log entry
///
/// Records one change with optional before/after values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Entity key, `vault/item` for items
    pub entity_id: String,

    /// JSON representation of the entity before the operation (for updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the entity after the operation (for creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// The confirmation text the user saw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
        summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            before: None,
            after: serde_json::to_value(entity).ok(),
            summary,
        }
    }

    /// Create a new audit entry for an update operation
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            summary,
        }
    }

    /// Create a new audit entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
        summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id: entity_id.into(),
            before: serde_json::to_value(entity).ok(),
            after: None,
            summary,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        match (&self.before, &self.after) {
            (Some(before), Some(after)) => output.push_str(&format!(" ({} -> {})", before, after)),
            (None, Some(after)) => output.push_str(&format!(" (= {})", after)),
            _ => {}
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  {}", summary));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_entity_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(EntityType::ZeroException).unwrap(),
            json!("zero_exception")
        );
        assert_eq!(EntityType::DisplayName.to_string(), "DisplayName");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(EntityType::Vault, "thomas", &json!([]), None);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Vault);
        assert_eq!(entry.entity_id, "thomas");
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry() {
        let entry = AuditEntry::update(
            EntityType::Item,
            "thomas/gp",
            &50u64,
            &30u64,
            Some("gp 50 -> 30".to_string()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before, Some(json!(50)));
        assert_eq!(entry.after, Some(json!(30)));
        assert_eq!(entry.summary.as_deref(), Some("gp 50 -> 30"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(EntityType::Note, "gp", &"owed to the guild", None);

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(EntityType::Vault, "thomas", &json!([]), None);

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("summary"));
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.entity_type, EntityType::Vault);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Item,
            "global/gp",
            &0u64,
            &50u64,
            Some("Vault item *gp* in vault `global` was modified +50 to a total of 50 gp.".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE"));
        assert!(formatted.contains("Item"));
        assert!(formatted.contains("global/gp (0 -> 50)"));
        assert!(formatted.contains("modified +50"));
    }
}
