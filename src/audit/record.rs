//! Audit record data structures
//!
//! Defines the action types and the immutable record appended for every
//! persisted create, update, or delete of an offering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{AuditRecordId, OfferingId, UserId};

use super::diff::changed_fields;

/// Types of mutations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl ActionType {
    /// Parse an action type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "CREATE"),
            ActionType::Update => write!(f, "UPDATE"),
            ActionType::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit record
///
/// Records are built once and never changed afterwards. They reference the
/// offering by ID only and outlive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditRecordId,

    /// Offering the mutation applied to
    pub entity_id: OfferingId,

    /// Offering identifier at record time (empty when unassigned)
    #[serde(default)]
    pub identifier_snapshot: String,

    /// Who performed the mutation
    pub actor_id: UserId,

    pub action: ActionType,

    /// When the mutation was recorded (UTC)
    pub timestamp: DateTime<Utc>,

    /// Entity state before the mutation (updates and deletes)
    #[serde(default)]
    pub previous_snapshot: Option<Value>,

    /// Entity state after the mutation (creates and updates)
    #[serde(default)]
    pub new_snapshot: Option<Value>,

    /// Top-level fields that differ, sorted, without duplicates
    #[serde(default)]
    pub changed_fields: Vec<String>,

    #[serde(default)]
    pub notes: String,
}

impl AuditRecord {
    /// Build a record, computing the changed fields and identifier snapshot
    pub fn new(
        entity_id: OfferingId,
        actor_id: UserId,
        action: ActionType,
        previous_snapshot: Option<Value>,
        new_snapshot: Option<Value>,
        notes: impl Into<String>,
    ) -> Self {
        let changed_fields =
            changed_fields(action, previous_snapshot.as_ref(), new_snapshot.as_ref());

        let source = match action {
            ActionType::Create | ActionType::Update => new_snapshot.as_ref(),
            ActionType::Delete => previous_snapshot.as_ref(),
        };
        let identifier_snapshot = source
            .and_then(|snapshot| snapshot.get("identifier"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            id: AuditRecordId::new(),
            entity_id,
            identifier_snapshot,
            actor_id,
            action,
            timestamp: Utc::now(),
            previous_snapshot,
            new_snapshot,
            changed_fields,
            notes: notes.into(),
        }
    }

    /// Format the record for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.entity_id
        );

        if !self.identifier_snapshot.is_empty() {
            output.push_str(&format!(" ({})", self.identifier_snapshot));
        }

        output.push_str(&format!(" by {}", self.actor_id));

        if !self.changed_fields.is_empty() {
            output.push_str(&format!("\n  Fields: {}", self.changed_fields.join(", ")));
        }

        if !self.notes.is_empty() {
            output.push_str(&format!("\n  Notes: {}", self.notes));
        }

        output
    }
}
