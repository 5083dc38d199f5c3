//! Audit recorder
//!
//! Turns a snapshot pair into an `AuditRecord` and appends it to the log.

use serde_json::Value;
use tracing::debug;

use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::{OfferingId, UserId};

use super::log::AuditLog;
use super::record::{ActionType, AuditRecord};

/// Records one audit entry per persisted mutation
pub struct AuditRecorder<'a> {
    log: &'a AuditLog,
}

impl<'a> AuditRecorder<'a> {
    pub fn new(log: &'a AuditLog) -> Self {
        Self { log }
    }

    /// Build and append the record for one mutation
    ///
    /// # Errors
    ///
    /// Returns `CoursetrailError::AuditWrite` when the log cannot be written.
    /// The record is not stored in that case.
    pub fn record(
        &self,
        entity_id: OfferingId,
        actor_id: UserId,
        action: ActionType,
        previous_snapshot: Option<Value>,
        new_snapshot: Option<Value>,
        notes: impl Into<String>,
    ) -> CoursetrailResult<AuditRecord> {
        let record = AuditRecord::new(
            entity_id,
            actor_id,
            action,
            previous_snapshot,
            new_snapshot,
            notes,
        );

        self.log
            .append(&record)
            .map_err(|e| CoursetrailError::AuditWrite {
                entity_id: entity_id.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            offering = %entity_id,
            action = %action,
            fields = record.changed_fields.len(),
            "audit record appended"
        );

        Ok(record)
    }
}
