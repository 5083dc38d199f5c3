//! Offering service
//!
//! Owns the lifecycle of an offering: identifier assignment on create, then
//! persistence, then exactly one audit record per successful write.
//!
//! A failed write leaves no audit record behind and restores the in-memory
//! state. A failed audit write does not undo a committed change; it is logged
//! and reported back through `AuditStatus::Failed`.

use std::time::Duration;

use tracing::{error, info};

use crate::audit::{generate_diff, ActionType, AuditRecord, AuditRecorder};
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::identifier::{IdentifierAssigner, DEFAULT_LOOKUP_TIMEOUT};
use crate::models::{Offering, OfferingId, UserId};
use crate::storage::Storage;

/// Outcome of the audit step that follows a committed write
#[derive(Debug, Clone, PartialEq)]
pub enum AuditStatus {
    /// The record was appended to the audit log
    Recorded(AuditRecord),
    /// The change is committed but unaudited; needs manual reconciliation
    Failed(String),
}

/// A committed change together with the outcome of its audit step
#[derive(Debug, Clone)]
pub struct Committed<T> {
    pub value: T,
    pub audit: AuditStatus,
}

impl<T> Committed<T> {
    /// The audit record, if it was stored
    pub fn audit_record(&self) -> Option<&AuditRecord> {
        match &self.audit {
            AuditStatus::Recorded(record) => Some(record),
            AuditStatus::Failed(_) => None,
        }
    }

    pub fn audit_failed(&self) -> bool {
        matches!(self.audit, AuditStatus::Failed(_))
    }
}

/// Service for offering management
pub struct OfferingService<'a> {
    storage: &'a Storage,
    lookup_timeout: Duration,
}

impl<'a> OfferingService<'a> {
    /// Create a new offering service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Override the directory lookup timeout used for identifier assignment
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    fn assigner(&self) -> IdentifierAssigner<'_> {
        IdentifierAssigner::new(&self.storage.programs, &self.storage.users)
            .with_timeout(self.lookup_timeout)
    }

    /// Create a new offering
    ///
    /// Assigns an identifier first when the offering has none, then persists
    /// and records a `create` audit entry.
    pub async fn create(
        &self,
        mut offering: Offering,
        actor: UserId,
        notes: &str,
    ) -> CoursetrailResult<Committed<Offering>> {
        offering
            .validate()
            .map_err(|e| CoursetrailError::Validation(e.to_string()))?;

        if self.storage.offerings.exists(offering.id)? {
            return Err(CoursetrailError::Duplicate {
                entity_type: "Offering",
                identifier: offering.id.to_string(),
            });
        }

        self.assigner().assign(&mut offering).await;

        self.persist(&offering, None)?;

        info!(offering = %offering.id, identifier = ?offering.identifier, "offering created");

        let audit = self.audit(
            offering.id,
            actor,
            ActionType::Create,
            None,
            Some(offering.snapshot()),
            notes.to_string(),
        );

        Ok(Committed {
            value: offering,
            audit,
        })
    }

    /// Get an offering by ID
    pub fn get(&self, id: OfferingId) -> CoursetrailResult<Option<Offering>> {
        self.storage.offerings.get(id)
    }

    /// Find an offering by ID, short ID, or identifier code
    pub fn find(&self, key: &str) -> CoursetrailResult<Option<Offering>> {
        self.storage.offerings.find(key)
    }

    /// Get all offerings
    pub fn list(&self) -> CoursetrailResult<Vec<Offering>> {
        self.storage.offerings.get_all()
    }

    /// Apply `mutate` to an offering, persist it, and record an `update`
    ///
    /// The pre-change snapshot is taken before `mutate` runs. A non-blank
    /// identifier cannot be changed or cleared. When `notes` is empty the
    /// record carries a generated summary of the changes.
    pub async fn update<F>(
        &self,
        id: OfferingId,
        actor: UserId,
        notes: &str,
        mutate: F,
    ) -> CoursetrailResult<Committed<Offering>>
    where
        F: FnOnce(&mut Offering) -> CoursetrailResult<()>,
    {
        let previous = self
            .storage
            .offerings
            .get(id)?
            .ok_or_else(|| CoursetrailError::offering_not_found(id.to_string()))?;
        let previous_snapshot = previous.snapshot();

        let mut offering = previous.clone();
        mutate(&mut offering)?;

        if offering.id != previous.id {
            return Err(CoursetrailError::Validation(
                "Offering ID cannot be changed".into(),
            ));
        }

        if previous.has_identifier() && offering.identifier != previous.identifier {
            return Err(CoursetrailError::Validation(format!(
                "Identifier {} is permanent and cannot be changed",
                previous.identifier.as_deref().unwrap_or_default()
            )));
        }

        offering
            .validate()
            .map_err(|e| CoursetrailError::Validation(e.to_string()))?;

        offering.touch();
        self.persist(&offering, Some(&previous))?;

        let new_snapshot = offering.snapshot();
        let notes = if notes.trim().is_empty() {
            generate_diff(&previous_snapshot, &new_snapshot).unwrap_or_default()
        } else {
            notes.to_string()
        };

        let audit = self.audit(
            id,
            actor,
            ActionType::Update,
            Some(previous_snapshot),
            Some(new_snapshot),
            notes,
        );

        Ok(Committed {
            value: offering,
            audit,
        })
    }

    /// Delete an offering and record a `delete`
    ///
    /// The audit history of the offering is kept.
    pub async fn delete(
        &self,
        id: OfferingId,
        actor: UserId,
        notes: &str,
    ) -> CoursetrailResult<Committed<Offering>> {
        let previous = self
            .storage
            .offerings
            .get(id)?
            .ok_or_else(|| CoursetrailError::offering_not_found(id.to_string()))?;
        let previous_snapshot = previous.snapshot();

        self.storage.offerings.delete(id)?;
        if let Err(e) = self.storage.offerings.save() {
            self.storage.offerings.upsert(previous)?;
            return Err(e);
        }

        info!(offering = %id, "offering deleted");

        let audit = self.audit(
            id,
            actor,
            ActionType::Delete,
            Some(previous_snapshot),
            None,
            notes.to_string(),
        );

        Ok(Committed {
            value: previous,
            audit,
        })
    }

    /// Retry identifier assignment for an offering that has none
    ///
    /// Returns `None` when nothing was assigned: the offering already has an
    /// identifier, or still lacks a start date. An assignment is persisted and
    /// audited as an `update`.
    pub async fn assign_identifier(
        &self,
        id: OfferingId,
        actor: UserId,
    ) -> CoursetrailResult<Option<Committed<Offering>>> {
        let previous = self
            .storage
            .offerings
            .get(id)?
            .ok_or_else(|| CoursetrailError::offering_not_found(id.to_string()))?;
        let previous_snapshot = previous.snapshot();

        let mut offering = previous.clone();
        let Some(code) = self.assigner().assign(&mut offering).await else {
            return Ok(None);
        };

        offering.touch();
        self.persist(&offering, Some(&previous))?;

        let audit = self.audit(
            id,
            actor,
            ActionType::Update,
            Some(previous_snapshot),
            Some(offering.snapshot()),
            format!("identifier assigned: {}", code),
        );

        Ok(Some(Committed {
            value: offering,
            audit,
        }))
    }

    /// Write `offering`, restoring `previous` in memory if the save fails
    fn persist(&self, offering: &Offering, previous: Option<&Offering>) -> CoursetrailResult<()> {
        self.storage.offerings.upsert(offering.clone())?;

        if let Err(e) = self.storage.offerings.save() {
            match previous {
                Some(previous) => self.storage.offerings.upsert(previous.clone())?,
                None => {
                    self.storage.offerings.delete(offering.id)?;
                }
            }
            return Err(e);
        }

        Ok(())
    }

    fn audit(
        &self,
        id: OfferingId,
        actor: UserId,
        action: ActionType,
        previous: Option<serde_json::Value>,
        new: Option<serde_json::Value>,
        notes: String,
    ) -> AuditStatus {
        let recorder = AuditRecorder::new(&self.storage.audit);
        match recorder.record(id, actor, action, previous, new, notes) {
            Ok(record) => AuditStatus::Recorded(record),
            Err(e) => {
                error!(
                    offering = %id,
                    action = %action,
                    error = %e,
                    "change committed without audit record"
                );
                AuditStatus::Failed(e.to_string())
            }
        }
    }
}
