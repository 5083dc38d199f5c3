//! Audit history queries
//!
//! Reads the audit log for one offering, resolving actors to display names.
//! History stays readable after the offering itself has been deleted.

use crate::audit::AuditRecord;
use crate::config::SortOrder;
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::{system_actor, OfferingId, UserId};
use crate::storage::Storage;

/// Actor name shown for changes made without a named user
pub const SYSTEM_ACTOR_NAME: &str = "system";

/// An audit record with its actor resolved for display
#[derive(Debug, Clone, PartialEq)]
pub struct AuditView {
    pub record: AuditRecord,
    pub actor_name: String,
}

/// Service for reading the audit trail
pub struct AuditService<'a> {
    storage: &'a Storage,
}

impl<'a> AuditService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All records for one offering, ordered by timestamp
    pub fn history(
        &self,
        entity_id: OfferingId,
        order: SortOrder,
    ) -> CoursetrailResult<Vec<AuditView>> {
        self.storage
            .audit
            .find_by_entity(entity_id, order)?
            .into_iter()
            .map(|record| self.view(record))
            .collect()
    }

    /// The most recent `count` records across all offerings, newest first
    pub fn recent(&self, count: usize) -> CoursetrailResult<Vec<AuditView>> {
        let mut records = self.storage.audit.read_recent(count)?;
        records.reverse();
        records.into_iter().map(|record| self.view(record)).collect()
    }

    /// Resolve a user-supplied key to an offering ID
    ///
    /// Live offerings match by ID, short ID, or identifier code. Deleted
    /// offerings match through the identifiers and IDs kept in the log.
    pub fn resolve_entity_id(&self, key: &str) -> CoursetrailResult<OfferingId> {
        let key = key.trim();
        if let Some(offering) = self.storage.offerings.find(key)? {
            return Ok(offering.id);
        }
        if let Ok(id) = OfferingId::parse(key) {
            return Ok(id);
        }

        self.storage
            .audit
            .read_all()?
            .into_iter()
            .rev()
            .find(|record| {
                record.entity_id.matches_short(key)
                    || (!record.identifier_snapshot.is_empty()
                        && record.identifier_snapshot.eq_ignore_ascii_case(key))
            })
            .map(|record| record.entity_id)
            .ok_or_else(|| CoursetrailError::offering_not_found(key))
    }

    /// Display name for an actor
    pub fn actor_name(&self, actor_id: UserId) -> CoursetrailResult<String> {
        if actor_id == system_actor() {
            return Ok(SYSTEM_ACTOR_NAME.to_string());
        }

        Ok(match self.storage.users.get(actor_id)? {
            Some(user) => user.display_name(),
            None => actor_id.to_string(),
        })
    }

    fn view(&self, record: AuditRecord) -> CoursetrailResult<AuditView> {
        let actor_name = self.actor_name(record.actor_id)?;
        Ok(AuditView { record, actor_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ActionType;
    use crate::config::CoursetrailPaths;
    use crate::models::{Offering, User};
    use crate::services::OfferingService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CoursetrailPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn dated_offering() -> Offering {
        let mut offering = Offering::new("Nails, Spring", "Intro to Nails");
        offering.start_date = NaiveDate::from_ymd_opt(2025, 3, 3);
        offering.campus = Some("South Gate".into());
        offering
    }

    #[tokio::test]
    async fn test_history_orders_and_names_actors() {
        let (_temp_dir, storage) = create_test_storage();
        let user = User::new("Alina", "Santiago");
        let user_id = user.id;
        storage.users.upsert(user).unwrap();

        let offerings = OfferingService::new(&storage);
        let created = offerings
            .create(dated_offering(), system_actor(), "")
            .await
            .unwrap();
        let id = created.value.id;
        offerings
            .update(id, user_id, "", |o| {
                o.capacity = Some(12);
                Ok(())
            })
            .await
            .unwrap();

        let service = AuditService::new(&storage);

        let newest_first = service.history(id, SortOrder::Descending).unwrap();
        assert_eq!(newest_first.len(), 2);
        assert_eq!(newest_first[0].record.action, ActionType::Update);
        assert_eq!(newest_first[0].actor_name, "Alina Santiago");
        assert_eq!(newest_first[1].actor_name, SYSTEM_ACTOR_NAME);

        let oldest_first = service.history(id, SortOrder::Ascending).unwrap();
        assert_eq!(oldest_first[0].record.action, ActionType::Create);
    }

    #[tokio::test]
    async fn test_history_of_unknown_offering_is_empty() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AuditService::new(&storage);

        assert!(service
            .history(OfferingId::new(), SortOrder::Descending)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_resolve_deleted_offering_by_identifier() {
        let (_temp_dir, storage) = create_test_storage();
        let offerings = OfferingService::new(&storage);
        let created = offerings
            .create(dated_offering(), system_actor(), "")
            .await
            .unwrap();
        let id = created.value.id;
        let code = created.value.identifier.clone().unwrap();
        offerings.delete(id, system_actor(), "").await.unwrap();

        let service = AuditService::new(&storage);
        assert_eq!(service.resolve_entity_id(&code).unwrap(), id);
        assert_eq!(
            service.resolve_entity_id(&code.to_lowercase()).unwrap(),
            id
        );
        assert_eq!(service.resolve_entity_id(&id.to_string()).unwrap(), id);
        assert!(service.resolve_entity_id("NOPE").unwrap_err().is_not_found());
    }

    #[test]
    fn test_unknown_actor_falls_back_to_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AuditService::new(&storage);
        let actor = UserId::new();

        assert_eq!(service.actor_name(actor).unwrap(), actor.to_string());
    }
}
