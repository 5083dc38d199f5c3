//! Offering repository for JSON storage
//!
//! Manages loading and saving offerings to offerings.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CoursetrailError;
use crate::models::{Offering, OfferingId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable offering data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct OfferingData {
    offerings: Vec<Offering>,
}

/// Repository for offering persistence
pub struct OfferingRepository {
    path: PathBuf,
    data: RwLock<HashMap<OfferingId, Offering>>,
}

impl OfferingRepository {
    /// Create a new offering repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load offerings from disk
    pub fn load(&self) -> Result<(), CoursetrailError> {
        let file_data: OfferingData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for offering in file_data.offerings {
            data.insert(offering.id, offering);
        }

        Ok(())
    }

    /// Save offerings to disk
    pub fn save(&self) -> Result<(), CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut offerings: Vec<_> = data.values().cloned().collect();
        offerings.sort_by_key(|o| o.created_at);

        write_json_atomic(&self.path, &OfferingData { offerings })
    }

    /// Get an offering by ID
    pub fn get(&self, id: OfferingId) -> Result<Option<Offering>, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all offerings, ordered by start date then title
    pub fn get_all(&self) -> Result<Vec<Offering>, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut offerings: Vec<_> = data.values().cloned().collect();
        offerings.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(offerings)
    }

    /// Find an offering by full ID, short ID (`off-1a2b3c4d`), or identifier code
    pub fn find(&self, key: &str) -> Result<Option<Offering>, CoursetrailError> {
        let key = key.trim();

        if let Ok(id) = OfferingId::parse(key) {
            return self.get(id);
        }

        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .values()
            .find(|o| {
                o.id.matches_short(key)
                    || o.identifier
                        .as_deref()
                        .is_some_and(|code| !code.is_empty() && code.eq_ignore_ascii_case(key))
            })
            .cloned())
    }

    /// Insert or update an offering
    pub fn upsert(&self, offering: Offering) -> Result<(), CoursetrailError> {
        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(offering.id, offering);
        Ok(())
    }

    /// Delete an offering
    pub fn delete(&self, id: OfferingId) -> Result<bool, CoursetrailError> {
        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if an offering exists
    pub fn exists(&self, id: OfferingId) -> Result<bool, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.contains_key(&id))
    }

    /// Count offerings
    pub fn count(&self) -> Result<usize, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, OfferingRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = OfferingRepository::new(temp_dir.path().join("offerings.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let mut offering = Offering::new("Makeup Basics", "Makeup");
        offering.tags = vec!["evening".into()];
        let id = offering.id;

        repo.load().unwrap();
        repo.upsert(offering.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = OfferingRepository::new(temp_dir.path().join("offerings.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get(id).unwrap(), Some(offering));
    }

    #[test]
    fn test_find_by_short_id_and_identifier() {
        let (_temp_dir, repo) = create_test_repo();
        let mut offering = Offering::new("Makeup Basics", "Makeup");
        offering.identifier = Some("PME0125ASSA".into());
        let id = offering.id;
        repo.upsert(offering).unwrap();

        assert_eq!(repo.find(&id.to_string()).unwrap().unwrap().id, id);
        assert_eq!(repo.find(&id.as_uuid().to_string()).unwrap().unwrap().id, id);
        assert_eq!(repo.find("pme0125assa").unwrap().unwrap().id, id);
        assert!(repo.find("nothing").unwrap().is_none());
    }

    #[test]
    fn test_get_all_orders_by_start_date() {
        let (_temp_dir, repo) = create_test_repo();
        let mut later = Offering::new("B", "x");
        later.start_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        let mut earlier = Offering::new("A", "x");
        earlier.start_date = NaiveDate::from_ymd_opt(2025, 1, 1);

        repo.upsert(later).unwrap();
        repo.upsert(earlier).unwrap();

        let titles: Vec<_> = repo.get_all().unwrap().into_iter().map(|o| o.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let offering = Offering::new("Makeup Basics", "Makeup");
        let id = offering.id;

        repo.upsert(offering).unwrap();
        assert!(repo.exists(id).unwrap());

        assert!(repo.delete(id).unwrap());
        assert!(!repo.exists(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }
}
