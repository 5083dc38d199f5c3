//! User repository for JSON storage
//!
//! Manages users.json; resolves instructors for identifier assignment and
//! actors for audit history.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{CoursetrailError, CoursetrailResult};
use crate::identifier::{UserDirectory, UserInfo};
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), CoursetrailError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), CoursetrailError> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All users sorted by last name, then first name
    pub fn get_all(&self) -> Result<Vec<User>, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(users)
    }

    /// Find a user by ID, short ID, or full display name (case-insensitive)
    pub fn find(&self, key: &str) -> Result<Option<User>, CoursetrailError> {
        let key = key.trim();
        if let Ok(id) = UserId::parse(key) {
            return self.get(id);
        }

        let lowered = key.to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|u| u.id.matches_short(key) || u.display_name().to_lowercase() == lowered))
    }

    pub fn upsert(&self, user: User) -> Result<(), CoursetrailError> {
        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(user.id, user);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn resolve(&self, id: UserId) -> CoursetrailResult<Option<UserInfo>> {
        Ok(self.get(id)?.map(|user| UserInfo {
            first_name: user.first_name,
            last_name: user.last_name,
        }))
    }
}
