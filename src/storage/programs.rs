//! Program repository for JSON storage
//!
//! Manages programs.json and serves as the program directory for identifier
//! assignment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{CoursetrailError, CoursetrailResult};
use crate::identifier::{ProgramDirectory, ProgramInfo};
use crate::models::{Program, ProgramId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProgramData {
    programs: Vec<Program>,
}

/// Repository for program persistence
pub struct ProgramRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProgramId, Program>>,
}

impl ProgramRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load programs from disk
    pub fn load(&self) -> Result<(), CoursetrailError> {
        let file_data: ProgramData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for program in file_data.programs {
            data.insert(program.id, program);
        }

        Ok(())
    }

    /// Save programs to disk
    pub fn save(&self) -> Result<(), CoursetrailError> {
        let programs = self.get_all()?;
        write_json_atomic(&self.path, &ProgramData { programs })
    }

    pub fn get(&self, id: ProgramId) -> Result<Option<Program>, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All programs sorted by name
    pub fn get_all(&self) -> Result<Vec<Program>, CoursetrailError> {
        let data = self.data.read().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut programs: Vec<_> = data.values().cloned().collect();
        programs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(programs)
    }

    /// Find a program by ID, short ID, or name (case-insensitive)
    pub fn find(&self, key: &str) -> Result<Option<Program>, CoursetrailError> {
        let key = key.trim();
        if let Ok(id) = ProgramId::parse(key) {
            return self.get(id);
        }

        let lowered = key.to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|p| p.id.matches_short(key) || p.name.to_lowercase() == lowered))
    }

    pub fn upsert(&self, program: Program) -> Result<(), CoursetrailError> {
        let mut data = self.data.write().map_err(|e| {
            CoursetrailError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(program.id, program);
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
impl ProgramDirectory for ProgramRepository {
    async fn resolve(&self, id: ProgramId) -> CoursetrailResult<Option<ProgramInfo>> {
        Ok(self.get(id)?.map(|program| ProgramInfo { name: program.name }))
    }
}
