//! Directory service
//!
//! Maintains the programs and users that offerings reference. These records
//! are not audited.

use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::{Program, User};
use crate::storage::Storage;

/// Service for program and user management
pub struct DirectoryService<'a> {
    storage: &'a Storage,
}

impl<'a> DirectoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a program; names are unique ignoring case
    pub fn add_program(&self, name: &str) -> CoursetrailResult<Program> {
        let name = name.trim();

        let program = Program::new(name);
        program.validate().map_err(CoursetrailError::Validation)?;

        if self.storage.programs.find(name)?.is_some() {
            return Err(CoursetrailError::Duplicate {
                entity_type: "Program",
                identifier: name.to_string(),
            });
        }

        self.storage.programs.upsert(program.clone())?;
        self.storage.programs.save()?;

        Ok(program)
    }

    pub fn list_programs(&self) -> CoursetrailResult<Vec<Program>> {
        self.storage.programs.get_all()
    }

    /// Add a user; at least one name part is required
    pub fn add_user(&self, first_name: &str, last_name: &str) -> CoursetrailResult<User> {
        let (first_name, last_name) = (first_name.trim(), last_name.trim());
        if first_name.is_empty() && last_name.is_empty() {
            return Err(CoursetrailError::Validation(
                "User needs a first or last name".into(),
            ));
        }

        let user = User::new(first_name, last_name);
        if self.storage.users.find(&user.display_name())?.is_some() {
            return Err(CoursetrailError::Duplicate {
                entity_type: "User",
                identifier: user.display_name(),
            });
        }

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        Ok(user)
    }

    pub fn list_users(&self) -> CoursetrailResult<Vec<User>> {
        self.storage.users.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoursetrailPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CoursetrailPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_program() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DirectoryService::new(&storage);

        let program = service.add_program("  Professional Makeup Artistry ").unwrap();
        assert_eq!(program.name, "Professional Makeup Artistry");
        assert_eq!(service.list_programs().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_program() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DirectoryService::new(&storage);

        service.add_program("Nails").unwrap();
        let result = service.add_program("NAILS");
        assert!(matches!(result, Err(CoursetrailError::Duplicate { .. })));
    }

    #[test]
    fn test_empty_program_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DirectoryService::new(&storage);

        assert!(service.add_program("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_add_user() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DirectoryService::new(&storage);

        let user = service.add_user("Alina", "Santiago").unwrap();
        assert_eq!(user.display_name(), "Alina Santiago");
        assert!(service.add_user("", " ").unwrap_err().is_validation());
        assert!(matches!(
            service.add_user("alina", "santiago"),
            Err(CoursetrailError::Duplicate { .. })
        ));
        assert_eq!(service.list_users().unwrap().len(), 1);
    }
}
