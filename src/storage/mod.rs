//! Storage layer for coursetrail
//!
//! Provides JSON file storage with atomic writes for offerings and the
//! directories they reference, plus the append-only audit log.

pub mod file_io;
pub mod offerings;
pub mod programs;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use offerings::OfferingRepository;
pub use programs::ProgramRepository;
pub use users::UserRepository;

use crate::audit::AuditLog;
use crate::config::paths::CoursetrailPaths;
use crate::error::CoursetrailError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CoursetrailPaths,
    pub offerings: OfferingRepository,
    pub programs: ProgramRepository,
    pub users: UserRepository,
    pub audit: AuditLog,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: CoursetrailPaths) -> Result<Self, CoursetrailError> {
        paths.ensure_directories()?;

        Ok(Self {
            offerings: OfferingRepository::new(paths.offerings_file()),
            programs: ProgramRepository::new(paths.programs_file()),
            users: UserRepository::new(paths.users_file()),
            audit: AuditLog::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CoursetrailPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), CoursetrailError> {
        self.offerings.load()?;
        self.programs.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), CoursetrailError> {
        self.offerings.save()?;
        self.programs.save()?;
        self.users.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
