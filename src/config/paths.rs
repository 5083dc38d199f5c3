//! Path management for coursetrail
//!
//! Resolves where configuration, entity data, and the audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `COURSETRAIL_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/coursetrail` on Linux, `%APPDATA%\coursetrail` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CoursetrailError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "COURSETRAIL_DATA_DIR";

/// Manages all paths used by coursetrail
#[derive(Debug, Clone)]
pub struct CoursetrailPaths {
    /// Base directory for all coursetrail data
    base_dir: PathBuf,
}

impl CoursetrailPaths {
    /// Create a new CoursetrailPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined for the
    /// current user and no override is set.
    pub fn new() -> Result<Self, CoursetrailError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CoursetrailPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    ///
    /// Lives outside the data directory: audit records outlive the entities
    /// they describe.
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to offerings.json
    pub fn offerings_file(&self) -> PathBuf {
        self.data_dir().join("offerings.json")
    }

    /// Get the path to programs.json
    pub fn programs_file(&self) -> PathBuf {
        self.data_dir().join("programs.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CoursetrailError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            CoursetrailError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            CoursetrailError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if coursetrail has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, CoursetrailError> {
    ProjectDirs::from("", "", "coursetrail")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CoursetrailError::Config("Could not determine home directory".into()))
}
