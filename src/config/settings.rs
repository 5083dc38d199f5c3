//! User settings for coursetrail
//!
//! Manages lookup timeouts, audit history ordering, and the default log filter.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::CoursetrailPaths;
use crate::error::CoursetrailError;

/// Ordering applied when reading audit history back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Ascending,
    /// Most recent first (default)
    #[default]
    Descending,
}

impl SortOrder {
    /// Parse a sort order from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Some(Self::Ascending),
            "desc" | "descending" | "newest" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// User settings for coursetrail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Upper bound for each directory lookup during identifier assignment
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Default ordering for audit history
    #[serde(default)]
    pub audit_order: SortOrder,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_lookup_timeout_ms() -> u64 {
    3000
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            audit_order: SortOrder::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Lookup timeout as a Duration
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CoursetrailPaths) -> Result<Self, CoursetrailError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CoursetrailError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CoursetrailError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CoursetrailPaths) -> Result<(), CoursetrailError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CoursetrailError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            CoursetrailError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
