//! Configuration module for coursetrail
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CoursetrailPaths;
pub use settings::{Settings, SortOrder};
