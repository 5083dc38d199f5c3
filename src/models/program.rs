//! Program model
//!
//! A program is the catalog entry an offering belongs to (e.g. "Professional
//! Makeup Artistry"). Offerings only reference it for identifier lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ProgramId;

/// A catalog program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,

    /// Full program name
    pub name: String,

    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProgramId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Program name cannot be empty".into());
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
