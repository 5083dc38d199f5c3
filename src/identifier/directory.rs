//! Read-only lookup collaborators for identifier assignment
//!
//! The assigner never reaches into storage on its own; whoever calls it hands
//! in a program directory and a user directory.

use async_trait::async_trait;

use crate::error::CoursetrailResult;
use crate::models::{ProgramId, UserId};

/// Display fields of a resolved program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
}

/// Display fields of a resolved user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub first_name: String,
    pub last_name: String,
}

/// Resolves a program reference to its display fields
///
/// `Ok(None)` means the reference is dangling; `Err` means the directory
/// itself could not answer.
#[async_trait]
pub trait ProgramDirectory: Send + Sync {
    async fn resolve(&self, id: ProgramId) -> CoursetrailResult<Option<ProgramInfo>>;
}

/// Resolves a user reference to its display fields
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn resolve(&self, id: UserId) -> CoursetrailResult<Option<UserInfo>>;
}
