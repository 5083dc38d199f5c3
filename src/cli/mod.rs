//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod directory;
pub mod offering;

pub use audit::{handle_audit_command, AuditCommands, ExportFormat};
pub use directory::{handle_program_command, handle_user_command, ProgramCommands, UserCommands};
pub use offering::{handle_offering_command, OfferingCommands};

use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::{system_actor, UserId};
use crate::services::AuditStatus;
use crate::storage::Storage;

/// Resolve the `--actor` option to a user, or the system actor when absent
pub fn resolve_actor(storage: &Storage, actor: Option<&str>) -> CoursetrailResult<UserId> {
    match actor {
        Some(key) => storage
            .users
            .find(key)?
            .map(|u| u.id)
            .ok_or_else(|| CoursetrailError::user_not_found(key)),
        None => Ok(system_actor()),
    }
}

/// Warn on stderr when a committed change could not be audited
pub fn report_audit(status: &AuditStatus) {
    if let AuditStatus::Failed(reason) = status {
        eprintln!("Warning: change saved but not audited: {}", reason);
    }
}
