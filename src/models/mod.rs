//! Core data models for coursetrail
//!
//! This module contains the data structures for course offerings and the
//! read-only entities they reference: programs and users.

pub mod ids;
pub mod offering;
pub mod program;
pub mod user;

pub use ids::{AuditRecordId, OfferingId, ProgramId, UserId};
pub use offering::{Language, Offering, OfferingValidationError, RESERVED_KEYS};
pub use program::Program;
pub use user::{system_actor, User};
