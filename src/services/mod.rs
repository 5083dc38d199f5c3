//! Service layer for coursetrail
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, identifier assignment, and one audit record per persisted
//! offering mutation.

pub mod audit;
pub mod directory;
pub mod offering;

pub use audit::{AuditService, AuditView, SYSTEM_ACTOR_NAME};
pub use directory::DirectoryService;
pub use offering::{AuditStatus, Committed, OfferingService};
