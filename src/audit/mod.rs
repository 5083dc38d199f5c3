//! Audit trail for course offerings
//!
//! Records every persisted create, update, and delete of an offering as an
//! immutable record holding the snapshot pair and the changed fields.
//!
//! # Architecture
//!
//! - `AuditRecord`: one mutation, with timestamp, actor, action, snapshots,
//!   and the sorted list of changed top-level fields.
//! - `changed_fields` / `structurally_equal`: the field-level diff. Volatile
//!   bookkeeping fields (`updated_at`, `revision`) are never reported.
//! - `AuditLog`: append-only JSONL storage, read back per offering.
//! - `AuditRecorder`: builds a record and appends it in one step.
//!
//! # Example
//!
//! ```rust,ignore
//! use coursetrail::audit::{ActionType, AuditLog, AuditRecorder};
//!
//! let log = AuditLog::new(paths.audit_log());
//! let before = offering.snapshot();
//! offering.title = "Evening Cohort".into();
//! let record = AuditRecorder::new(&log).record(
//!     offering.id,
//!     actor,
//!     ActionType::Update,
//!     Some(before),
//!     Some(offering.snapshot()),
//!     "",
//! )?;
//! assert_eq!(record.changed_fields, vec!["title"]);
//! ```

mod diff;
mod log;
mod record;
mod recorder;

pub use diff::{changed_fields, generate_diff, is_excluded, structurally_equal, EXCLUDED_FIELDS};
pub use log::AuditLog;
pub use record::{ActionType, AuditRecord};
pub use recorder::AuditRecorder;
