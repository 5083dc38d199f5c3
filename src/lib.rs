//! coursetrail - course offering identifiers and audit trail
//!
//! This library assigns each course offering a short, human-meaningful
//! identifier (e.g. `PME0125ASSA`) and keeps an append-only audit trail of
//! every create, update and delete, with the fields each change touched.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Offerings and the programs and users they reference
//! - `identifier`: Identifier code generation and assignment
//! - `audit`: Audit records, field-level diffing, and the audit log
//! - `storage`: JSON file storage layer
//! - `services`: Offering lifecycle and audit queries
//! - `display`, `export`, `cli`: Terminal output, exports, and commands
//!
//! # Example
//!
//! ```rust,ignore
//! use coursetrail::config::{CoursetrailPaths, Settings};
//! use coursetrail::services::OfferingService;
//! use coursetrail::storage::Storage;
//!
//! let paths = CoursetrailPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let service = OfferingService::new(&storage).with_lookup_timeout(settings.lookup_timeout());
//! let committed = service.create(draft, actor, "").await?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod identifier;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CoursetrailError, CoursetrailResult};
