//! Audit trail export
//!
//! Writes one offering's audit history in three formats:
//! - CSV: one row per record, for spreadsheets
//! - JSON: full records with snapshots, schema-versioned
//! - YAML: the JSON structure in a human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_audit_csv;
pub use json::{export_audit_json, AuditExport, ExportedRecord, EXPORT_SCHEMA_VERSION};
pub use yaml::export_audit_yaml;
