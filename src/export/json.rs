//! JSON export of an offering's audit trail

use crate::audit::AuditRecord;
use crate::config::SortOrder;
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::OfferingId;
use crate::services::AuditService;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Audit trail export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Offering the trail belongs to
    pub entity_id: OfferingId,

    /// Latest identifier seen in the trail (empty if never assigned)
    pub identifier: String,

    pub records: Vec<ExportedRecord>,
}

/// One audit record with its actor name resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedRecord {
    pub actor_name: String,

    #[serde(flatten)]
    pub record: AuditRecord,
}

impl AuditExport {
    /// Collect the audit trail of one offering
    pub fn for_offering(
        storage: &Storage,
        entity_id: OfferingId,
        order: SortOrder,
    ) -> CoursetrailResult<Self> {
        let history = AuditService::new(storage).history(entity_id, order)?;

        let identifier = history
            .iter()
            .max_by_key(|view| view.record.timestamp)
            .map(|view| view.record.identifier_snapshot.clone())
            .unwrap_or_default();

        let records = history
            .into_iter()
            .map(|view| ExportedRecord {
                actor_name: view.actor_name,
                record: view.record,
            })
            .collect();

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entity_id,
            identifier,
            records,
        })
    }
}

/// Export an offering's audit trail as pretty-printed JSON
pub fn export_audit_json<W: Write>(
    storage: &Storage,
    entity_id: OfferingId,
    order: SortOrder,
    writer: &mut W,
) -> CoursetrailResult<()> {
    let export = AuditExport::for_offering(storage, entity_id, order)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| CoursetrailError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| CoursetrailError::Export(e.to_string()))?;

    Ok(())
}
