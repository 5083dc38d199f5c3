//! CSV export of an offering's audit trail
//!
//! One row per record. Snapshots are left out; `changed_fields` is joined
//! with `;` so the file stays spreadsheet-friendly.

use crate::config::SortOrder;
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::OfferingId;
use crate::services::AuditService;
use crate::storage::Storage;
use std::io::Write;

const HEADER: [&str; 8] = [
    "Record ID",
    "Timestamp",
    "Action",
    "Offering ID",
    "Identifier",
    "Actor",
    "Changed Fields",
    "Notes",
];

/// Export an offering's audit trail to CSV
pub fn export_audit_csv<W: Write>(
    storage: &Storage,
    entity_id: OfferingId,
    order: SortOrder,
    writer: W,
) -> CoursetrailResult<()> {
    let history = AuditService::new(storage).history(entity_id, order)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .map_err(|e| CoursetrailError::Export(e.to_string()))?;

    for view in history {
        let record = view.record;
        csv_writer
            .write_record([
                record.id.as_uuid().to_string(),
                record.timestamp.to_rfc3339(),
                record.action.to_string(),
                record.entity_id.as_uuid().to_string(),
                record.identifier_snapshot,
                view.actor_name,
                record.changed_fields.join(";"),
                record.notes,
            ])
            .map_err(|e| CoursetrailError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| CoursetrailError::Export(e.to_string()))?;

    Ok(())
}
