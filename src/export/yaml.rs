//! YAML export of an offering's audit trail

use crate::config::SortOrder;
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::export::json::AuditExport;
use crate::models::OfferingId;
use crate::storage::Storage;
use std::io::Write;

/// Export an offering's audit trail as YAML
pub fn export_audit_yaml<W: Write>(
    storage: &Storage,
    entity_id: OfferingId,
    order: SortOrder,
    writer: &mut W,
) -> CoursetrailResult<()> {
    let export = AuditExport::for_offering(storage, entity_id, order)?;

    writeln!(writer, "# coursetrail audit export")
        .map_err(|e| CoursetrailError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| CoursetrailError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| CoursetrailError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CoursetrailError::Export(e.to_string()))?;

    Ok(())
}
