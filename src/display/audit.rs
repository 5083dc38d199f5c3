//! Audit history formatting

use crate::services::AuditView;

/// Format an offering's audit history, one block per record
pub fn format_audit_history(views: &[AuditView]) -> String {
    if views.is_empty() {
        return "No audit records found.".to_string();
    }

    let mut output = String::new();
    for view in views {
        let record = &view.record;

        output.push_str(&format!(
            "{}  {:<6}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.action.to_string(),
            view.actor_name
        ));
        if !record.identifier_snapshot.is_empty() {
            output.push_str(&format!("  [{}]", record.identifier_snapshot));
        }
        output.push('\n');

        if record.changed_fields.is_empty() {
            output.push_str("    (no field changes)\n");
        } else {
            output.push_str(&format!("    fields: {}\n", record.changed_fields.join(", ")));
        }
        if !record.notes.is_empty() {
            output.push_str(&format!("    notes:  {}\n", record.notes));
        }
    }

    output
}
