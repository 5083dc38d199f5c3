//! Append-only audit log
//!
//! Stores audit records in a line-delimited JSON file (JSONL). Each record is
//! written as a single line and flushed immediately; nothing is ever rewritten
//! or removed.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::config::SortOrder;
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::OfferingId;

use super::record::AuditRecord;

/// Handles reading and appending audit records
pub struct AuditLog {
    /// Path to the audit log file
    log_path: PathBuf,
}

impl AuditLog {
    /// Create a new AuditLog backed by the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a record
    ///
    /// Each write is flushed immediately to ensure durability. If an earlier
    /// append was cut short, the record starts on a fresh line so only the
    /// torn line is lost.
    pub fn append(&self, record: &AuditRecord) -> CoursetrailResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CoursetrailError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(record).map_err(|e| {
            CoursetrailError::Json(format!("Failed to serialize audit record: {}", e))
        })?;

        let line = if ends_with_newline(&mut file)? {
            format!("{}\n", json)
        } else {
            format!("\n{}\n", json)
        };

        file.write_all(line.as_bytes())
            .map_err(|e| CoursetrailError::Io(format!("Failed to write audit record: {}", e)))?;

        file.flush()
            .map_err(|e| CoursetrailError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all records in the order they were appended
    ///
    /// Lines that do not parse are skipped with a warning.
    pub fn read_all(&self) -> CoursetrailResult<Vec<AuditRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CoursetrailError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                CoursetrailError::Io(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        line = line_num + 1,
                        error = %e,
                        "skipping unreadable audit record"
                    );
                }
            }
        }

        Ok(records)
    }

    /// All records for one offering, ordered by timestamp
    ///
    /// Records with equal timestamps keep their append order when ascending
    /// and the reverse when descending.
    pub fn find_by_entity(
        &self,
        entity_id: OfferingId,
        order: SortOrder,
    ) -> CoursetrailResult<Vec<AuditRecord>> {
        let mut records: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|r| r.entity_id == entity_id)
            .collect();

        match order {
            SortOrder::Ascending => records.sort_by_key(|r| r.timestamp),
            SortOrder::Descending => {
                records.reverse();
                records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            }
        }

        Ok(records)
    }

    /// Read the most recent N records from the log
    pub fn read_recent(&self, count: usize) -> CoursetrailResult<Vec<AuditRecord>> {
        let all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }

    /// Get the number of readable records in the log
    pub fn entry_count(&self) -> CoursetrailResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// Check if the audit log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

/// Whether `file` is empty or its last byte is a newline
fn ends_with_newline(file: &mut File) -> CoursetrailResult<bool> {
    let len = file
        .metadata()
        .map_err(|e| CoursetrailError::Io(format!("Failed to inspect audit log: {}", e)))?
        .len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))
        .and_then(|_| file.read_exact(&mut last))
        .map_err(|e| CoursetrailError::Io(format!("Failed to read audit log: {}", e)))?;

    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::record::ActionType;
    use crate::models::UserId;
    use chrono::Duration;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_log() -> (AuditLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        (log, temp_dir)
    }

    fn create_record(entity_id: OfferingId, title: &str) -> AuditRecord {
        AuditRecord::new(
            entity_id,
            UserId::new(),
            ActionType::Create,
            None,
            Some(json!({"title": title})),
            "",
        )
    }

    #[test]
    fn test_append_and_read() {
        let (log, _temp) = create_test_log();
        let record = create_record(OfferingId::new(), "Makeup");

        log.append(&record).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records, vec![record]);
    }

    #[test]
    fn test_torn_line_does_not_hide_other_records() {
        let (log, _temp) = create_test_log();
        let target = OfferingId::new();

        let first = create_record(target, "one");
        log.append(&first).unwrap();

        // A write cut short, without its trailing newline
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        file.write_all(br#"{"id":"trunc"#).unwrap();
        drop(file);

        let second = create_record(target, "two");
        log.append(&second).unwrap();

        let records = log.find_by_entity(target, SortOrder::Ascending).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(log.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_garbage_line_is_skipped() {
        let (log, _temp) = create_test_log();
        std::fs::write(log.path(), "not json\n").unwrap();

        let record = create_record(OfferingId::new(), "Makeup");
        log.append(&record).unwrap();

        assert_eq!(log.read_all().unwrap(), vec![record]);
    }

    #[test]
    fn test_empty_log() {
        let (log, _temp) = create_test_log();

        assert!(!log.exists());
        assert_eq!(log.entry_count().unwrap(), 0);
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_entity_filters_and_orders() {
        let (log, _temp) = create_test_log();
        let target = OfferingId::new();
        let other = OfferingId::new();

        let mut first = create_record(target, "one");
        let mut second = create_record(target, "two");
        let mut third = create_record(target, "three");
        let base = first.timestamp;
        first.timestamp = base;
        second.timestamp = base + Duration::seconds(1);
        third.timestamp = base + Duration::seconds(2);

        // Appended out of timestamp order on purpose
        log.append(&second).unwrap();
        log.append(&create_record(other, "noise")).unwrap();
        log.append(&first).unwrap();
        log.append(&third).unwrap();

        let newest_first = log.find_by_entity(target, SortOrder::Descending).unwrap();
        let ids: Vec<_> = newest_first.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let oldest_first = log.find_by_entity(target, SortOrder::Ascending).unwrap();
        let ids: Vec<_> = oldest_first.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn test_equal_timestamps_keep_append_order() {
        let (log, _temp) = create_test_log();
        let target = OfferingId::new();

        let first = create_record(target, "one");
        let mut second = create_record(target, "two");
        second.timestamp = first.timestamp;

        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let asc = log.find_by_entity(target, SortOrder::Ascending).unwrap();
        assert_eq!(asc[0].id, first.id);

        let desc = log.find_by_entity(target, SortOrder::Descending).unwrap();
        assert_eq!(desc[0].id, second.id);
    }

    #[test]
    fn test_read_recent() {
        let (log, _temp) = create_test_log();

        let records: Vec<_> = (0..10)
            .map(|i| create_record(OfferingId::new(), &format!("offering {}", i)))
            .collect();
        for record in &records {
            log.append(record).unwrap();
        }

        let recent = log.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].id, records[7].id);
        assert_eq!(recent[2].id, records[9].id);
        assert_eq!(log.entry_count().unwrap(), 10);
    }

    #[test]
    fn test_survives_restart() {
        let (log, temp) = create_test_log();
        log.append(&create_record(OfferingId::new(), "Makeup"))
            .unwrap();

        let reopened = AuditLog::new(temp.path().join("audit.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let (_log, temp) = create_test_log();
        let dir_path = temp.path().join("audit-dir");
        std::fs::create_dir_all(&dir_path).unwrap();

        let log = AuditLog::new(dir_path);
        let result = log.append(&create_record(OfferingId::new(), "Makeup"));
        assert!(matches!(result, Err(CoursetrailError::Io(_))));
    }
}
