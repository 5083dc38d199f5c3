//! Audit CLI commands
//!
//! Reads and exports the audit trail of an offering, including offerings that
//! have since been deleted.

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::{Settings, SortOrder};
use crate::display::format_audit_history;
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::export::{export_audit_csv, export_audit_json, export_audit_yaml};
use crate::services::AuditService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per record, no snapshots)
    Csv,
    /// JSON format (full records)
    Json,
    /// YAML format (full records, human-readable)
    Yaml,
}

/// Audit subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// Show audit history (one offering, or the latest records overall)
    List {
        /// Offering identifier or ID (deleted offerings included)
        offering: Option<String>,
        /// Sort order (asc, desc); defaults to the configured order
        #[arg(short, long)]
        order: Option<String>,
        /// Number of recent records when no offering is given
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Export an offering's audit history to a file
    Export {
        /// Offering identifier or ID
        offering: String,
        /// Output file path
        output: PathBuf,
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Sort order (asc, desc)
        #[arg(long)]
        order: Option<String>,
    },
}

fn resolve_order(order: Option<&str>, settings: &Settings) -> CoursetrailResult<SortOrder> {
    match order {
        Some(s) => SortOrder::parse(s).ok_or_else(|| {
            CoursetrailError::Validation(format!("Invalid order: '{}'. Use asc or desc", s))
        }),
        None => Ok(settings.audit_order),
    }
}

/// Handle an audit command
pub fn handle_audit_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AuditCommands,
) -> CoursetrailResult<()> {
    let service = AuditService::new(storage);

    match cmd {
        AuditCommands::List {
            offering,
            order,
            limit,
        } => {
            let views = match offering {
                Some(key) => {
                    let order = resolve_order(order.as_deref(), settings)?;
                    let entity_id = service.resolve_entity_id(&key)?;
                    service.history(entity_id, order)?
                }
                None => service.recent(limit)?,
            };
            print!("{}", format_audit_history(&views));
        }

        AuditCommands::Export {
            offering,
            output,
            format,
            order,
        } => {
            let order = resolve_order(order.as_deref(), settings)?;
            let entity_id = service.resolve_entity_id(&offering)?;

            let file = File::create(&output).map_err(|e| {
                CoursetrailError::Export(format!("Failed to create {}: {}", output.display(), e))
            })?;
            let mut writer = BufWriter::new(file);

            match format {
                ExportFormat::Csv => export_audit_csv(storage, entity_id, order, &mut writer)?,
                ExportFormat::Json => export_audit_json(storage, entity_id, order, &mut writer)?,
                ExportFormat::Yaml => export_audit_yaml(storage, entity_id, order, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| CoursetrailError::Export(e.to_string()))?;

            println!("Exported audit history to: {}", output.display());
        }
    }

    Ok(())
}
