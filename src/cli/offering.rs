//! Offering CLI commands
//!
//! Implements CLI commands for offering management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::offering::{format_offering_details, format_offering_list};
use crate::error::{CoursetrailError, CoursetrailResult};
use crate::models::{Language, Offering, ProgramId, UserId};
use crate::services::{Committed, OfferingService};
use crate::storage::Storage;

use super::report_audit;

/// Offering subcommands
#[derive(Subcommand)]
pub enum OfferingCommands {
    /// Create a new offering (an identifier is assigned when a start date is set)
    Create {
        /// Offering title
        title: String,
        /// Category, used for the identifier when no program resolves
        #[arg(short, long, default_value = "")]
        category: String,
        /// Teaching language (english, spanish)
        #[arg(short, long, default_value = "english")]
        language: String,
        /// Campus name
        #[arg(long)]
        campus: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// Program name or ID
        #[arg(short, long)]
        program: Option<String>,
        /// Instructor name or ID
        #[arg(short, long)]
        instructor: Option<String>,
        /// Seat limit
        #[arg(long)]
        capacity: Option<u32>,
        /// Price (e.g., "1250.00")
        #[arg(long)]
        price: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Keep an existing identifier instead of generating one
        #[arg(long)]
        identifier: Option<String>,
        /// Audit note
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List all offerings
    List,
    /// Show offering details
    Show {
        /// Offering identifier or ID
        offering: String,
    },
    /// Update an offering
    Update {
        /// Offering identifier or ID
        offering: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New language
        #[arg(short, long)]
        language: Option<String>,
        /// New campus (empty to clear)
        #[arg(long)]
        campus: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// New program name or ID
        #[arg(short, long)]
        program: Option<String>,
        /// New instructor name or ID
        #[arg(short, long)]
        instructor: Option<String>,
        /// New seat limit
        #[arg(long)]
        capacity: Option<u32>,
        /// New price
        #[arg(long)]
        price: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// Add a tag (repeatable)
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,
        /// Remove a tag (repeatable)
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
        /// Audit note (defaults to a summary of the changes)
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete an offering (its audit history is kept)
    Delete {
        /// Offering identifier or ID
        offering: String,
        /// Audit note
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Retry identifier assignment for an offering without one
    AssignId {
        /// Offering ID
        offering: String,
    },
}

fn parse_language(s: &str) -> CoursetrailResult<Language> {
    Language::parse(s).ok_or_else(|| {
        CoursetrailError::Validation(format!(
            "Invalid language: '{}'. Valid languages: english, spanish",
            s
        ))
    })
}

fn parse_date(s: &str) -> CoursetrailResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        CoursetrailError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse a price like "1250", "1,250.5" or "$1250.00" into cents
pub fn parse_price(s: &str) -> CoursetrailResult<i64> {
    let invalid = || {
        CoursetrailError::Validation(format!(
            "Invalid price: '{}'. Use format like '1250.00' or '1250'",
            s
        ))
    };

    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty() || fraction.len() > 2 {
        return Err(invalid());
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let dollars: i64 = whole.parse().map_err(|_| invalid())?;
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(cents))
        .ok_or_else(invalid)
}

fn resolve_program(storage: &Storage, key: &str) -> CoursetrailResult<ProgramId> {
    storage
        .programs
        .find(key)?
        .map(|p| p.id)
        .ok_or_else(|| CoursetrailError::program_not_found(key))
}

fn resolve_instructor(storage: &Storage, key: &str) -> CoursetrailResult<UserId> {
    storage
        .users
        .find(key)?
        .map(|u| u.id)
        .ok_or_else(|| CoursetrailError::user_not_found(key))
}

fn find_offering(service: &OfferingService<'_>, key: &str) -> CoursetrailResult<Offering> {
    service
        .find(key)?
        .ok_or_else(|| CoursetrailError::offering_not_found(key))
}

fn print_identifier(committed: &Committed<Offering>) {
    match committed.value.identifier.as_deref() {
        Some(code) if !code.trim().is_empty() => println!("  Identifier: {}", code),
        _ => println!("  Identifier: (pending, set a start date and run 'offering assign-id')"),
    }
}

/// Handle an offering command
pub async fn handle_offering_command(
    storage: &Storage,
    settings: &Settings,
    actor: UserId,
    cmd: OfferingCommands,
) -> CoursetrailResult<()> {
    let service = OfferingService::new(storage).with_lookup_timeout(settings.lookup_timeout());

    match cmd {
        OfferingCommands::Create {
            title,
            category,
            language,
            campus,
            start,
            program,
            instructor,
            capacity,
            price,
            tags,
            description,
            identifier,
            notes,
        } => {
            let mut offering = Offering::new(title.trim(), category.trim());
            offering.language = parse_language(&language)?;
            offering.campus = campus.filter(|c| !c.trim().is_empty());
            offering.start_date = start.as_deref().map(parse_date).transpose()?;
            offering.program_id = program
                .as_deref()
                .map(|p| resolve_program(storage, p))
                .transpose()?;
            offering.instructor_id = instructor
                .as_deref()
                .map(|i| resolve_instructor(storage, i))
                .transpose()?;
            offering.capacity = capacity;
            offering.price_cents = price.as_deref().map(parse_price).transpose()?;
            offering.tags = tags;
            offering.description = description.unwrap_or_default();
            offering.identifier = identifier;

            let committed = service.create(offering, actor, &notes).await?;

            println!("Created offering: {}", committed.value.title);
            print_identifier(&committed);
            println!("  ID: {}", committed.value.id);
            report_audit(&committed.audit);
        }

        OfferingCommands::List => {
            let offerings = service.list()?;
            print!("{}", format_offering_list(&offerings));
        }

        OfferingCommands::Show { offering } => {
            let found = find_offering(&service, &offering)?;

            let program = match found.program_id {
                Some(id) => storage.programs.get(id)?,
                None => None,
            };
            let instructor = match found.instructor_id {
                Some(id) => storage.users.get(id)?,
                None => None,
            };

            print!(
                "{}",
                format_offering_details(&found, program.as_ref(), instructor.as_ref())
            );
        }

        OfferingCommands::Update {
            offering,
            title,
            category,
            language,
            campus,
            start,
            program,
            instructor,
            capacity,
            price,
            description,
            add_tags,
            remove_tags,
            notes,
        } => {
            let found = find_offering(&service, &offering)?;

            let language = language.as_deref().map(parse_language).transpose()?;
            let start = start.as_deref().map(parse_date).transpose()?;
            let program = program
                .as_deref()
                .map(|p| resolve_program(storage, p))
                .transpose()?;
            let instructor = instructor
                .as_deref()
                .map(|i| resolve_instructor(storage, i))
                .transpose()?;
            let price = price.as_deref().map(parse_price).transpose()?;

            let committed = service
                .update(found.id, actor, &notes, |o| {
                    if let Some(title) = title {
                        o.title = title.trim().to_string();
                    }
                    if let Some(category) = category {
                        o.category = category.trim().to_string();
                    }
                    if let Some(language) = language {
                        o.language = language;
                    }
                    if let Some(campus) = campus {
                        o.campus = Some(campus).filter(|c| !c.trim().is_empty());
                    }
                    if start.is_some() {
                        o.start_date = start;
                    }
                    if program.is_some() {
                        o.program_id = program;
                    }
                    if instructor.is_some() {
                        o.instructor_id = instructor;
                    }
                    if capacity.is_some() {
                        o.capacity = capacity;
                    }
                    if price.is_some() {
                        o.price_cents = price;
                    }
                    if let Some(description) = description {
                        o.description = description;
                    }
                    o.tags.retain(|t| !remove_tags.contains(t));
                    for tag in add_tags {
                        if !o.tags.contains(&tag) {
                            o.tags.push(tag);
                        }
                    }
                    Ok(())
                })
                .await?;

            println!("Updated offering: {}", committed.value);
            if let Some(record) = committed.audit_record() {
                if record.changed_fields.is_empty() {
                    println!("  No field changes");
                } else {
                    println!("  Changed: {}", record.changed_fields.join(", "));
                }
            }
            report_audit(&committed.audit);
        }

        OfferingCommands::Delete { offering, notes } => {
            let found = find_offering(&service, &offering)?;
            let committed = service.delete(found.id, actor, &notes).await?;

            println!("Deleted offering: {}", committed.value);
            report_audit(&committed.audit);
        }

        OfferingCommands::AssignId { offering } => {
            let found = find_offering(&service, &offering)?;

            match service.assign_identifier(found.id, actor).await? {
                Some(committed) => {
                    println!("Assigned identifier to: {}", committed.value.title);
                    print_identifier(&committed);
                    report_audit(&committed.audit);
                }
                None if found.has_identifier() => {
                    println!(
                        "Offering already has identifier {}",
                        found.identifier.as_deref().unwrap_or_default()
                    );
                }
                None => {
                    println!("No identifier assigned: the offering has no start date.");
                }
            }
        }
    }

    Ok(())
}
