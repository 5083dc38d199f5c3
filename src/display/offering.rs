//! Offering display formatting
//!
//! Formats offerings for terminal output in table and detail views.

use crate::models::{Offering, Program, User};

const UNASSIGNED: &str = "(pending)";

fn identifier_cell(offering: &Offering) -> &str {
    match offering.identifier.as_deref() {
        Some(code) if !code.trim().is_empty() => code,
        _ => UNASSIGNED,
    }
}

/// Format cents as dollars, e.g. `$1,250.00`
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Format a list of offerings as a table
pub fn format_offering_list(offerings: &[Offering]) -> String {
    if offerings.is_empty() {
        return "No offerings found.".to_string();
    }

    let title_width = offerings
        .iter()
        .map(|o| o.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<11}  {:<12}  {:<title_width$}  {:<10}  {:<8}  {}\n",
        "Identifier",
        "ID",
        "Title",
        "Start",
        "Language",
        "Campus",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:-<11}  {:-<12}  {:-<title_width$}  {:-<10}  {:-<8}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for offering in offerings {
        let start = offering
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());

        output.push_str(&format!(
            "{:<11}  {:<12}  {:<title_width$}  {:<10}  {:<8}  {}\n",
            identifier_cell(offering),
            offering.id.to_string(),
            offering.title,
            start,
            offering.language.to_string(),
            offering.campus.as_deref().unwrap_or("-"),
            title_width = title_width,
        ));
    }

    output.push_str(&format!("\n{} offering(s)\n", offerings.len()));
    output
}

/// Format a single offering's details
pub fn format_offering_details(
    offering: &Offering,
    program: Option<&Program>,
    instructor: Option<&User>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Offering: {}\n", offering.title));
    output.push_str(&format!("  Identifier:     {}\n", identifier_cell(offering)));
    output.push_str(&format!("  ID:             {}\n", offering.id));
    output.push_str(&format!("  Category:       {}\n", offering.category));

    let program = match (program, offering.program_id) {
        (Some(p), _) => p.name.clone(),
        (None, Some(id)) => format!("{} (unknown)", id),
        (None, None) => "-".into(),
    };
    output.push_str(&format!("  Program:        {}\n", program));

    let instructor = match (instructor, offering.instructor_id) {
        (Some(u), _) => u.display_name(),
        (None, Some(id)) => format!("{} (unknown)", id),
        (None, None) => "-".into(),
    };
    output.push_str(&format!("  Instructor:     {}\n", instructor));

    output.push_str(&format!("  Language:       {}\n", offering.language));
    output.push_str(&format!(
        "  Campus:         {}\n",
        offering.campus.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "  Start:          {}\n",
        offering
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into())
    ));

    if let Some(capacity) = offering.capacity {
        output.push_str(&format!("  Capacity:       {}\n", capacity));
    }
    if let Some(price) = offering.price_cents {
        output.push_str(&format!("  Price:          {}\n", format_price(price)));
    }
    if !offering.tags.is_empty() {
        output.push_str(&format!("  Tags:           {}\n", offering.tags.join(", ")));
    }
    if !offering.description.is_empty() {
        output.push_str(&format!("  Description:    {}\n", offering.description));
    }
    for (key, value) in &offering.details {
        output.push_str(&format!("  {:<15} {}\n", format!("{}:", key), value));
    }

    output.push_str(&format!(
        "  Updated:        {} (rev {})\n",
        offering.updated_at.format("%Y-%m-%d %H:%M"),
        offering.revision
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "$0.00");
        assert_eq!(format_price(125000), "$1,250.00");
        assert_eq!(format_price(123456789), "$1,234,567.89");
        assert_eq!(format_price(-5), "-$0.05");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_offering_list(&[]), "No offerings found.");
    }

    #[test]
    fn test_list_shows_pending_identifier() {
        let mut assigned = Offering::new("Makeup Artistry", "Makeup");
        assigned.identifier = Some("PME0125ASSA".into());
        assigned.start_date = NaiveDate::from_ymd_opt(2025, 1, 11);
        let pending = Offering::new("Nails", "Nails");

        let output = format_offering_list(&[assigned, pending]);
        assert!(output.contains("PME0125ASSA"));
        assert!(output.contains("2025-01-11"));
        assert!(output.contains(UNASSIGNED));
        assert!(output.contains("2 offering(s)"));
    }

    #[test]
    fn test_details_with_references() {
        let program = Program::new("Professional Makeup Artistry");
        let instructor = User::new("Alina", "Santiago");
        let mut offering = Offering::new("Makeup Artistry", "Makeup");
        offering.program_id = Some(program.id);
        offering.instructor_id = Some(instructor.id);
        offering.price_cents = Some(99900);

        let output = format_offering_details(&offering, Some(&program), Some(&instructor));
        assert!(output.contains("Professional Makeup Artistry"));
        assert!(output.contains("Alina Santiago"));
        assert!(output.contains("$999.00"));

        let output = format_offering_details(&offering, None, None);
        assert!(output.contains("(unknown)"));
    }
}
