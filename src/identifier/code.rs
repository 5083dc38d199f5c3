//! Identifier code segments
//!
//! An offering identifier is five fixed-width segments with no separators:
//!
//! ```text
//! [program:2][language:1][date:4][instructor:2][location:2]
//!     PM          E         0125       AS          SA       -> "PME0125ASSA"
//! ```
//!
//! Every segment builder here is pure. Missing or unusable input degrades to
//! the filler character `X`, never to an error.

use chrono::NaiveDate;

use crate::models::Language;

use super::directory::{ProgramInfo, UserInfo};

/// Total identifier length
pub const IDENTIFIER_LEN: usize = 11;

/// Filler for any position that has nothing to draw from
pub const FILLER: char = 'X';

/// Campus name fragments and their location codes, matched in order
pub const CAMPUS_CODES: [(&str, &str); 4] = [
    ("Santa Ana", "SA"),
    ("South Gate", "SG"),
    ("Online", "ON"),
    ("Hybrid", "HY"),
];

/// Map common accented Latin letters onto their ASCII base letter
fn fold_ascii(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'Á' | 'À' | 'Ä' | 'Â' | 'Ã' => 'A',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' | 'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' => 'O',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ñ' | 'Ñ' => 'N',
        'ç' | 'Ç' => 'C',
        other => other.to_ascii_uppercase(),
    }
}

/// Uppercased ASCII alphanumerics of `chars`, cut or padded to `width`
fn fixed_width(chars: impl Iterator<Item = char>, width: usize) -> String {
    let mut code: String = chars
        .map(fold_ascii)
        .filter(char::is_ascii_alphanumeric)
        .take(width)
        .collect();
    while code.len() < width {
        code.push(FILLER);
    }
    code
}

/// First letter of each word of the program name, two characters wide
pub fn program_code(program: &ProgramInfo) -> String {
    let initials = program.name.split_whitespace().filter_map(|word| {
        word.chars()
            .map(fold_ascii)
            .find(char::is_ascii_alphanumeric)
    });
    fixed_width(initials, 2)
}

/// Fallback program segment: the first two characters of the category
pub fn category_code(category: &str) -> String {
    fixed_width(category.trim().chars(), 2)
}

pub fn language_code(language: Language) -> char {
    match language {
        Language::Spanish => 'S',
        Language::English => 'E',
    }
}

/// Zero-padded month followed by the last two digits of the year (`MMYY`)
pub fn date_code(start_date: NaiveDate) -> String {
    start_date.format("%m%y").to_string()
}

/// First-name initial plus last-name initial; `XX` when unresolved
pub fn instructor_initials(instructor: Option<&UserInfo>) -> String {
    let Some(user) = instructor else {
        return format!("{FILLER}{FILLER}");
    };

    let initial = |name: &str| {
        name.trim()
            .chars()
            .next()
            .map(fold_ascii)
            .filter(char::is_ascii_uppercase)
            .unwrap_or(FILLER)
    };

    format!("{}{}", initial(&user.first_name), initial(&user.last_name))
}

/// Campus table lookup, falling back to the campus' first two characters
pub fn location_code(campus: Option<&str>) -> String {
    let campus = match campus.map(str::trim) {
        Some(campus) if !campus.is_empty() => campus,
        _ => return format!("{FILLER}{FILLER}"),
    };

    let lowered = campus.to_lowercase();
    for (name, code) in CAMPUS_CODES {
        if lowered.contains(&name.to_lowercase()) {
            return code.to_string();
        }
    }

    fixed_width(campus.chars(), 2)
}

/// Check a code against `^[A-Z0-9]{2}[ES]\d{4}[A-Z]{2}[A-Z0-9]{2}$`
pub fn is_well_formed(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != IDENTIFIER_LEN {
        return false;
    }

    let upper_alnum = |b: &u8| b.is_ascii_uppercase() || b.is_ascii_digit();

    bytes[0..2].iter().all(upper_alnum)
        && matches!(bytes[2], b'E' | b'S')
        && bytes[3..7].iter().all(u8::is_ascii_digit)
        && bytes[7..9].iter().all(u8::is_ascii_uppercase)
        && bytes[9..11].iter().all(upper_alnum)
}
