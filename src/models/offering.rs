//! Course offering model
//!
//! An offering is one scheduled run of a program: a class with a start date,
//! a campus, an instructor, and a write-once identifier code.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::ids::{OfferingId, ProgramId, UserId};

/// Language the offering is taught in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Parse a language from string (case-insensitive, accepts ISO codes)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "spanish" | "es" | "español" | "espanol" => Some(Self::Spanish),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::Spanish => write!(f, "Spanish"),
        }
    }
}

/// A course offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    /// Unique identifier
    pub id: OfferingId,

    /// Human-meaningful code (e.g. "PME0125ASSA"), assigned once
    #[serde(default)]
    pub identifier: Option<String>,

    /// Display title
    pub title: String,

    /// Free-text category, used when the program cannot be resolved
    #[serde(default)]
    pub category: String,

    /// Teaching language
    #[serde(default)]
    pub language: Language,

    /// Campus name (free text, e.g. "Santa Ana")
    #[serde(default)]
    pub campus: Option<String>,

    /// First class day
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Program this offering belongs to (lookup only)
    #[serde(default)]
    pub program_id: Option<ProgramId>,

    /// Instructor teaching the offering (lookup only)
    #[serde(default)]
    pub instructor_id: Option<UserId>,

    #[serde(default)]
    pub description: String,

    /// Seat limit
    #[serde(default)]
    pub capacity: Option<u32>,

    /// Tuition in cents
    #[serde(default)]
    pub price_cents: Option<i64>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Any further business fields, stored inline with the document
    #[serde(flatten)]
    pub details: Map<String, Value>,

    /// When the offering was created
    pub created_at: DateTime<Utc>,

    /// When the offering was last modified
    pub updated_at: DateTime<Utc>,

    /// Bumped on every persisted change
    #[serde(default)]
    pub revision: u64,
}

/// Document keys owned by named fields; `details` may not shadow them
pub const RESERVED_KEYS: [&str; 17] = [
    "id",
    "identifier",
    "title",
    "category",
    "language",
    "campus",
    "start_date",
    "program_id",
    "instructor_id",
    "description",
    "capacity",
    "price_cents",
    "tags",
    "details",
    "created_at",
    "updated_at",
    "revision",
];

impl Offering {
    /// Create a new offering with default values
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: OfferingId::new(),
            identifier: None,
            title: title.into(),
            category: category.into(),
            language: Language::default(),
            campus: None,
            start_date: None,
            program_id: None,
            instructor_id: None,
            description: String::new(),
            capacity: None,
            price_cents: None,
            tags: Vec::new(),
            details: Map::new(),
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Whether a non-blank identifier has been assigned
    pub fn has_identifier(&self) -> bool {
        self.identifier
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    }

    /// Independent structural copy of every field
    ///
    /// The returned value shares nothing with `self`, so later in-place edits
    /// to the offering cannot leak into it.
    pub fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Bump the bookkeeping fields after a change
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.revision += 1;
    }

    /// Validate the offering
    pub fn validate(&self) -> Result<(), OfferingValidationError> {
        if self.title.trim().is_empty() {
            return Err(OfferingValidationError::EmptyTitle);
        }

        if self.title.len() > 200 {
            return Err(OfferingValidationError::TitleTooLong(self.title.len()));
        }

        if let Some(price) = self.price_cents {
            if price < 0 {
                return Err(OfferingValidationError::NegativePrice(price));
            }
        }

        if let Some(key) = self
            .details
            .keys()
            .find(|key| RESERVED_KEYS.contains(&key.as_str()))
        {
            return Err(OfferingValidationError::ReservedDetailKey(key.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(code) if !code.trim().is_empty() => write!(f, "{} [{}]", self.title, code),
            _ => write!(f, "{}", self.title),
        }
    }
}

/// Validation errors for offerings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferingValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NegativePrice(i64),
    ReservedDetailKey(String),
}

impl fmt::Display for OfferingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Offering title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Offering title too long ({} chars, max 200)", len)
            }
            Self::NegativePrice(cents) => write!(f, "Price cannot be negative ({})", cents),
            Self::ReservedDetailKey(key) => {
                write!(f, "Detail key '{}' is reserved for a built-in field", key)
            }
        }
    }
}

impl std::error::Error for OfferingValidationError {}
