//! Typed entity IDs
//!
//! Every entity is keyed by a UUID wrapped in its own type. On screen an ID
//! shows as a kind prefix plus the first eight hex digits (`off-1a2b3c4d`);
//! that short form is what users type back on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Hex digits of the UUID kept in the short form
const SHORT_LEN: usize = 8;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Prefix of the short display form
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The all-zero ID, reserved for built-in actors and fixtures
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse a full UUID, with or without the kind prefix
            ///
            /// The short display form is not enough to rebuild an ID; use
            /// `matches_short` to compare against it.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Short display form, e.g. `off-1a2b3c4d`
            pub fn short(&self) -> String {
                let mut buf = Uuid::encode_buffer();
                let hex = self.0.simple().encode_lower(&mut buf);
                format!("{}{}", Self::PREFIX, &hex[..SHORT_LEN])
            }

            /// Whether `s` is this ID's short form, ignoring case and padding
            pub fn matches_short(&self, s: &str) -> bool {
                self.short().eq_ignore_ascii_case(s.trim())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.short())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let bare = s.strip_prefix(Self::PREFIX).unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }
    };
}

entity_id!(
    /// A course offering
    OfferingId => "off-"
);
entity_id!(
    /// A catalog program
    ProgramId => "prg-"
);
entity_id!(
    /// An instructor or acting user
    UserId => "usr-"
);
entity_id!(
    /// One audit record
    AuditRecordId => "aud-"
);
