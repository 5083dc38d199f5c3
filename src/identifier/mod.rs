//! Offering identifier assignment
//!
//! Produces the 11-character code (e.g. `PME0125ASSA`) that staff use to refer
//! to an offering. The code is assigned once and never regenerated.
//!
//! - `code`: pure segment builders and the campus table
//! - `directory`: lookup traits the assigner resolves references through
//! - `assigner`: `IdentifierAssigner`, which ties the two together

mod assigner;
pub mod code;
mod directory;

pub use assigner::{IdentifierAssigner, DEFAULT_LOOKUP_TIMEOUT};
pub use code::{is_well_formed, CAMPUS_CODES, IDENTIFIER_LEN};
pub use directory::{ProgramDirectory, ProgramInfo, UserDirectory, UserInfo};
