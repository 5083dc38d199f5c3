//! Display formatting for terminal output
//!
//! Formats offerings and audit history as plain-text tables and detail views.

pub mod audit;
pub mod offering;

pub use audit::format_audit_history;
pub use offering::{format_offering_details, format_offering_list, format_price};
