//! Roster import: turn an uploaded spreadsheet into employee identifiers.

pub mod parser;

/// In-memory workbook builders for tests.
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use parser::parse_roster;
