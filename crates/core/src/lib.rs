//! Domain logic for student registration spreadsheets.
//!
//! Decodes an uploaded sheet into a [`table::RawTable`], validates every row
//! against the field catalogue in [`schema`], detects duplicates across rows
//! and produces a [`report::ValidationResult`]. No HTTP types live here.

pub mod columns;
pub mod diagnostics;
pub mod directory;
pub mod error;
pub mod fakes;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod schema;
pub mod sheet;
pub mod student;
pub mod table;
