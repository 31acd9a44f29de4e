//! The validation and format-conversion core.
//!
//! A batch of personnel records exists in three shapes: an XML tree
//! ([`xml`]), a spreadsheet ([`sheet`]) and the stored form in SQLite
//! (`crate::storage`). All three convert through the canonical
//! `common::model::soldier` types. [`validate`] is the pure schema
//! validator and [`pipeline`] drives one uploaded file through
//! parse → validate → persist-or-report.

pub mod pipeline;
pub mod sheet;
pub mod validate;
pub mod xml;
