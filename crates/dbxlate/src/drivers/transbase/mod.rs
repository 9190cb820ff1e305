//! Transbase dialect.
//!
//! Temporal columns are range-typed (`DATETIME[YY:MS]`, `TIMESPAN[DD:SS]`)
//! and literals carry their range as a prefix.

mod generator;
mod importer;

pub use generator::TransbaseGenerator;
pub use importer::TransbaseImporter;
