//! Standard SQL dialect.
//!
//! - [`GenericImporter`]: standard names and generic type codes
//! - [`GenericGenerator`]: standard SQL DDL and literals

mod generator;
mod importer;

pub use generator::GenericGenerator;
pub use importer::GenericImporter;
pub(crate) use importer::infer_from_sql_type;
