//! Apache Derby dialect.
//!
//! - [`DerbyImporter`]: Derby catalog names
//! - [`DerbyGenerator`]: Derby DDL and function-style temporal literals

mod generator;
mod importer;

pub use generator::DerbyGenerator;
pub use importer::DerbyImporter;
