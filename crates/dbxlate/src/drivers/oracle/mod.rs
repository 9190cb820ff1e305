//! Oracle dialect.
//!
//! Oracle's catalog under-reports column types, so [`OracleImporter`]
//! requires a zero-row probe to learn host value classes before inferring.

mod generator;
mod importer;

pub use generator::OracleGenerator;
pub use importer::OracleImporter;
