//! PostgreSQL dialect.
//!
//! - [`PostgresImporter`]: `pg_type` names, serials and unconstrained
//!   `numeric`; requires a probe for host classes
//! - [`PostgresGenerator`]: lowercase DDL, `E''` escapes, native booleans
//!   and year-to-second intervals

mod generator;
mod importer;

pub use generator::PostgresGenerator;
pub use importer::PostgresImporter;
