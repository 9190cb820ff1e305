//! Microsoft SQL Server dialect.
//!
//! - [`MssqlImporter`]: SQL Server catalog names, `(max)` lengths and
//!   `identity` columns
//! - [`MssqlGenerator`]: bracket-quoted DDL and T-SQL literals

mod generator;
mod importer;

pub use generator::MssqlGenerator;
pub use importer::MssqlImporter;
