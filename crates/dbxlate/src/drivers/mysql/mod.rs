//! MySQL/MariaDB dialect.
//!
//! - [`MysqlImporter`]: MySQL catalog names, `unsigned` widening and
//!   auto-updating `timestamp` columns
//! - [`MysqlGenerator`]: backtick-quoted DDL and backslash-escaped literals

mod generator;
mod importer;

pub use generator::MysqlGenerator;
pub use importer::MysqlImporter;
