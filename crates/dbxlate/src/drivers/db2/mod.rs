//! IBM DB2 dialect.
//!
//! - [`Db2Importer`]: DB2 catalog names, including GRAPHIC and FOR BIT DATA
//! - [`Db2Generator`]: DB2 DDL and dash-dot timestamp literals

mod generator;
mod importer;

pub use generator::Db2Generator;
pub use importer::Db2Importer;
