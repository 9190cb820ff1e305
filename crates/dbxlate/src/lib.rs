//! # dbxlate
//!
//! Cross-dialect SQL type and value translation.
//!
//! Every source column is read into one canonical [`TypeSpec`] by a
//! dialect's importer, and every target dialect renders DDL and literals
//! from that canonical form:
//!
//! - **Importers** for generic SQL, DB2, Derby, SQL Server, MySQL, Oracle,
//!   PostgreSQL, SmallSQL and Transbase
//! - **Script generators** for the same engines, plus a same-as-source
//!   passthrough
//! - **Lossy renders are reported**, never silent: clamped precisions,
//!   dropped zones and truncated fractions come back as warnings
//! - **Scripts and diffs**: `CREATE TABLE`/DML assembly, primary-key row
//!   diffs and foreign-key statement ordering
//!
//! ## Example
//!
//! ```rust
//! use dbxlate::{sql_types, DialectCatalog, RawColumn, SqlValue};
//!
//! let catalog = DialectCatalog::with_builtins();
//! let translator = catalog.translator("oracle", "generic")?;
//!
//! let raw = RawColumn::new("VARCHAR2", sql_types::VARCHAR).with_size(20);
//! let column = translator.translate_column(&raw);
//! assert_eq!(column.ddl.text, "VARCHAR(20)");
//!
//! let literal = translator.translate_value(&raw, &SqlValue::from("it's"));
//! assert_eq!(literal.text, "'it''s'");
//! # Ok::<(), dbxlate::XlateError>(())
//! ```

pub mod config;
pub mod core;
pub mod dialect;
pub mod diff;
pub mod drivers;
pub mod error;
pub mod probe;
pub mod script;

// Re-exports for convenient access
pub use crate::core::{
    sql_types, Column, ColumnDef, DateTime, DialectCatalog, ForeignKey, Importer, Interval,
    LazyLob, RawColumn, Rendered, ScriptGenerator, SqlValue, Table, TableDef, TypeKind, TypeSpec,
};
pub use config::{Config, ScriptConfig};
pub use dialect::Translator;
pub use diff::{diff_rows, CommitGraph, TableDiff};
pub use error::{Result, XlateError};
pub use probe::{import_columns, ProbeConnection, ProbeStatement, ProbedColumn};
pub use script::{Script, ScriptBuilder, ScriptOptions};
