//! Dialect-independent rendering machinery.
//!
//! - [`Translator`]: importer → [`TypeSpec`](crate::core::TypeSpec) → generator
//! - [`ddl`]: type-clause helpers (decimal clamping, integer ladders, ...)
//! - [`literal`]: the literal dispatch behind
//!   [`ScriptGenerator::render_literal`](crate::core::ScriptGenerator::render_literal)
//!
//! # Usage
//!
//! ```rust
//! use dbxlate::core::{sql_types, DialectCatalog, RawColumn};
//!
//! let catalog = DialectCatalog::with_builtins();
//! let translator = catalog.translator("db2", "generic").unwrap();
//! let column = translator.translate_column(&RawColumn::new("SMALLINT", sql_types::SMALLINT));
//! assert_eq!(column.ddl.text, "SMALLINT");
//! ```

pub mod ddl;
pub mod literal;
mod translator;

pub use translator::{TranslatedColumn, Translator};
