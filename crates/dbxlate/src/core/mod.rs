//! Core abstractions for cross-dialect translation.
//!
//! - [`typespec`]: the canonical [`TypeSpec`] every importer produces
//! - [`precision`]: bit/digit and exponent-base conversions
//! - [`value`]: SQL values, including deferred large objects
//! - [`interval`], [`datetime`]: vendor-neutral temporal values
//! - [`schema`]: table, column and key metadata
//! - [`traits`]: [`Importer`] and [`ScriptGenerator`]
//! - [`catalog`]: dialect registry for dependency injection
//!
//! # Architecture
//!
//! Engine-specific code lives in `drivers/<engine>` and only implements the
//! traits defined here. Everything downstream of inference (DDL, literals,
//! scripts, diffs) sees [`TypeSpec`] and [`SqlValue`] alone.
//!
//! # Design Patterns
//!
//! - **Hub and spoke**: N importers + N generators instead of N² mappers
//! - **Strategy**: importers and generators are interchangeable per dialect
//! - **Template Method**: default trait methods hold the shared rendering
//!   skeleton

pub mod catalog;
pub mod datetime;
pub mod interval;
pub mod precision;
pub mod schema;
pub mod sql_types;
pub mod traits;
pub mod typespec;
pub mod value;

// Re-export commonly used types for convenience
pub use catalog::DialectCatalog;
pub use datetime::{DateTime, ZoneMode};
pub use interval::Interval;
pub use schema::{Column, ColumnDef, ForeignKey, PkValue, Table, TableDef};
pub use traits::{Capabilities, Importer, Rendered, ScriptGenerator};
pub use typespec::{RawColumn, TypeKind, TypeSpec};
pub use value::{LazyLob, LobKind, SqlValue};
