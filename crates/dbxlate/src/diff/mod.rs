//! Row diffs and foreign-key ordering.
//!
//! - [`diff_rows`]: compare two snapshots of a table by primary key
//! - [`CommitGraph`]: which tables a change touches, and in what order
//!   their statements must run

mod graph;
mod rows;

pub use graph::CommitGraph;
pub use rows::{
    diff_rows, display_key, row_key, values_equal, DiffStats, Row, RowKey, RowUpdate, TableDiff,
};
