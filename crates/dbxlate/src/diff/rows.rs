//! Primary-key row diff between two snapshots of one table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::schema::PkValue;
use crate::core::value::SqlValue;
use crate::error::{Result, XlateError};

/// One row, in table column order.
pub type Row = Vec<SqlValue<'static>>;

/// Composite primary key of a row.
pub type RowKey = Vec<PkValue>;

/// A row present in both snapshots with at least one differing column.
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdate {
    pub key: RowKey,
    pub before: Row,
    pub after: Row,
    /// Positions of the columns whose values differ.
    pub changed: Vec<usize>,
}

/// Rows to insert, delete and update to turn `before` into `after`.
///
/// Each list is ordered by primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDiff {
    pub inserted: Vec<Row>,
    pub deleted: Vec<Row>,
    pub updated: Vec<RowUpdate>,
}

/// Row counts of a [`TableDiff`], for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub updated: usize,
}

impl TableDiff {
    pub fn total_differences(&self) -> usize {
        self.inserted.len() + self.deleted.len() + self.updated.len()
    }

    pub fn has_differences(&self) -> bool {
        self.total_differences() > 0
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            inserted: self.inserted.len(),
            deleted: self.deleted.len(),
            updated: self.updated.len(),
        }
    }
}

/// Key of `row` made of the values at `key_columns`.
pub fn row_key(key_columns: &[usize], row: &[SqlValue<'_>]) -> Result<RowKey> {
    key_columns
        .iter()
        .map(|&i| {
            let value = row.get(i).ok_or_else(|| {
                XlateError::Diff(format!(
                    "key column {} out of range for a row of {} values",
                    i,
                    row.len()
                ))
            })?;
            PkValue::from_value(value)
        })
        .collect()
}

fn index_rows<'r>(
    key_columns: &[usize],
    rows: &'r [Row],
    side: &str,
) -> Result<BTreeMap<RowKey, &'r Row>> {
    let mut by_key = BTreeMap::new();
    for row in rows {
        let key = row_key(key_columns, row)?;
        if by_key.contains_key(&key) {
            return Err(XlateError::Diff(format!(
                "duplicate key ({}) in {} rows",
                display_key(&key),
                side
            )));
        }
        by_key.insert(key, row);
    }
    Ok(by_key)
}

/// `1, 'a'` style rendering of a key, for messages.
pub fn display_key(key: &[PkValue]) -> String {
    key.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compare two snapshots of a table by primary key.
///
/// # Errors
///
/// [`XlateError::Diff`] when `key_columns` is empty or out of range, when a
/// key repeats within one snapshot, or when the two versions of a row have
/// different widths. A large object that cannot be loaded fails the diff
/// with its load error.
pub fn diff_rows(key_columns: &[usize], before: &[Row], after: &[Row]) -> Result<TableDiff> {
    if key_columns.is_empty() {
        return Err(XlateError::Diff(
            "row diff requires at least one key column".to_string(),
        ));
    }

    let old = index_rows(key_columns, before, "before")?;
    let new = index_rows(key_columns, after, "after")?;
    let mut diff = TableDiff::default();

    for (key, row) in &old {
        if !new.contains_key(key) {
            diff.deleted.push((*row).clone());
        }
    }

    for (key, row) in &new {
        let Some(prior) = old.get(key) else {
            diff.inserted.push((*row).clone());
            continue;
        };
        if prior.len() != row.len() {
            return Err(XlateError::Diff(format!(
                "row ({}) has {} values before and {} after",
                display_key(key),
                prior.len(),
                row.len()
            )));
        }
        let mut changed = Vec::new();
        for (i, (a, b)) in prior.iter().zip(row.iter()).enumerate() {
            if !values_equal(a, b)? {
                changed.push(i);
            }
        }
        if !changed.is_empty() {
            diff.updated.push(RowUpdate {
                key: key.clone(),
                before: (*prior).clone(),
                after: (*row).clone(),
                changed,
            });
        }
    }

    Ok(diff)
}

fn as_i64(value: &SqlValue<'_>) -> Option<i64> {
    match value {
        SqlValue::I16(v) => Some(i64::from(*v)),
        SqlValue::I32(v) => Some(i64::from(*v)),
        SqlValue::I64(v) => Some(*v),
        _ => None,
    }
}

/// Value equality for change detection.
///
/// NaN equals NaN, integers compare across widths, and large objects compare
/// by content against each other and against inline bytes or text.
pub fn values_equal(a: &SqlValue<'_>, b: &SqlValue<'_>) -> Result<bool> {
    if let (Some(x), Some(y)) = (as_i64(a), as_i64(b)) {
        return Ok(x == y);
    }
    let equal = match (a, b) {
        (SqlValue::F64(x), SqlValue::F64(y)) => (x.is_nan() && y.is_nan()) || x == y,
        (SqlValue::F32(x), SqlValue::F32(y)) => (x.is_nan() && y.is_nan()) || x == y,
        (SqlValue::Decimal(x), SqlValue::Decimal(y)) => x == y,
        (SqlValue::Lob(x), SqlValue::Lob(y)) => x.bytes()? == y.bytes()?,
        (SqlValue::Lob(lob), SqlValue::Bytes(bytes)) | (SqlValue::Bytes(bytes), SqlValue::Lob(lob)) => {
            lob.bytes()? == &**bytes
        }
        (SqlValue::Lob(lob), SqlValue::Text(text)) | (SqlValue::Text(text), SqlValue::Lob(lob)) => {
            lob.bytes()? == text.as_bytes()
        }
        _ => a == b,
    };
    Ok(equal)
}
