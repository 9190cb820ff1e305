//! JSON input documents: table definitions and row snapshots.
//!
//! Tables are a JSON array of table documents (a single object is accepted
//! too). Rows are an object keyed by table name, qualified or bare, whose
//! values are arrays of rows; a row is either an array in column order or an
//! object keyed by column name.

use std::path::Path;

use dbxlate::core::DialectCatalog;
use dbxlate::diff::Row;
use dbxlate::{SqlValue, Table, TableDef, XlateError};
use serde_json::{Map, Value};
use tracing::{debug, info};

pub type RowDocuments = Map<String, Value>;

fn read_json(path: &Path) -> Result<Value, XlateError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read table documents and infer their column types with `source`.
pub fn load_tables(
    path: &Path,
    catalog: &DialectCatalog,
    source: &str,
) -> Result<Vec<TableDef>, XlateError> {
    let importer = catalog.require_importer(source)?;
    let documents: Vec<Table> = match read_json(path)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };
    info!(
        "Loaded {} tables from {} ({} importer)",
        documents.len(),
        path.display(),
        importer.name()
    );
    Ok(documents
        .iter()
        .map(|t| t.import(importer.as_ref()))
        .collect())
}

pub fn find_table<'t>(tables: &'t [TableDef], name: &str) -> Option<&'t TableDef> {
    tables
        .iter()
        .find(|t| t.full_name().eq_ignore_ascii_case(name))
}

pub fn load_rows(path: &Path) -> Result<RowDocuments, XlateError> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        other => Err(XlateError::Config(format!(
            "{}: expected an object keyed by table name, got {}",
            path.display(),
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Remove and parse the rows for `table`; a table without an entry has none.
pub fn take_rows(documents: &mut RowDocuments, table: &TableDef) -> Result<Vec<Row>, XlateError> {
    let full = table.full_name();
    let key = documents
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&full) || k.eq_ignore_ascii_case(&table.name))
        .cloned();
    let Some(key) = key else {
        return Ok(Vec::new());
    };
    let Some(Value::Array(items)) = documents.remove(&key) else {
        return Err(XlateError::Config(format!(
            "rows for {} must be an array",
            full
        )));
    };
    debug!("{}: {} rows", full, items.len());
    items.iter().map(|item| parse_row(table, item)).collect()
}

fn parse_row(table: &TableDef, item: &Value) -> Result<Row, XlateError> {
    match item {
        Value::Array(values) => {
            if values.len() != table.columns.len() {
                return Err(XlateError::Script(format!(
                    "{} has {} columns but the row has {} values",
                    table.full_name(),
                    table.columns.len(),
                    values.len()
                )));
            }
            table
                .columns
                .iter()
                .zip(values)
                .map(|(column, value)| SqlValue::from_json(column.spec.kind, value))
                .collect()
        }
        Value::Object(fields) => {
            if let Some(unknown) = fields.keys().find(|k| table.column_index(k).is_none()) {
                return Err(XlateError::Script(format!(
                    "{} has no column {}",
                    table.full_name(),
                    unknown
                )));
            }
            table
                .columns
                .iter()
                .map(|column| {
                    let value = fields
                        .iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case(&column.name))
                        .map(|(_, v)| v);
                    match value {
                        Some(v) => SqlValue::from_json(column.spec.kind, v),
                        None => Ok(SqlValue::Null),
                    }
                })
                .collect()
        }
        other => Err(XlateError::Script(format!(
            "a row of {} must be an array or an object, got {}",
            table.full_name(),
            kind_of(other)
        ))),
    }
}

/// Fail on row entries naming tables that are not in the input.
pub fn reject_leftover_rows(documents: &RowDocuments) -> Result<(), XlateError> {
    if documents.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = documents.keys().map(String::as_str).collect();
    Err(XlateError::Config(format!(
        "rows given for unknown tables: {}",
        names.join(", ")
    )))
}
