//! Table, column and key metadata.
//!
//! [`Table`] is the document form: raw column metadata as the source engine
//! reported it, as read from JSON. [`TableDef`] is the same table after
//! import, with a canonical [`TypeSpec`] per column.

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::traits::Importer;
use super::typespec::{RawColumn, TypeSpec};
use super::value::SqlValue;
use crate::error::Result;

/// Primary key value in a hashable, totally ordered form.
///
/// Used to match rows across two snapshots of a table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PkValue {
    Null,
    Bool(bool),
    Int(i64),
    Uuid(Uuid),
    /// Decimal, normalized so `1.50` and `1.5` compare equal.
    Decimal(String),
    String(String),
    Bytes(Vec<u8>),
    /// Any other value, keyed by its display form.
    Other(String),
}

impl PkValue {
    /// Key form of a value. Integers of every width compare equal; a large
    /// object is keyed by its content and fails if it cannot be loaded.
    pub fn from_value(value: &SqlValue<'_>) -> Result<Self> {
        let key = match value {
            SqlValue::Null => PkValue::Null,
            SqlValue::Bool(v) => PkValue::Bool(*v),
            SqlValue::I16(v) => PkValue::Int(i64::from(*v)),
            SqlValue::I32(v) => PkValue::Int(i64::from(*v)),
            SqlValue::I64(v) => PkValue::Int(*v),
            SqlValue::Decimal(v) => {
                let normalized = v.normalize();
                match i64::try_from(normalized) {
                    Ok(i) if normalized.scale() == 0 => PkValue::Int(i),
                    _ => PkValue::Decimal(normalized.to_string()),
                }
            }
            SqlValue::Text(v) => PkValue::String(v.to_string()),
            SqlValue::Bytes(v) => PkValue::Bytes(v.to_vec()),
            SqlValue::Uuid(v) => PkValue::Uuid(*v),
            SqlValue::F32(v) => PkValue::Other(format!("{:?}", v)),
            SqlValue::F64(v) => PkValue::Other(format!("{:?}", v)),
            SqlValue::Lob(lob) => PkValue::Bytes(lob.bytes()?.to_vec()),
            SqlValue::Date(v) => PkValue::Other(v.to_string()),
            SqlValue::Time(v) => PkValue::Other(v.to_string()),
            SqlValue::DateTime(v) => PkValue::Other(v.to_string()),
            SqlValue::Interval(v) => PkValue::Other(format!("{}/{}", v.months, v.nanos)),
        };
        Ok(key)
    }
}

impl std::fmt::Display for PkValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PkValue::Null => write!(f, "NULL"),
            PkValue::Bool(v) => write!(f, "{}", v),
            PkValue::Int(v) => write!(f, "{}", v),
            PkValue::Uuid(v) => write!(f, "{}", v),
            PkValue::Decimal(v) | PkValue::String(v) | PkValue::Other(v) => write!(f, "{}", v),
            PkValue::Bytes(v) => write!(f, "0x{}", hex::encode(v)),
        }
    }
}

/// Column as reported by the source engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    /// Raw type metadata: `type_name`, `size`, `scale`, `sql_type`, `java_class`.
    #[serde(flatten)]
    pub raw: RawColumn,

    #[serde(default = "default_nullable")]
    pub is_nullable: bool,
}

fn default_nullable() -> bool {
    true
}

/// Foreign key metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    #[serde(default)]
    pub name: String,

    /// Referencing column names.
    pub columns: Vec<String>,

    /// Referenced table name.
    pub ref_table: String,

    /// Referenced schema; the referencing table's schema when absent.
    #[serde(default)]
    pub ref_schema: Option<String>,

    /// Referenced column names.
    #[serde(default)]
    pub ref_columns: Vec<String>,
}

/// Table document with raw column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub schema: Option<String>,

    pub name: String,

    pub columns: Vec<Column>,

    #[serde(default)]
    pub primary_key: Vec<String>,

    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Infer every column's canonical type with `importer`.
    pub fn import(&self, importer: &dyn Importer) -> TableDef {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let spec = importer.infer(&c.raw);
                debug!(
                    "{}.{}: {} -> {}",
                    self.name,
                    c.name,
                    c.raw.clause_representation(),
                    spec
                );
                ColumnDef {
                    name: c.name.clone(),
                    spec,
                    is_nullable: c.is_nullable,
                }
            })
            .collect();
        TableDef {
            schema: self.schema.clone(),
            name: self.name.clone(),
            columns,
            primary_key: self.primary_key.clone(),
            foreign_keys: self.foreign_keys.clone(),
        }
    }
}

/// Column with its canonical type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub spec: TypeSpec,
    pub is_nullable: bool,
}

/// Table with canonical column types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDef {
    /// `schema.name`, or `name` when the table has no schema.
    pub fn full_name(&self) -> String {
        qualified(self.schema.as_deref(), &self.name)
    }

    pub fn has_pk(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Position of a column by name, case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Positions of the primary key columns; `None` if one is missing.
    pub fn key_indexes(&self) -> Option<Vec<usize>> {
        self.primary_key
            .iter()
            .map(|k| self.column_index(k))
            .collect()
    }

    /// Qualified name of the table a foreign key points at.
    pub fn referenced_name(&self, fk: &ForeignKey) -> String {
        let schema = fk.ref_schema.as_deref().or(self.schema.as_deref());
        qualified(schema, &fk.ref_table)
    }
}

fn qualified(schema: Option<&str>, name: &str) -> String {
    match schema {
        Some(s) if !s.is_empty() => format!("{}.{}", s, name),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sql_types;
    use crate::core::value::LazyLob;
    use rust_decimal::Decimal;
    use std::borrow::Cow;

    fn make_test_table() -> TableDef {
        TableDef {
            schema: Some("hr".to_string()),
            name: "emp".to_string(),
            columns: vec![
                ColumnDef {
                    name: "Id".to_string(),
                    spec: TypeSpec::integer_bits(32),
                    is_nullable: false,
                },
                ColumnDef {
                    name: "dept_id".to_string(),
                    spec: TypeSpec::integer_bits(32),
                    is_nullable: true,
                },
            ],
            primary_key: vec!["id".to_string()],
            foreign_keys: vec![ForeignKey {
                name: "fk_dept".to_string(),
                columns: vec!["dept_id".to_string()],
                ref_table: "dept".to_string(),
                ref_schema: None,
                ref_columns: vec!["id".to_string()],
            }],
        }
    }

    #[test]
    fn test_pk_value_normalizes_integers() {
        let key = |v: SqlValue<'_>| PkValue::from_value(&v).unwrap();
        assert_eq!(key(SqlValue::I16(7)), PkValue::Int(7));
        assert_eq!(key(SqlValue::Decimal(Decimal::new(700, 2))), PkValue::Int(7));
        assert_eq!(
            key(SqlValue::Decimal(Decimal::new(150, 2))),
            key(SqlValue::Decimal(Decimal::new(15, 1)))
        );
        assert_eq!(key(SqlValue::Text(Cow::Borrowed("O'Brien"))).to_string(), "O'Brien");
    }

    #[test]
    fn test_pk_value_keeps_booleans_apart() {
        let key = |v: SqlValue<'_>| PkValue::from_value(&v).unwrap();
        assert_eq!(key(SqlValue::Bool(true)), PkValue::Bool(true));
        assert_ne!(key(SqlValue::Bool(true)), key(SqlValue::I64(1)));
        assert_eq!(key(SqlValue::Bool(false)).to_string(), "false");
    }

    #[test]
    fn test_pk_value_of_lob() {
        let lob = LazyLob::binary(|| Ok(vec![0xAB]));
        assert_eq!(
            PkValue::from_value(&SqlValue::Lob(lob)).unwrap(),
            PkValue::Bytes(vec![0xAB])
        );
        let broken = LazyLob::binary(|| Err("socket closed".into()));
        assert!(matches!(
            PkValue::from_value(&SqlValue::Lob(broken)),
            Err(crate::error::XlateError::LobLoad(_))
        ));
    }

    #[test]
    fn test_table_names_and_keys() {
        let table = make_test_table();
        assert_eq!(table.full_name(), "hr.emp");
        assert_eq!(table.key_indexes(), Some(vec![0]));
        assert_eq!(table.referenced_name(&table.foreign_keys[0]), "hr.dept");
        assert!(table.has_pk());
    }

    #[test]
    fn test_column_document_shape() {
        let json = r#"{
            "name": "emp",
            "columns": [
                {"name": "id", "type_name": "NUMBER", "size": 10, "scale": 0, "sql_type": 2, "is_nullable": false},
                {"name": "note", "type_name": "VARCHAR2", "size": 200, "sql_type": 12}
            ],
            "primary_key": ["id"]
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].raw.sql_type, sql_types::NUMERIC);
        assert!(!table.columns[0].is_nullable);
        assert!(table.columns[1].is_nullable);
        assert!(table.schema.is_none());
    }
}
