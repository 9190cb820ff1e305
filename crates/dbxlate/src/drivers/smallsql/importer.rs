//! SmallSQL column metadata → canonical types.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// SmallSQL importer.
#[derive(Debug, Clone, Default)]
pub struct SmallsqlImporter;

impl SmallsqlImporter {
    /// Create a new SmallSQL importer.
    pub fn new() -> Self {
        Self
    }
}

impl Importer for SmallsqlImporter {
    fn name(&self) -> &str {
        "smallsql"
    }

    fn reports_table_info(&self) -> bool {
        false
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let name = TypeName::parse(&raw.type_name);
        let size = common::size_of(&name, raw);

        let spec = match name.base.as_str() {
            "bit" | "boolean" => TypeSpec::integer_bits(1),
            // unsigned 0..255
            "tinyint" => TypeSpec::integer_bits(9),
            "smallint" => TypeSpec::integer_bits(16),
            "int" | "integer" => TypeSpec::integer_bits(32),
            "bigint" => TypeSpec::integer_bits(64),
            "real" => TypeSpec::ieee_single(),
            "double" | "float" => TypeSpec::ieee_double().native(raw.type_name.trim()),
            "decimal" | "numeric" => TypeSpec::decimal(
                Some(size.filter(|p| *p > 0).unwrap_or(18)),
                Some(common::scale_of(&name, raw).unwrap_or(0)),
            ),
            "money" => TypeSpec::decimal(Some(19), Some(4)).native("MONEY"),
            "smallmoney" => TypeSpec::decimal(Some(10), Some(4)).native("SMALLMONEY"),
            "char" => TypeSpec::sized(TypeKind::Char, size),
            "nchar" => TypeSpec::sized(TypeKind::NChar, size),
            "varchar" => TypeSpec::sized(TypeKind::VarChar, size),
            "nvarchar" => TypeSpec::sized(TypeKind::VarNChar, size),
            "longvarchar" | "text" | "clob" => TypeSpec::sized(TypeKind::LongVarChar, None),
            "longnvarchar" | "ntext" => TypeSpec::sized(TypeKind::LongVarNChar, None),
            "binary" => TypeSpec::sized(TypeKind::Raw, size),
            "varbinary" => TypeSpec::sized(TypeKind::VarRaw, size),
            "longvarbinary" | "image" | "blob" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            "time" => TypeSpec::temporal(TypeKind::Time, Some(0)).native(raw.type_name.trim()),
            "datetime" | "timestamp" => {
                TypeSpec::temporal(TypeKind::Timestamp, Some(3)).native(raw.type_name.trim())
            }
            "smalldatetime" => TypeSpec::temporal(TypeKind::Timestamp, Some(0)),
            "uniqueidentifier" => {
                TypeSpec::sized(TypeKind::Char, Some(36)).native("UNIQUEIDENTIFIER")
            }
            _ => infer_from_sql_type(raw),
        };
        common::finish(spec, raw)
    }
}
