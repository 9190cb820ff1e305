//! DB2 column metadata → canonical types.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// DB2 importer.
#[derive(Debug, Clone, Default)]
pub struct Db2Importer;

impl Db2Importer {
    /// Create a new DB2 importer.
    pub fn new() -> Self {
        Self
    }
}

impl Importer for Db2Importer {
    fn name(&self) -> &str {
        "db2"
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let name = TypeName::parse(&raw.type_name);
        let size = common::size_of(&name, raw);
        // Double-byte kinds report their length in bytes.
        let graphic = name
            .arg_u32(0)
            .or_else(|| raw.size_u32().map(|bytes| bytes / 2));

        let spec = match name.base.as_str() {
            "smallint" => TypeSpec::integer_bits(16),
            "integer" | "int" => TypeSpec::integer_bits(32),
            "bigint" => TypeSpec::integer_bits(64),
            "decimal" | "numeric" | "dec" | "num" => TypeSpec::decimal(
                Some(size.filter(|p| *p > 0).unwrap_or(5)),
                Some(common::scale_of(&name, raw).unwrap_or(0)),
            ),
            "real" => TypeSpec::ieee_single(),
            "double" | "double precision" => TypeSpec::ieee_double(),
            "float" => match size {
                Some(bits) if bits <= 24 => TypeSpec::ieee_single(),
                _ => TypeSpec::ieee_double(),
            },
            "decfloat" => match size {
                Some(16) => TypeSpec::float(16, false, -383, 384, false)
                    .native(common::clause_name(raw, Some("16".to_string()))),
                _ => TypeSpec::float(34, false, -6143, 6144, false),
            },
            "boolean" => TypeSpec::integer_bits(1),
            "char" | "character" => TypeSpec::sized(TypeKind::Char, size),
            "varchar" | "character varying" => TypeSpec::sized(TypeKind::VarChar, size),
            "long varchar" | "clob" | "xml" => TypeSpec::sized(TypeKind::LongVarChar, None),
            "graphic" => TypeSpec::sized(TypeKind::NChar, graphic),
            "vargraphic" => TypeSpec::sized(TypeKind::VarNChar, graphic),
            "long vargraphic" | "dbclob" => TypeSpec::sized(TypeKind::LongVarNChar, None),
            "char for bit data" | "character for bit data" => {
                TypeSpec::sized(TypeKind::Raw, size)
            }
            "varchar for bit data" => TypeSpec::sized(TypeKind::VarRaw, size),
            "long varchar for bit data" | "blob" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            "time" => TypeSpec::temporal(TypeKind::Time, Some(0)).native(raw.type_name.trim()),
            "timestamp" => TypeSpec::temporal(
                TypeKind::Timestamp,
                Some(name.arg_u32(0).unwrap_or(6)),
            ),
            _ => infer_from_sql_type(raw),
        };
        common::finish(spec, raw)
    }
}
