//! MS-SQL column metadata → canonical types.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// Length drivers report for `(max)` columns.
const MAX_LENGTH: u32 = 1_073_741_823;

/// Microsoft SQL Server importer.
#[derive(Debug, Clone, Default)]
pub struct MssqlImporter;

impl MssqlImporter {
    /// Create a new MSSQL importer.
    pub fn new() -> Self {
        Self
    }
}

/// Declared length, or `None` for `(max)` and unbounded lengths.
fn length(name: &TypeName, raw: &RawColumn) -> Option<u32> {
    if name.args.first().map(String::as_str) == Some("max") || raw.size == Some(-1) {
        return None;
    }
    common::size_of(name, raw).filter(|n| *n < MAX_LENGTH)
}

impl Importer for MssqlImporter {
    fn name(&self) -> &str {
        "mssql"
    }

    fn reports_table_info(&self) -> bool {
        false
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let parsed = TypeName::parse(&raw.type_name);
        // `int identity` reads as `int`; the native form keeps the suffix.
        let base = parsed.strip_suffix("identity").unwrap_or(parsed.base.as_str());
        let size = common::size_of(&parsed, raw);
        let len = length(&parsed, raw);
        let fraction = parsed
            .arg_u32(0)
            .or_else(|| raw.scale.and_then(|s| u32::try_from(s).ok()));

        let spec = match base {
            "bit" => TypeSpec::integer_bits(1),
            // unsigned 0..255
            "tinyint" => TypeSpec::integer_bits(9),
            "smallint" => TypeSpec::integer_bits(16),
            "int" | "integer" => TypeSpec::integer_bits(32),
            "bigint" => TypeSpec::integer_bits(64),
            "decimal" | "numeric" => TypeSpec::decimal(
                Some(size.filter(|p| *p > 0).unwrap_or(18)),
                Some(common::scale_of(&parsed, raw).unwrap_or(0)),
            ),
            "money" => TypeSpec::decimal(Some(19), Some(4)).native("money"),
            "smallmoney" => TypeSpec::decimal(Some(10), Some(4)).native("smallmoney"),
            "real" => TypeSpec::ieee_single(),
            "float" => match size {
                Some(bits) if bits <= 24 => TypeSpec::ieee_single(),
                _ => TypeSpec::ieee_double(),
            },
            "char" => TypeSpec::sized(TypeKind::Char, size),
            "varchar" => match len {
                Some(n) => TypeSpec::sized(TypeKind::VarChar, Some(n)),
                None => TypeSpec::sized(TypeKind::LongVarChar, None).native("varchar(max)"),
            },
            "text" => TypeSpec::sized(TypeKind::LongVarChar, None),
            "nchar" => TypeSpec::sized(TypeKind::NChar, size),
            "nvarchar" | "sysname" => match len {
                Some(n) => TypeSpec::sized(TypeKind::VarNChar, Some(n)),
                None => TypeSpec::sized(TypeKind::LongVarNChar, None).native("nvarchar(max)"),
            },
            "ntext" | "xml" => TypeSpec::sized(TypeKind::LongVarNChar, None),
            "binary" => TypeSpec::sized(TypeKind::Raw, size),
            "varbinary" => match len {
                Some(n) => TypeSpec::sized(TypeKind::VarRaw, Some(n)),
                None => TypeSpec::sized(TypeKind::LongVarRaw, None).native("varbinary(max)"),
            },
            "image" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "timestamp" | "rowversion" => {
                TypeSpec::sized(TypeKind::Raw, Some(8)).native(raw.type_name.trim())
            }
            "uniqueidentifier" => {
                TypeSpec::sized(TypeKind::Char, Some(36)).native("uniqueidentifier")
            }
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            "time" => TypeSpec::temporal(TypeKind::Time, Some(fraction.unwrap_or(7))),
            "datetime" => TypeSpec::temporal(TypeKind::Timestamp, Some(3)),
            "smalldatetime" => TypeSpec::temporal(TypeKind::Timestamp, Some(0)),
            "datetime2" => TypeSpec::temporal(TypeKind::Timestamp, Some(fraction.unwrap_or(7))),
            "datetimeoffset" => {
                TypeSpec::temporal(TypeKind::TimestampTz, Some(fraction.unwrap_or(7)))
            }
            _ => infer_from_sql_type(raw),
        };
        common::finish(spec, raw)
    }
}
