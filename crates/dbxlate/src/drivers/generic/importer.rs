//! Standard SQL importer, driven by the generic type code.
//!
//! Every engine importer falls back to [`infer_from_sql_type`] for names it
//! does not recognize.

use crate::core::sql_types;
use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};

/// Importer for engines without a dedicated one.
#[derive(Debug, Clone, Default)]
pub struct GenericImporter;

impl GenericImporter {
    /// Create a new generic importer.
    pub fn new() -> Self {
        Self
    }
}

impl Importer for GenericImporter {
    fn name(&self) -> &str {
        "generic"
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let name = TypeName::parse(&raw.type_name);
        let spec = match standard_name(&name, raw) {
            Some(spec) => spec,
            None => infer_from_sql_type(raw),
        };
        common::finish(spec, raw)
    }
}

/// Standard SQL type names.
fn standard_name(name: &TypeName, raw: &RawColumn) -> Option<TypeSpec> {
    let size = common::size_of(name, raw);
    let fraction = name.arg_u32(0);
    let spec = match name.base.as_str() {
        "boolean" => TypeSpec::integer_bits(1),
        "smallint" => TypeSpec::integer_bits(16),
        "integer" | "int" => TypeSpec::integer_bits(32),
        "bigint" => TypeSpec::integer_bits(64),
        "decimal" | "numeric" | "dec" => match size.filter(|p| *p > 0) {
            Some(p) => TypeSpec::decimal(Some(p), Some(common::scale_of(name, raw).unwrap_or(0))),
            None => TypeSpec::decimal(None, None),
        },
        "real" => TypeSpec::ieee_single(),
        "double precision" | "double" => TypeSpec::ieee_double(),
        "float" => match size {
            Some(bits) if bits <= 24 => TypeSpec::ieee_single(),
            _ => TypeSpec::ieee_double(),
        },
        "char" | "character" => TypeSpec::sized(TypeKind::Char, size),
        "varchar" | "character varying" | "char varying" => {
            TypeSpec::sized(TypeKind::VarChar, size)
        }
        "nchar" | "national character" | "national char" => {
            TypeSpec::sized(TypeKind::NChar, size)
        }
        "nvarchar" | "national character varying" | "nchar varying" => {
            TypeSpec::sized(TypeKind::VarNChar, size)
        }
        "clob" | "character large object" => TypeSpec::sized(TypeKind::LongVarChar, None),
        "nclob" | "national character large object" => {
            TypeSpec::sized(TypeKind::LongVarNChar, None)
        }
        "binary" => TypeSpec::sized(TypeKind::Raw, size),
        "varbinary" | "binary varying" => TypeSpec::sized(TypeKind::VarRaw, size),
        "blob" | "binary large object" => TypeSpec::sized(TypeKind::LongVarRaw, None),
        "date" => TypeSpec::temporal(TypeKind::Date, None),
        "time" => TypeSpec::temporal(TypeKind::Time, fraction),
        "time with time zone" => TypeSpec::temporal(TypeKind::TimeTz, fraction),
        "timestamp" => TypeSpec::temporal(TypeKind::Timestamp, fraction),
        "timestamp with time zone" => TypeSpec::temporal(TypeKind::TimestampTz, fraction),
        "interval year to month" => {
            TypeSpec::interval(TypeKind::IntervalYm, name.arg_u32(0), None)
        }
        "interval day to second" => TypeSpec::interval(
            TypeKind::IntervalDs,
            name.arg_u32(0),
            name.arg_u32(1),
        ),
        _ => return None,
    };
    Some(spec)
}

/// Inference from the generic type code alone.
pub(crate) fn infer_from_sql_type(raw: &RawColumn) -> TypeSpec {
    let size = raw.size_u32().filter(|s| *s > 0);
    let fraction = raw.scale.and_then(|s| u32::try_from(s).ok());
    match raw.sql_type {
        sql_types::BIT | sql_types::BOOLEAN => TypeSpec::integer_bits(1),
        sql_types::TINYINT => TypeSpec::integer_bits(8),
        sql_types::SMALLINT => TypeSpec::integer_bits(16),
        sql_types::INTEGER => TypeSpec::integer_bits(32),
        sql_types::BIGINT => TypeSpec::integer_bits(64),
        sql_types::REAL => TypeSpec::ieee_single(),
        sql_types::FLOAT | sql_types::DOUBLE => TypeSpec::ieee_double(),
        sql_types::NUMERIC | sql_types::DECIMAL => match size {
            Some(p) => TypeSpec::decimal(Some(p), Some(raw.scale.unwrap_or(0))),
            None => TypeSpec::decimal(None, None),
        },
        sql_types::CHAR => TypeSpec::sized(TypeKind::Char, size),
        sql_types::VARCHAR => TypeSpec::sized(TypeKind::VarChar, size),
        sql_types::LONGVARCHAR | sql_types::CLOB | sql_types::SQLXML => {
            TypeSpec::sized(TypeKind::LongVarChar, None)
        }
        sql_types::NCHAR => TypeSpec::sized(TypeKind::NChar, size),
        sql_types::NVARCHAR => TypeSpec::sized(TypeKind::VarNChar, size),
        sql_types::LONGNVARCHAR | sql_types::NCLOB => {
            TypeSpec::sized(TypeKind::LongVarNChar, None)
        }
        sql_types::BINARY => TypeSpec::sized(TypeKind::Raw, size),
        sql_types::VARBINARY => TypeSpec::sized(TypeKind::VarRaw, size),
        sql_types::LONGVARBINARY | sql_types::BLOB => {
            TypeSpec::sized(TypeKind::LongVarRaw, None)
        }
        sql_types::DATE => TypeSpec::temporal(TypeKind::Date, None),
        sql_types::TIME => TypeSpec::temporal(TypeKind::Time, fraction),
        sql_types::TIME_WITH_TIMEZONE => TypeSpec::temporal(TypeKind::TimeTz, fraction),
        sql_types::TIMESTAMP => TypeSpec::temporal(TypeKind::Timestamp, fraction),
        sql_types::TIMESTAMP_WITH_TIMEZONE => {
            TypeSpec::temporal(TypeKind::TimestampTz, fraction)
        }
        _ => common::unknown(raw),
    }
}
