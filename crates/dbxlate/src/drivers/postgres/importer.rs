//! PostgreSQL column metadata → canonical types.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// Precision the JDBC driver reports for an unconstrained `numeric`.
const UNCONSTRAINED_NUMERIC: u32 = 131_089;

/// PostgreSQL importer.
#[derive(Debug, Clone, Default)]
pub struct PostgresImporter;

impl PostgresImporter {
    /// Create a new PostgreSQL importer.
    pub fn new() -> Self {
        Self
    }
}

fn numeric(name: &TypeName, raw: &RawColumn) -> TypeSpec {
    match common::size_of(name, raw) {
        Some(p) if p > 0 && p < UNCONSTRAINED_NUMERIC => {
            TypeSpec::decimal(Some(p), Some(common::scale_of(name, raw).unwrap_or(0)))
        }
        _ => TypeSpec::decimal(None, None),
    }
}

impl Importer for PostgresImporter {
    fn name(&self) -> &str {
        "postgres"
    }

    fn reports_table_info(&self) -> bool {
        false
    }

    fn requires_probe(&self) -> bool {
        true
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let name = TypeName::parse(&raw.type_name);
        let size = common::size_of(&name, raw);
        let fraction = name
            .arg_u32(0)
            .or_else(|| raw.scale.and_then(|s| u32::try_from(s).ok()))
            .unwrap_or(6);

        let spec = match name.base.as_str() {
            "bool" | "boolean" => TypeSpec::integer_bits(1),
            "int2" | "smallint" | "smallserial" | "serial2" => TypeSpec::integer_bits(16),
            "int4" | "integer" | "int" | "serial" | "serial4" => TypeSpec::integer_bits(32),
            "int8" | "bigint" | "bigserial" | "serial8" => TypeSpec::integer_bits(64),
            // unsigned 32-bit
            "oid" => TypeSpec::integer_bits(33),
            "numeric" | "decimal" => numeric(&name, raw),
            "money" => TypeSpec::decimal(Some(19), Some(2)).native("money"),
            "float4" | "real" => TypeSpec::ieee_single(),
            "float8" | "double precision" => TypeSpec::ieee_double(),
            "bpchar" | "char" | "character" => TypeSpec::sized(TypeKind::Char, size),
            "varchar" | "character varying" => TypeSpec::sized(TypeKind::VarChar, size),
            "text" | "json" | "jsonb" | "xml" | "citext" => {
                TypeSpec::sized(TypeKind::LongVarChar, None)
            }
            "name" => TypeSpec::sized(TypeKind::VarChar, Some(63)).native("name"),
            "uuid" => TypeSpec::sized(TypeKind::Char, Some(36)).native("uuid"),
            "bytea" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "bit" if size.unwrap_or(1) <= 1 => TypeSpec::integer_bits(1),
            // Bit strings are sized in bits; the canonical size is in bytes.
            "bit" => TypeSpec::sized(TypeKind::Raw, size.map(|bits| bits.div_ceil(8)))
                .native(common::clause_name(raw, size.map(|bits| bits.to_string()))),
            "varbit" | "bit varying" => {
                TypeSpec::sized(TypeKind::VarRaw, size.map(|bits| bits.div_ceil(8)))
                    .native(common::clause_name(raw, size.map(|bits| bits.to_string())))
            }
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            "time" | "time without time zone" => TypeSpec::temporal(TypeKind::Time, Some(fraction)),
            "timetz" | "time with time zone" => {
                TypeSpec::temporal(TypeKind::TimeTz, Some(fraction))
            }
            "timestamp" | "timestamp without time zone" => {
                TypeSpec::temporal(TypeKind::Timestamp, Some(fraction))
            }
            "timestamptz" | "timestamp with time zone" => {
                TypeSpec::temporal(TypeKind::TimestampTz, Some(fraction))
            }
            "interval year to month" => TypeSpec::interval(TypeKind::IntervalYm, None, None),
            "interval day to second" => {
                TypeSpec::interval(TypeKind::IntervalDs, None, Some(fraction))
            }
            "interval" => TypeSpec::interval(TypeKind::IntervalYs, None, Some(fraction)),
            _ => match common::infer_from_java_class(raw) {
                Some(spec) => spec,
                None => infer_from_sql_type(raw),
            },
        };
        common::finish(spec, raw)
    }
}
