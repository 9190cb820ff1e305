//! Transbase column metadata → canonical types.
//!
//! Transbase describes temporal columns by a field range:
//! `DATETIME[YY:MS]`, `TIMESPAN[DD:SS]`. The range decides the kind; ranges
//! with no canonical counterpart (`DATETIME[MO:HH]`) stay UNKNOWN.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// Transbase importer.
#[derive(Debug, Clone, Default)]
pub struct TransbaseImporter;

impl TransbaseImporter {
    /// Create a new Transbase importer.
    pub fn new() -> Self {
        Self
    }
}

/// Temporal field, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Milli,
}

impl Field {
    fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "yy" => Some(Self::Year),
            "mo" => Some(Self::Month),
            "dd" => Some(Self::Day),
            "hh" => Some(Self::Hour),
            "mi" => Some(Self::Minute),
            "ss" => Some(Self::Second),
            "ms" => Some(Self::Milli),
            _ => None,
        }
    }
}

/// `datetime[yy:ms]` → (`datetime`, Year, Milli).
fn ranged(type_name: &str) -> Option<(String, Field, Field)> {
    let lower = type_name.trim().to_lowercase();
    let (base, rest) = lower.split_once('[')?;
    let (hi, lo) = rest.strip_suffix(']')?.split_once(':')?;
    let (hi, lo) = (Field::parse(hi)?, Field::parse(lo)?);
    (hi <= lo).then(|| (base.trim().to_string(), hi, lo))
}

fn millis(lo: Field) -> u32 {
    if lo == Field::Milli {
        3
    } else {
        0
    }
}

fn datetime(hi: Field, lo: Field) -> Option<TypeSpec> {
    use Field::*;
    let spec = match (hi, lo) {
        (Year, Day) => TypeSpec::temporal(TypeKind::Date, None),
        (Year, Second | Milli) => TypeSpec::temporal(TypeKind::Timestamp, Some(millis(lo))),
        (Hour, Minute | Second | Milli) => TypeSpec::temporal(TypeKind::Time, Some(millis(lo))),
        _ => return None,
    };
    Some(spec)
}

fn timespan(hi: Field, lo: Field) -> Option<TypeSpec> {
    use Field::*;
    let spec = match (hi, lo) {
        (Year | Month, Year | Month) => TypeSpec::interval(TypeKind::IntervalYm, None, None),
        (Day | Hour | Minute | Second | Milli, _) => {
            TypeSpec::interval(TypeKind::IntervalDs, None, Some(millis(lo)))
        }
        _ => return None,
    };
    Some(spec)
}

impl Importer for TransbaseImporter {
    fn name(&self) -> &str {
        "transbase"
    }

    fn reports_table_info(&self) -> bool {
        false
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        if let Some((base, hi, lo)) = ranged(&raw.type_name) {
            let spec = match base.as_str() {
                "datetime" => datetime(hi, lo),
                "timespan" | "interval" => timespan(hi, lo),
                _ => None,
            };
            return match spec {
                Some(spec) => common::finish(spec.native(raw.type_name.trim()), raw),
                None => common::unknown(raw).with_raw(raw),
            };
        }

        let name = TypeName::parse(&raw.type_name);
        let star = name.args.first().map(String::as_str) == Some("*");
        let size = if star { None } else { common::size_of(&name, raw) };

        let spec = match name.base.as_str() {
            "bool" | "boolean" => TypeSpec::integer_bits(1),
            "tinyint" => TypeSpec::integer_bits(8),
            "smallint" => TypeSpec::integer_bits(16),
            "integer" | "int" => TypeSpec::integer_bits(32),
            "bigint" => TypeSpec::integer_bits(64),
            "numeric" | "decimal" => TypeSpec::decimal(
                Some(size.filter(|p| *p > 0).unwrap_or(30)),
                Some(common::scale_of(&name, raw).unwrap_or(0)),
            ),
            "real" => TypeSpec::ieee_single(),
            "float" | "double" => TypeSpec::ieee_double().native(raw.type_name.trim()),
            "char" if star => TypeSpec::sized(TypeKind::VarChar, None),
            "char" => TypeSpec::sized(TypeKind::Char, size),
            "varchar" => TypeSpec::sized(TypeKind::VarChar, size),
            "string" => TypeSpec::sized(TypeKind::VarChar, None),
            "clob" => TypeSpec::sized(TypeKind::LongVarChar, None),
            "binchar" if star => TypeSpec::sized(TypeKind::VarRaw, None),
            "binchar" => TypeSpec::sized(TypeKind::Raw, size),
            "blob" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            "time" => TypeSpec::temporal(TypeKind::Time, Some(3)),
            "timestamp" => TypeSpec::temporal(TypeKind::Timestamp, Some(3)),
            _ => infer_from_sql_type(raw),
        };
        common::finish(spec, raw)
    }
}
