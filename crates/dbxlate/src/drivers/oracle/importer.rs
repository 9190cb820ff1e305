//! Oracle column metadata → canonical types.
//!
//! Oracle reports every exact numeric as `NUMBER`; the precision and scale
//! decide what it really is:
//!
//! | reported                   | canonical                          |
//! |----------------------------|------------------------------------|
//! | `NUMBER`, scale -127/none  | FLOAT(38 digits, 10^[-130,125])    |
//! | `NUMBER(p)`, scale -127    | FLOAT(p bits, 10^[-130,125])       |
//! | `NUMBER(*,s)`              | FIXED(38,s)                        |
//! | `NUMBER(p,s)`              | FIXED(p,s)                         |

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// Scale Oracle reports for floating `NUMBER` columns.
const FLOATING_SCALE: i32 = -127;

const MIN_EXP: i32 = -130;
const MAX_EXP: i32 = 125;

/// Oracle importer.
#[derive(Debug, Clone, Default)]
pub struct OracleImporter;

impl OracleImporter {
    /// Create a new Oracle importer.
    pub fn new() -> Self {
        Self
    }
}

fn number(name: &TypeName, raw: &RawColumn) -> TypeSpec {
    let precision = common::size_of(name, raw).filter(|p| *p > 0);
    let reported_scale = common::scale_of(name, raw);
    let scale = reported_scale.filter(|s| *s != FLOATING_SCALE);
    match (precision, scale) {
        (None, None) => TypeSpec::float(38, false, MIN_EXP, MAX_EXP, false),
        (Some(bits), None) if reported_scale == Some(FLOATING_SCALE) => {
            TypeSpec::float(bits, true, MIN_EXP, MAX_EXP, false)
                .native(format!("FLOAT({})", bits))
        }
        (Some(p), None) => TypeSpec::decimal(Some(p), Some(0)),
        (None, Some(s)) => TypeSpec::decimal(Some(38), Some(s)),
        (Some(p), Some(s)) => TypeSpec::decimal(Some(p), Some(s)),
    }
}

impl Importer for OracleImporter {
    fn name(&self) -> &str {
        "oracle"
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
        let first = name.arg_u32(0);

        let spec = match name.base.as_str() {
            "number" | "numeric" | "decimal" => number(&name, raw),
            "integer" | "int" | "smallint" => {
                TypeSpec::decimal(Some(38), Some(0)).native(raw.type_name.trim())
            }
            "float" => TypeSpec::float(size.filter(|b| *b > 0).unwrap_or(126), true, MIN_EXP, MAX_EXP, false),
            "binary_float" => TypeSpec::ieee_single(),
            "binary_double" => TypeSpec::ieee_double(),
            "char" | "character" => TypeSpec::sized(TypeKind::Char, size),
            "nchar" => TypeSpec::sized(TypeKind::NChar, size),
            "varchar2" | "varchar" => TypeSpec::sized(TypeKind::VarChar, size),
            "nvarchar2" => TypeSpec::sized(TypeKind::VarNChar, size),
            "long" | "clob" => TypeSpec::sized(TypeKind::LongVarChar, None),
            "nclob" => TypeSpec::sized(TypeKind::LongVarNChar, None),
            "raw" => TypeSpec::sized(TypeKind::VarRaw, size),
            "long raw" | "blob" | "bfile" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "date" => TypeSpec::temporal(TypeKind::Timestamp, Some(0)),
            "timestamp" => TypeSpec::temporal(TypeKind::Timestamp, Some(first.unwrap_or(6))),
            "timestamp with time zone" | "timestamp with local time zone" => {
                TypeSpec::temporal(TypeKind::TimestampTz, Some(first.unwrap_or(6)))
            }
            "interval year to month" | "intervalym" => {
                let leading = first.unwrap_or(2);
                TypeSpec::interval(TypeKind::IntervalYm, Some(leading), None)
                    .native(format!("INTERVAL YEAR({}) TO MONTH", leading))
            }
            "interval day to second" | "intervalds" => {
                let (leading, fraction) = (first.unwrap_or(2), name.arg_u32(1).unwrap_or(6));
                TypeSpec::interval(TypeKind::IntervalDs, Some(leading), Some(fraction))
                    .native(format!("INTERVAL DAY({}) TO SECOND({})", leading, fraction))
            }
            _ => match common::infer_from_java_class(raw) {
                Some(spec) => spec,
                None => infer_from_sql_type(raw),
            },
        };
        common::finish(spec, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sql_types;

    #[test]
    fn test_unconstrained_number_is_decimal_float() {
        let raw = RawColumn::new("NUMBER", sql_types::NUMERIC)
            .with_size(0)
            .with_scale(-127);
        let spec = OracleImporter::new().infer(&raw);
        assert_eq!(spec.kind, TypeKind::Float);
        assert_eq!(spec.size, Some(38));
        assert!(!spec.size_in_bits);
        assert_eq!((spec.min_exp, spec.max_exp), (Some(-130), Some(125)));
        assert!(!spec.exp_of_2);
        assert_eq!(spec.native_representation, "NUMBER");
    }

    #[test]
    fn test_constrained_numbers() {
        let imp = OracleImporter::new();
        let raw = RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(10).with_scale(2);
        let spec = imp.infer(&raw);
        assert_eq!((spec.kind, spec.size, spec.scale), (TypeKind::Fixed, Some(10), Some(2)));
        assert_eq!(spec.native_representation, "NUMBER(10,2)");

        let raw = RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(0).with_scale(0);
        let spec = imp.infer(&raw);
        assert_eq!((spec.size, spec.scale), (Some(38), Some(0)));

        let raw = RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(5).with_scale(-2);
        assert_eq!(imp.infer(&raw).scale, Some(-2));

        let raw = RawColumn::new("FLOAT", sql_types::FLOAT).with_size(63);
        let spec = imp.infer(&raw);
        assert_eq!(spec.size_bits(), Some(63));
    }

    #[test]
    fn test_temporal_and_intervals() {
        let imp = OracleImporter::new();
        let spec = imp.infer(&RawColumn::new("DATE", sql_types::DATE));
        assert_eq!((spec.kind, spec.size), (TypeKind::Timestamp, Some(0)));

        let raw = RawColumn::new("TIMESTAMP(3) WITH LOCAL TIME ZONE", -102);
        let spec = imp.infer(&raw);
        assert_eq!((spec.kind, spec.size), (TypeKind::TimestampTz, Some(3)));

        let spec = imp.infer(&RawColumn::new("INTERVAL DAY(3) TO SECOND(2)", -104));
        assert_eq!((spec.size, spec.fraction), (Some(3), Some(2)));

        let spec = imp.infer(&RawColumn::new("INTERVALYM", -103));
        assert_eq!((spec.kind, spec.size), (TypeKind::IntervalYm, Some(2)));
    }

    #[test]
    fn test_probed_class_fallback() {
        let imp = OracleImporter::new();
        assert!(imp.requires_probe());
        assert!(!imp.reports_table_info());

        let raw = RawColumn::new("SYS.ANYDATA", sql_types::OTHER)
            .with_java_class("oracle.sql.TIMESTAMPTZ");
        assert_eq!(imp.infer(&raw).kind, TypeKind::TimestampTz);

        let raw = RawColumn::new("SDO_GEOMETRY", sql_types::STRUCT);
        let spec = imp.infer(&raw);
        assert_eq!(spec.kind, TypeKind::Unknown);
        assert_eq!(spec.native_representation, "SDO_GEOMETRY");
    }
}
