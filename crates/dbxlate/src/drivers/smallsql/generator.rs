//! SmallSQL script generator.
//!
//! Temporal literals use JDBC escape syntax (`{d '..'}`, `{t '..'}`,
//! `{ts '..'}`), which the SmallSQL parser resolves itself.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 38,
    max_scale: 38,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[(1, "BIT"), (16, "SMALLINT"), (32, "INT"), (64, "BIGINT")];

/// Millisecond timestamps.
const MAX_FRACTION: u32 = 3;

/// SmallSQL generator.
#[derive(Debug, Clone, Default)]
pub struct SmallsqlGenerator;

impl SmallsqlGenerator {
    /// Create a new SmallSQL generator.
    pub fn new() -> Self {
        Self
    }

    fn fixed(&self, spec: &TypeSpec) -> Rendered {
        if spec.is_binary_integer() {
            if let Some(name) = ddl::integer_rung(spec.size.unwrap_or(0), INTEGERS) {
                return Rendered::exact(name);
            }
        }
        ddl::decimal_type("NUMERIC", spec, LIMITS, false)
    }
}

fn sized_or(name: &str, spec: &TypeSpec, long: &str) -> String {
    match spec.size {
        Some(n) => format!("{}({})", name, n.max(1)),
        None => long.to_string(),
    }
}

impl ScriptGenerator for SmallsqlGenerator {
    fn name(&self) -> &str {
        "smallsql"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "REAL", "DOUBLE", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char => sized_or("CHAR", spec, "LONGVARCHAR"),
            TypeKind::VarChar => sized_or("VARCHAR", spec, "LONGVARCHAR"),
            TypeKind::LongVarChar => "LONGVARCHAR".to_string(),
            TypeKind::NChar => sized_or("NCHAR", spec, "LONGNVARCHAR"),
            TypeKind::VarNChar => sized_or("NVARCHAR", spec, "LONGNVARCHAR"),
            TypeKind::LongVarNChar => "LONGNVARCHAR".to_string(),
            TypeKind::Raw => sized_or("BINARY", spec, "LONGVARBINARY"),
            TypeKind::VarRaw => sized_or("VARBINARY", spec, "LONGVARBINARY"),
            TypeKind::LongVarRaw => "LONGVARBINARY".to_string(),
            TypeKind::Date => "DATE".to_string(),
            TypeKind::Time | TypeKind::TimeTz => {
                if spec.size.unwrap_or(0) > 0 {
                    warnings.push("smallsql TIME has no fractional seconds; truncated".to_string());
                }
                if spec.kind.is_zoned() {
                    warnings.push(ddl::zone_dropped(self.name(), spec));
                }
                "TIME".to_string()
            }
            TypeKind::Timestamp | TypeKind::TimestampTz => {
                if spec.kind.is_zoned() {
                    warnings.push(ddl::zone_dropped(self.name(), spec));
                }
                ddl::clamp_fraction(spec, MAX_FRACTION, &mut warnings);
                "TIMESTAMP".to_string()
            }
            TypeKind::IntervalYm | TypeKind::IntervalDs | TypeKind::IntervalYs => {
                return ddl::linearized_interval_type(self.name(), spec, |n| self.fixed(n))
            }
            TypeKind::Unknown => return ddl::passthrough(self.name(), spec),
        };
        Rendered::exact(out).with_warnings(warnings)
    }

    fn supports_zone(&self, _kind: TypeKind) -> bool {
        false
    }

    fn max_fraction_digits(&self) -> u32 {
        MAX_FRACTION
    }

    fn binary_literal(&self, _spec: &TypeSpec, bytes: &[u8]) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("{{d '{}'}}", format_date(date))
    }

    fn time_literal(&self, value: &DateTime, _digits: u32, _with_zone: bool) -> String {
        format!("{{t '{}'}}", value.format_time(0, false))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        format!("{{ts '{}'}}", value.format(digits, false))
    }
}
