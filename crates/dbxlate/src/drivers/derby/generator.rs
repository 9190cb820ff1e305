//! Derby script generator.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 31,
    max_scale: 31,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[(16, "SMALLINT"), (32, "INTEGER"), (64, "BIGINT")];

const MAX_CHAR: u32 = 254;
const MAX_VARCHAR: u32 = 32672;

/// Apache Derby generator.
#[derive(Debug, Clone, Default)]
pub struct DerbyGenerator;

impl DerbyGenerator {
    /// Create a new Derby generator.
    pub fn new() -> Self {
        Self
    }

    fn fixed(&self, spec: &TypeSpec) -> Rendered {
        if spec.is_binary_integer() {
            if let Some(name) = ddl::integer_rung(spec.size.unwrap_or(0), INTEGERS) {
                return Rendered::exact(name);
            }
        }
        let mut out = ddl::decimal_type("DECIMAL", spec, LIMITS, false);
        if spec.size.is_none() {
            out.warn("unconstrained DECIMAL defaults to DECIMAL(5,0) in derby");
        }
        out
    }
}

impl ScriptGenerator for DerbyGenerator {
    fn name(&self) -> &str {
        "derby"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "REAL", "DOUBLE", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char | TypeKind::NChar => match spec.size {
                Some(n) if n <= MAX_CHAR => format!("CHAR({})", n.max(1)),
                Some(n) if n <= MAX_VARCHAR => format!("VARCHAR({})", n),
                Some(_) => "CLOB".to_string(),
                None => "CHAR".to_string(),
            },
            TypeKind::VarChar | TypeKind::VarNChar => match spec.size {
                Some(n) if n <= MAX_VARCHAR => format!("VARCHAR({})", n.max(1)),
                _ => "CLOB".to_string(),
            },
            TypeKind::LongVarChar | TypeKind::LongVarNChar => "CLOB".to_string(),
            TypeKind::Raw => match spec.size {
                Some(n) if n <= MAX_CHAR => format!("CHAR({}) FOR BIT DATA", n.max(1)),
                Some(n) if n <= MAX_VARCHAR => format!("VARCHAR({}) FOR BIT DATA", n),
                Some(_) => "BLOB".to_string(),
                None => "CHAR FOR BIT DATA".to_string(),
            },
            TypeKind::VarRaw => match spec.size {
                Some(n) if n <= MAX_VARCHAR => format!("VARCHAR({}) FOR BIT DATA", n.max(1)),
                _ => "BLOB".to_string(),
            },
            TypeKind::LongVarRaw => "BLOB".to_string(),
            TypeKind::Date => "DATE".to_string(),
            TypeKind::Time | TypeKind::TimeTz => {
                if spec.size.unwrap_or(0) > 0 {
                    warnings.push("derby TIME has no fractional seconds; truncated".to_string());
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

    fn binary_literal(&self, spec: &TypeSpec, bytes: &[u8]) -> String {
        if spec.kind.is_long() {
            format!("CAST(X'{}' AS BLOB)", hex::encode(bytes))
        } else {
            format!("X'{}'", hex::encode(bytes))
        }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("DATE('{}')", format_date(date))
    }

    fn time_literal(&self, value: &DateTime, _digits: u32, _with_zone: bool) -> String {
        format!("TIME('{}')", value.format_time(0, false))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        format!("TIMESTAMP('{}')", value.format(digits, false))
    }
}
