//! MS-SQL script generator.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};
use crate::dialect::literal;

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 38,
    max_scale: 38,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[(1, "bit"), (16, "smallint"), (32, "int"), (64, "bigint")];

const MAX_BYTES: u32 = 8000;
const MAX_NCHARS: u32 = 4000;

/// Microsoft SQL Server generator.
#[derive(Debug, Clone, Default)]
pub struct MssqlGenerator;

impl MssqlGenerator {
    /// Create a new MSSQL generator.
    pub fn new() -> Self {
        Self
    }

    fn fixed(&self, spec: &TypeSpec) -> Rendered {
        if spec.is_binary_integer() {
            if let Some(name) = ddl::integer_rung(spec.size.unwrap_or(0), INTEGERS) {
                return Rendered::exact(name);
            }
        }
        let mut out = ddl::decimal_type("decimal", spec, LIMITS, false);
        if spec.size.is_none() {
            out.warn("unconstrained decimal defaults to decimal(18,0) in mssql");
        }
        out
    }
}

/// `name(n)` up to `max`, `(max)` form beyond it.
fn bounded(name: &str, size: Option<u32>, max: u32, varying: &str) -> String {
    match size {
        Some(n) if n <= max => format!("{}({})", name, n.max(1)),
        _ => format!("{}(max)", varying),
    }
}

impl ScriptGenerator for MssqlGenerator {
    fn name(&self) -> &str {
        "mssql"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "real", "float", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char => bounded("char", spec.size, MAX_BYTES, "varchar"),
            TypeKind::VarChar => bounded("varchar", spec.size, MAX_BYTES, "varchar"),
            TypeKind::LongVarChar => "varchar(max)".to_string(),
            TypeKind::NChar => bounded("nchar", spec.size, MAX_NCHARS, "nvarchar"),
            TypeKind::VarNChar => bounded("nvarchar", spec.size, MAX_NCHARS, "nvarchar"),
            TypeKind::LongVarNChar => "nvarchar(max)".to_string(),
            TypeKind::Raw => bounded("binary", spec.size, MAX_BYTES, "varbinary"),
            TypeKind::VarRaw => bounded("varbinary", spec.size, MAX_BYTES, "varbinary"),
            TypeKind::LongVarRaw => "varbinary(max)".to_string(),
            TypeKind::Date => "date".to_string(),
            TypeKind::Time | TypeKind::TimeTz => {
                if spec.kind.is_zoned() {
                    warnings.push(ddl::zone_dropped(self.name(), spec));
                }
                match ddl::clamp_fraction(spec, 7, &mut warnings) {
                    Some(n) => format!("time({})", n),
                    None => "time".to_string(),
                }
            }
            TypeKind::Timestamp => match ddl::clamp_fraction(spec, 7, &mut warnings) {
                Some(n) => format!("datetime2({})", n),
                None => "datetime2".to_string(),
            },
            TypeKind::TimestampTz => match ddl::clamp_fraction(spec, 7, &mut warnings) {
                Some(n) => format!("datetimeoffset({})", n),
                None => "datetimeoffset".to_string(),
            },
            TypeKind::IntervalYm | TypeKind::IntervalDs | TypeKind::IntervalYs => {
                return ddl::linearized_interval_type(self.name(), spec, |n| self.fixed(n))
            }
            TypeKind::Unknown => return ddl::passthrough(self.name(), spec),
        };
        Rendered::exact(out).with_warnings(warnings)
    }

    fn quote_ident(&self, name: &str) -> String {
        // Handle names that contain closing brackets by doubling them
        format!("[{}]", name.replace(']', "]]"))
    }

    fn supports_zone(&self, kind: TypeKind) -> bool {
        kind == TypeKind::TimestampTz
    }

    fn max_fraction_digits(&self) -> u32 {
        7
    }

    fn national_prefix(&self) -> &str {
        "N"
    }

    fn string_literal(&self, spec: &TypeSpec, text: &str) -> Rendered {
        let (prefix, char_fn) = if spec.kind.is_national() {
            ("N", "nchar")
        } else {
            ("", "char")
        };
        Rendered::exact(literal::concat_escaped(prefix, text, "+", char_fn))
    }

    fn binary_literal(&self, _spec: &TypeSpec, bytes: &[u8]) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("'{}'", format_date(date))
    }

    fn time_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        format!("'{}'", value.format_time(digits, false))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        format!(
            "'{}T{}'",
            value.format_date(),
            value.format_time(digits, with_zone)
        )
    }
}
