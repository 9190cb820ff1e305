//! MySQL/MariaDB script generator.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 65,
    max_scale: 30,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[
    (8, "tinyint"),
    (16, "smallint"),
    (24, "mediumint"),
    (32, "int"),
    (64, "bigint"),
];

const MAX_CHAR: u32 = 255;
const MAX_VARCHAR: u32 = 65535;

/// MySQL/MariaDB generator.
#[derive(Debug, Clone, Default)]
pub struct MysqlGenerator;

impl MysqlGenerator {
    /// Create a new MySQL generator.
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
            out.warn("unconstrained decimal defaults to decimal(10,0) in mysql");
        }
        out
    }
}

/// `name(n)` while the length fits, `None` otherwise.
fn sized(name: &str, size: Option<u32>, max: u32) -> Option<String> {
    match size {
        Some(n) if n <= max => Some(format!("{}({})", name, n.max(1))),
        _ => None,
    }
}

impl ScriptGenerator for MysqlGenerator {
    fn name(&self) -> &str {
        "mysql"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "float", "double", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char => sized("char", spec.size, MAX_CHAR)
                .or_else(|| sized("varchar", spec.size, MAX_VARCHAR))
                .unwrap_or_else(|| "longtext".to_string()),
            TypeKind::VarChar => sized("varchar", spec.size, MAX_VARCHAR)
                .unwrap_or_else(|| "longtext".to_string()),
            TypeKind::NChar => sized("nchar", spec.size, MAX_CHAR)
                .or_else(|| sized("nvarchar", spec.size, MAX_VARCHAR))
                .unwrap_or_else(|| "longtext".to_string()),
            TypeKind::VarNChar => sized("nvarchar", spec.size, MAX_VARCHAR)
                .unwrap_or_else(|| "longtext".to_string()),
            TypeKind::LongVarChar | TypeKind::LongVarNChar => "longtext".to_string(),
            TypeKind::Raw => sized("binary", spec.size, MAX_CHAR)
                .or_else(|| sized("varbinary", spec.size, MAX_VARCHAR))
                .unwrap_or_else(|| "longblob".to_string()),
            TypeKind::VarRaw => sized("varbinary", spec.size, MAX_VARCHAR)
                .unwrap_or_else(|| "longblob".to_string()),
            TypeKind::LongVarRaw => "longblob".to_string(),
            TypeKind::Date => "date".to_string(),
            TypeKind::Time | TypeKind::TimeTz => {
                if spec.kind.is_zoned() {
                    warnings.push(ddl::zone_dropped(self.name(), spec));
                }
                match ddl::clamp_fraction(spec, 6, &mut warnings) {
                    Some(n) if n > 0 => format!("time({})", n),
                    _ => "time".to_string(),
                }
            }
            TypeKind::Timestamp | TypeKind::TimestampTz => {
                if spec.kind.is_zoned() {
                    warnings.push(ddl::zone_dropped(self.name(), spec));
                }
                let name = if spec.is_auto_timestamp {
                    "timestamp"
                } else {
                    "datetime"
                };
                match ddl::clamp_fraction(spec, 6, &mut warnings) {
                    Some(n) if n > 0 => format!("{}({})", name, n),
                    _ => name.to_string(),
                }
            }
            TypeKind::IntervalYm | TypeKind::IntervalDs | TypeKind::IntervalYs => {
                return ddl::linearized_interval_type(self.name(), spec, |n| self.fixed(n))
            }
            TypeKind::Unknown => return ddl::passthrough(self.name(), spec),
        };
        Rendered::exact(out).with_warnings(warnings)
    }

    fn quote_ident(&self, name: &str) -> String {
        // Handle names that contain backticks by doubling them
        format!("`{}`", name.replace('`', "``"))
    }

    fn supports_zone(&self, _kind: TypeKind) -> bool {
        false
    }

    fn max_fraction_digits(&self) -> u32 {
        6
    }

    fn national_prefix(&self) -> &str {
        "N"
    }

    fn string_literal(&self, spec: &TypeSpec, text: &str) -> Rendered {
        let mut out = String::with_capacity(text.len() + 3);
        if spec.kind.is_national() {
            out.push('N');
        }
        out.push('\'');
        for c in text.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\u{8}' => out.push_str("\\b"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{1a}' => out.push_str("\\Z"),
                '\\' => out.push_str("\\\\"),
                c => out.push(c),
            }
        }
        out.push('\'');
        Rendered::exact(out)
    }

    fn binary_literal(&self, _spec: &TypeSpec, bytes: &[u8]) -> String {
        if bytes.is_empty() {
            "X''".to_string()
        } else {
            format!("0x{}", hex::encode(bytes))
        }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("'{}'", format_date(date))
    }

    fn time_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        format!("'{}'", value.format_time(digits, false))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        format!("'{}'", value.format(digits, false))
    }
}
