//! Transbase script generator.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::interval::{trimmed_fraction_digits, Interval};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};
use crate::dialect::literal;

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 30,
    max_scale: 30,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[
    (8, "TINYINT"),
    (16, "SMALLINT"),
    (32, "INTEGER"),
    (64, "BIGINT"),
];

/// Transbase stores milliseconds at most.
const MAX_FRACTION: u32 = 3;

/// Transbase generator.
#[derive(Debug, Clone, Default)]
pub struct TransbaseGenerator;

impl TransbaseGenerator {
    /// Create a new Transbase generator.
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

/// Lowest field of a range: `MS` when fractional seconds survive.
fn low_field(digits: Option<u32>, warnings: &mut Vec<String>) -> &'static str {
    let digits = match digits {
        Some(d) if d > MAX_FRACTION => {
            warnings.push(format!(
                "transbase keeps milliseconds only; {} fractional digits truncated to {}",
                d, MAX_FRACTION
            ));
            MAX_FRACTION
        }
        Some(d) => d,
        None => 0,
    };
    if digits > 0 {
        "MS"
    } else {
        "SS"
    }
}

impl ScriptGenerator for TransbaseGenerator {
    fn name(&self) -> &str {
        "transbase"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        if spec.kind.is_zoned() {
            warnings.push(ddl::zone_dropped(self.name(), spec));
        }
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "REAL", "DOUBLE", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char | TypeKind::NChar => match spec.size {
                Some(n) => format!("CHAR({})", n.max(1)),
                None => "CHAR(*)".to_string(),
            },
            TypeKind::VarChar | TypeKind::VarNChar => match spec.size {
                Some(n) => format!("VARCHAR({})", n.max(1)),
                None => "CHAR(*)".to_string(),
            },
            TypeKind::LongVarChar | TypeKind::LongVarNChar => "CLOB".to_string(),
            TypeKind::Raw => match spec.size {
                Some(n) => format!("BINCHAR({})", n.max(1)),
                None => "BINCHAR(*)".to_string(),
            },
            TypeKind::VarRaw => "BINCHAR(*)".to_string(),
            TypeKind::LongVarRaw => "BLOB".to_string(),
            TypeKind::Date => "DATETIME[YY:DD]".to_string(),
            TypeKind::Time | TypeKind::TimeTz => {
                let digits = spec.size.unwrap_or(MAX_FRACTION);
                format!("DATETIME[HH:{}]", low_field(Some(digits), &mut warnings))
            }
            TypeKind::Timestamp | TypeKind::TimestampTz => {
                let digits = spec.size.unwrap_or(MAX_FRACTION);
                format!("DATETIME[YY:{}]", low_field(Some(digits), &mut warnings))
            }
            TypeKind::IntervalYm => "TIMESPAN[YY:MO]".to_string(),
            TypeKind::IntervalDs => {
                format!("TIMESPAN[DD:{}]", low_field(spec.fraction, &mut warnings))
            }
            TypeKind::IntervalYs => {
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
        format!("DATETIME[YY:DD]({})", format_date(date))
    }

    fn time_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        let low = if digits > 0 { "MS" } else { "SS" };
        format!("DATETIME[HH:{}]({})", low, value.format_time(digits, false))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        let low = if digits > 0 { "MS" } else { "SS" };
        format!("DATETIME[YY:{}]({})", low, value.format(digits, false))
    }

    fn interval_literal(&self, spec: &TypeSpec, value: &Interval) -> Rendered {
        match spec.kind {
            TypeKind::IntervalYm => {
                let (negative, years, months) = value.year_month_parts();
                let mut out = Rendered::exact(format!(
                    "{}TIMESPAN[YY:MO]({}-{})",
                    if negative { "-" } else { "" },
                    years,
                    months
                ));
                if value.nanos != 0 {
                    out.warn(format!("day-second part of {} dropped", value));
                }
                out
            }
            TypeKind::IntervalDs => {
                let (folded, clamped) = value.folded_day_second();
                let needed = trimmed_fraction_digits(folded.day_second_parts().nanos);
                let digits = needed.min(MAX_FRACTION);
                let low = if digits > 0 { "MS" } else { "SS" };
                let text = folded.format_day_second(digits);
                let (sign, body) = match text.strip_prefix('-') {
                    Some(body) => ("-", body),
                    None => ("", text.as_str()),
                };
                let mut out = Rendered::exact(format!("{}TIMESPAN[DD:{}]({})", sign, low, body));
                if clamped {
                    out.warn(format!("{} exceeds the day-second range; clamped to {}", value, folded));
                }
                if value.months != 0 {
                    out.warn(format!(
                        "month part of {} folded into days using the average month",
                        value
                    ));
                }
                if digits < needed {
                    out.warn(format!("fractional seconds of {} truncated to milliseconds", value));
                }
                out
            }
            _ => literal::linearized_interval(spec, value),
        }
    }
}
