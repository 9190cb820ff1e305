//! PostgreSQL script generator.

use crate::core::datetime::DateTime;
use crate::core::interval::{push_fraction, trimmed_fraction_digits, Interval};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::core::value::SqlValue;
use crate::dialect::ddl::{self, DecimalLimits};
use crate::dialect::literal;

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 1000,
    max_scale: 1000,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[(16, "smallint"), (32, "integer"), (64, "bigint")];

const MAX_LENGTH: u32 = 10_485_760;
const MAX_FRACTION: u32 = 6;

/// PostgreSQL generator.
#[derive(Debug, Clone, Default)]
pub struct PostgresGenerator;

impl PostgresGenerator {
    /// Create a new PostgreSQL generator.
    pub fn new() -> Self {
        Self
    }

    fn fixed(&self, spec: &TypeSpec) -> Rendered {
        if is_boolean(spec) {
            return Rendered::exact("boolean");
        }
        if spec.is_binary_integer() {
            if let Some(name) = ddl::integer_rung(spec.size.unwrap_or(0), INTEGERS) {
                return Rendered::exact(name);
            }
        }
        ddl::decimal_type("numeric", spec, LIMITS, false)
    }

    fn fraction(&self, name: &str, spec: &TypeSpec, warnings: &mut Vec<String>) -> String {
        let suffix = if spec.kind.is_zoned() {
            " with time zone"
        } else {
            ""
        };
        match ddl::clamp_fraction(spec, MAX_FRACTION, warnings) {
            Some(n) => format!("{}({}){}", name, n, suffix),
            None => format!("{}{}", name, suffix),
        }
    }
}

/// One-bit integers are PostgreSQL booleans.
fn is_boolean(spec: &TypeSpec) -> bool {
    spec.is_binary_integer() && spec.size == Some(1)
}

fn sized(name: &str, spec: &TypeSpec) -> Rendered {
    match spec.size {
        Some(n) if n <= MAX_LENGTH => Rendered::exact(format!("{}({})", name, n.max(1))),
        _ => Rendered::exact("text"),
    }
}

impl ScriptGenerator for PostgresGenerator {
    fn name(&self) -> &str {
        "postgres"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "real", "double precision", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char | TypeKind::NChar if spec.size.is_some() => return sized("char", spec),
            TypeKind::VarChar | TypeKind::VarNChar if spec.size.is_some() => {
                return sized("varchar", spec)
            }
            k if k.is_character() => "text".to_string(),
            TypeKind::Raw | TypeKind::VarRaw | TypeKind::LongVarRaw => "bytea".to_string(),
            TypeKind::Date => "date".to_string(),
            TypeKind::Time | TypeKind::TimeTz => self.fraction("time", spec, &mut warnings),
            TypeKind::Timestamp | TypeKind::TimestampTz => {
                self.fraction("timestamp", spec, &mut warnings)
            }
            TypeKind::IntervalYm => "interval year to month".to_string(),
            TypeKind::IntervalDs => match spec.fraction {
                Some(f) => format!(
                    "interval day to second({})",
                    ddl::clamp_length(f, MAX_FRACTION, "interval second", &mut warnings)
                ),
                None => "interval day to second".to_string(),
            },
            TypeKind::IntervalYs => "interval".to_string(),
            TypeKind::Unknown => return ddl::passthrough(self.name(), spec),
            // every character kind is handled above
            _ => "text".to_string(),
        };
        Rendered::exact(out).with_warnings(warnings)
    }

    fn render_literal(&self, spec: &TypeSpec, value: &SqlValue<'_>) -> Rendered {
        let as_int = match value {
            SqlValue::I16(v) => Some(i64::from(*v)),
            SqlValue::I32(v) => Some(i64::from(*v)),
            SqlValue::I64(v) => Some(*v),
            _ => None,
        };
        match as_int {
            Some(v) if is_boolean(spec) => Rendered::exact(self.bool_literal(spec, v != 0)),
            _ => literal::render(self, spec, value),
        }
    }

    fn max_fraction_digits(&self) -> u32 {
        MAX_FRACTION
    }

    fn bool_literal(&self, spec: &TypeSpec, value: bool) -> String {
        let text = match (spec.kind, value) {
            (TypeKind::Fixed, _) if !is_boolean(spec) => {
                if value {
                    "1"
                } else {
                    "0"
                }
            }
            (_, true) => "true",
            (_, false) => "false",
        };
        text.to_string()
    }

    fn string_literal(&self, _spec: &TypeSpec, text: &str) -> Rendered {
        if !text.chars().any(|c| c == '\\' || c.is_control()) {
            return Rendered::exact(literal::quote(text));
        }
        let mut out = String::from("E'");
        let mut dropped_nul = false;
        for c in text.chars() {
            match c {
                '\0' => dropped_nul = true,
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("''"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
                // C1 controls are code points, not bytes.
                c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
                c => out.push(c),
            }
        }
        out.push('\'');
        let mut rendered = Rendered::exact(out);
        if dropped_nul {
            rendered.warn("postgres text cannot hold NUL characters; removed");
        }
        rendered
    }

    fn binary_literal(&self, _spec: &TypeSpec, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() * 5 + 10);
        out.push_str("E'");
        for b in bytes {
            out.push_str(&format!("\\\\{:03o}", b));
        }
        out.push_str("'::bytea");
        out
    }

    fn non_finite_literal(&self, value: f64) -> Option<String> {
        let token = if value.is_nan() {
            "'NaN'"
        } else if value > 0.0 {
            "'Infinity'"
        } else {
            "'-Infinity'"
        };
        Some(token.to_string())
    }

    fn time_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        let keyword = if with_zone { "TIMETZ" } else { "TIME" };
        format!("{} '{}'", keyword, value.format_time(digits, with_zone))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        let keyword = if with_zone { "TIMESTAMPTZ" } else { "TIMESTAMP" };
        format!("{} '{}'", keyword, value.format(digits, with_zone))
    }

    fn interval_literal(&self, spec: &TypeSpec, value: &Interval) -> Rendered {
        let mut fields = Vec::new();
        let (negative, years, months) = value.year_month_parts();
        let sign = if negative { "-" } else { "" };
        if years != 0 {
            fields.push(format!("{}{} years", sign, years));
        }
        if months != 0 {
            fields.push(format!("{}{} mons", sign, months));
        }

        let parts = value.day_second_parts();
        let sign = if parts.negative { "-" } else { "" };
        if parts.days != 0 {
            fields.push(format!("{}{} days", sign, parts.days));
        }
        let needed = trimmed_fraction_digits(parts.nanos);
        let digits = spec.fraction.unwrap_or(needed).min(needed).min(MAX_FRACTION);
        let has_clock = parts.hours != 0 || parts.minutes != 0 || parts.seconds != 0 || parts.nanos != 0;
        if has_clock || fields.is_empty() {
            let mut clock = format!(
                "{}{:02}:{:02}:{:02}",
                sign, parts.hours, parts.minutes, parts.seconds
            );
            push_fraction(&mut clock, parts.nanos, digits);
            fields.push(clock);
        }

        let mut out = Rendered::exact(format!("INTERVAL '{}'", fields.join(" ")));
        if digits < needed {
            out.warn(format!("fractional seconds of {} truncated to {} digits", value, digits));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(spec: TypeSpec) -> Rendered {
        PostgresGenerator::new().render_type(&spec)
    }

    #[test]
    fn test_types() {
        assert_eq!(render(TypeSpec::integer_bits(1)).text, "boolean");
        assert_eq!(render(TypeSpec::integer_bits(16)).text, "smallint");
        assert_eq!(render(TypeSpec::integer_bits(33)).text, "bigint");
        assert_eq!(render(TypeSpec::decimal(None, None)).text, "numeric");
        assert_eq!(render(TypeSpec::decimal(Some(10), Some(2))).text, "numeric(10,2)");
        assert_eq!(render(TypeSpec::ieee_double()).text, "double precision");
        assert_eq!(render(TypeSpec::sized(TypeKind::NChar, Some(4))).text, "char(4)");
        assert_eq!(render(TypeSpec::sized(TypeKind::VarChar, None)).text, "text");
        assert_eq!(render(TypeSpec::sized(TypeKind::Raw, Some(16))).text, "bytea");
        assert_eq!(
            render(TypeSpec::temporal(TypeKind::TimestampTz, Some(3))).text,
            "timestamp(3) with time zone"
        );
        let r = render(TypeSpec::temporal(TypeKind::Timestamp, Some(9)));
        assert_eq!(r.text, "timestamp(6)");
        assert!(r.is_lossy());
        assert_eq!(
            render(TypeSpec::interval(TypeKind::IntervalDs, Some(2), Some(3))).text,
            "interval day to second(3)"
        );
    }

    #[test]
    fn test_boolean_literals() {
        let gen = PostgresGenerator::new();
        let flag = TypeSpec::integer_bits(1);
        assert_eq!(gen.render_literal(&flag, &SqlValue::I32(1)).text, "true");
        assert_eq!(gen.render_literal(&flag, &SqlValue::Bool(false)).text, "false");
        let small = TypeSpec::integer_bits(16);
        assert_eq!(gen.render_literal(&small, &SqlValue::I32(1)).text, "1");
        assert_eq!(gen.render_literal(&small, &SqlValue::Bool(true)).text, "1");
    }

    #[test]
    fn test_string_and_binary_literals() {
        let gen = PostgresGenerator::new();
        let text = TypeSpec::sized(TypeKind::VarChar, Some(20));
        assert_eq!(gen.render_literal(&text, &SqlValue::from("it's")).text, "'it''s'");
        assert_eq!(
            gen.render_literal(&text, &SqlValue::from("a\\b\n")).text,
            "E'a\\\\b\\n'"
        );
        let r = gen.render_literal(&text, &SqlValue::from("a\0b"));
        assert_eq!(r.text, "E'ab'");
        assert!(r.is_lossy());
        assert_eq!(
            gen.render_literal(&text, &SqlValue::from("a\u{7}b\u{85}")).text,
            "E'a\\x07b\\u0085'"
        );

        let bin = TypeSpec::sized(TypeKind::LongVarRaw, None);
        assert_eq!(
            gen.render_literal(&bin, &SqlValue::from(vec![0xDE, 0xAD])).text,
            "E'\\\\336\\\\255'::bytea"
        );
    }

    #[test]
    fn test_temporal_and_interval_literals() {
        let gen = PostgresGenerator::new();
        let tz = TypeSpec::temporal(TypeKind::TimestampTz, Some(6));
        assert_eq!(
            gen.render_literal(&tz, &SqlValue::from("2024-03-01 10:20:30 +02:00")).text,
            "TIMESTAMPTZ '2024-03-01 10:20:30 +02:00'"
        );
        let iv = TypeSpec::interval(TypeKind::IntervalYs, None, Some(6));
        let value = Interval::new(14, 3 * 86_400_000_000_000 + 14_706_250_000_000);
        assert_eq!(
            gen.render_literal(&iv, &SqlValue::Interval(value)).text,
            "INTERVAL '1 years 2 mons 3 days 04:05:06.25'"
        );
        assert_eq!(
            gen.render_literal(&iv, &SqlValue::Interval(Interval::default())).text,
            "INTERVAL '00:00:00'"
        );
        let double = TypeSpec::ieee_double();
        assert_eq!(gen.render_literal(&double, &SqlValue::F64(f64::NAN)).text, "'NaN'");
    }
}
