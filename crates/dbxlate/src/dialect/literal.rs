//! Literal rendering shared by every script generator.
//!
//! [`render`] decides, from the value and the column kind, which hook of the
//! [`ScriptGenerator`] produces the text. Dialects only override the hooks.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::datetime::DateTime;
use crate::core::interval::{trimmed_fraction_digits, Interval};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::core::value::{LobKind, SqlValue};

/// Standard single-quoted literal with `''` doubling.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Render `value` for a column of type `spec` through the generator's hooks.
pub fn render<G: ScriptGenerator + ?Sized>(
    gen: &G,
    spec: &TypeSpec,
    value: &SqlValue<'_>,
) -> Rendered {
    match value {
        SqlValue::Null => Rendered::exact(gen.null_token()),
        SqlValue::Bool(v) => Rendered::exact(gen.bool_literal(spec, *v)),
        SqlValue::I16(v) => Rendered::exact(v.to_string()),
        SqlValue::I32(v) => Rendered::exact(v.to_string()),
        SqlValue::I64(v) => Rendered::exact(v.to_string()),
        SqlValue::F32(v) => float(gen, f64::from(*v), format!("{:?}", v)),
        SqlValue::F64(v) => float(gen, *v, format!("{:?}", v)),
        SqlValue::Decimal(v) => Rendered::exact(v.to_string()),
        SqlValue::Text(text) => text_into(gen, spec, text),
        SqlValue::Bytes(bytes) => bytes_into(gen, spec, bytes),
        SqlValue::Lob(lob) => match lob.bytes() {
            Ok(bytes) => match lob.kind() {
                LobKind::Binary => bytes_into(gen, spec, bytes),
                LobKind::Character => text_into(gen, spec, &String::from_utf8_lossy(bytes)),
            },
            Err(e) => {
                warn!("Rendering NULL for unloadable large object: {}", e);
                Rendered::lossy(gen.null_token(), e.to_string())
            }
        },
        SqlValue::Uuid(v) => {
            if spec.kind.is_binary() {
                Rendered::exact(gen.binary_literal(spec, v.as_bytes()))
            } else {
                gen.string_literal(spec, &v.hyphenated().to_string())
            }
        }
        SqlValue::Date(date) => date_into(gen, spec, *date),
        SqlValue::Time(time) => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
            temporal(gen, spec, &DateTime::naive(epoch.and_time(*time)))
        }
        SqlValue::DateTime(dt) => temporal(gen, spec, dt),
        SqlValue::Interval(iv) => gen.interval_literal(spec, iv),
    }
}

fn float<G: ScriptGenerator + ?Sized>(gen: &G, value: f64, text: String) -> Rendered {
    if value.is_finite() {
        return Rendered::exact(text);
    }
    match gen.non_finite_literal(value) {
        Some(token) => Rendered::exact(token),
        None => Rendered::lossy(
            gen.null_token(),
            format!("{} has no {} literal, rendered as NULL", value, gen.name()),
        ),
    }
}

fn text_into<G: ScriptGenerator + ?Sized>(gen: &G, spec: &TypeSpec, text: &str) -> Rendered {
    match spec.kind {
        k if k.is_binary() => Rendered::exact(gen.binary_literal(spec, text.as_bytes())),
        TypeKind::Fixed | TypeKind::Float => {
            if Decimal::from_str(text.trim()).is_ok() || text.trim().parse::<f64>().is_ok() {
                Rendered::exact(text.trim())
            } else {
                let mut out = gen.string_literal(spec, text);
                out.warn(format!("'{}' is not numeric; emitted as a string", text));
                out
            }
        }
        k if k.is_temporal() => match DateTime::parse(text).or_else(|| {
            matches!(k, TypeKind::Time | TypeKind::TimeTz)
                .then(|| DateTime::parse(&format!("1970-01-01 {}", text.trim())))
                .flatten()
        }) {
            Some(dt) => temporal(gen, spec, &dt),
            None => {
                let mut out = gen.string_literal(spec, text);
                out.warn(format!("'{}' is not a {} value; emitted as a string", text, k));
                out
            }
        },
        _ => gen.string_literal(spec, text),
    }
}

fn bytes_into<G: ScriptGenerator + ?Sized>(gen: &G, spec: &TypeSpec, bytes: &[u8]) -> Rendered {
    if spec.kind.is_character() {
        match std::str::from_utf8(bytes) {
            Ok(text) => gen.string_literal(spec, text),
            Err(_) => {
                let mut out = gen.string_literal(spec, &String::from_utf8_lossy(bytes));
                out.warn("invalid UTF-8 replaced in character literal");
                out
            }
        }
    } else {
        Rendered::exact(gen.binary_literal(spec, bytes))
    }
}

fn date_into<G: ScriptGenerator + ?Sized>(gen: &G, spec: &TypeSpec, date: NaiveDate) -> Rendered {
    match spec.kind {
        TypeKind::Timestamp | TypeKind::TimestampTz => {
            temporal(gen, spec, &DateTime::from_date(date))
        }
        _ => Rendered::exact(gen.date_literal(date)),
    }
}

/// Fractional digits to print and the digits the value needs. The printed
/// count is capped by the column and the dialect.
fn fraction_digits<G: ScriptGenerator + ?Sized>(
    gen: &G,
    spec: &TypeSpec,
    value: &DateTime,
) -> (u32, u32) {
    let nanos = i64::from(chrono::Timelike::nanosecond(&value.wall).min(999_999_999));
    let needed = trimmed_fraction_digits(nanos);
    let digits = needed.min(spec.size.unwrap_or(9)).min(gen.max_fraction_digits());
    (digits, needed)
}

fn temporal<G: ScriptGenerator + ?Sized>(gen: &G, spec: &TypeSpec, value: &DateTime) -> Rendered {
    let with_zone = spec.kind.is_zoned() && gen.supports_zone(spec.kind);
    let (digits, needed) = match spec.kind {
        TypeKind::Date => (0, 0),
        _ => fraction_digits(gen, spec, value),
    };
    let mut out = match spec.kind {
        TypeKind::Date => Rendered::exact(gen.date_literal(value.date())),
        TypeKind::Time | TypeKind::TimeTz => {
            Rendered::exact(gen.time_literal(value, digits, with_zone))
        }
        _ => Rendered::exact(gen.timestamp_literal(value, digits, with_zone)),
    };
    if digits < needed {
        out.warn(format!(
            "fractional seconds of {} truncated to {} digits",
            value, digits
        ));
    }
    if spec.kind.is_zoned() && !with_zone && value.offset().is_some() {
        out.warn(format!(
            "{} has no zoned time types; offset dropped from {}",
            gen.name(),
            value
        ));
    }
    out
}

/// Integer stand-in for an interval: months for year-month columns,
/// nanoseconds otherwise.
pub fn linearized_interval(spec: &TypeSpec, value: &Interval) -> Rendered {
    match spec.kind {
        TypeKind::IntervalYm => {
            if value.nanos != 0 {
                Rendered::lossy(
                    value.months.to_string(),
                    format!("day-second part of {} dropped", value),
                )
            } else {
                Rendered::exact(value.months.to_string())
            }
        }
        _ => Rendered::exact(value.total_nanos().to_string()),
    }
}

/// Standard SQL interval literal: `INTERVAL '1-2' YEAR(n) TO MONTH` or
/// `INTERVAL '3 04:05:06.25' DAY(n) TO SECOND(f)`. `None` for year-second
/// columns, which have no standard literal.
pub fn ansi_interval(spec: &TypeSpec, value: &Interval) -> Option<Rendered> {
    match spec.kind {
        TypeKind::IntervalYm => {
            let (_, years, _) = value.year_month_parts();
            let leading = spec.size.unwrap_or(2).max(digit_count(years));
            let mut out = Rendered::exact(format!(
                "INTERVAL '{}' YEAR({}) TO MONTH",
                value.format_year_month(),
                leading
            ));
            if value.nanos != 0 {
                out.warn(format!("day-second part of {} dropped", value));
            }
            Some(out)
        }
        TypeKind::IntervalDs => {
            let (folded, clamped) = value.folded_day_second();
            let parts = folded.day_second_parts();
            let leading = spec.size.unwrap_or(2).max(digit_count(parts.days));
            let fraction = spec
                .fraction
                .unwrap_or_else(|| trimmed_fraction_digits(parts.nanos))
                .min(9);
            let mut out = Rendered::exact(format!(
                "INTERVAL '{}' DAY({}) TO SECOND({})",
                folded.format_day_second(fraction),
                leading,
                fraction
            ));
            if value.months != 0 {
                out.warn(format!(
                    "month part of {} folded into days using the average month",
                    value
                ));
            }
            if clamped {
                out.warn(format!("{} exceeds the day-second range; clamped to {}", value, folded));
            }
            Some(out)
        }
        _ => None,
    }
}

fn digit_count(n: i64) -> u32 {
    let mut n = n.unsigned_abs();
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// `'..'` literal where control characters are spliced in with a
/// concatenation function, e.g. `'a' || chr(10) || 'b'`.
pub fn concat_escaped(prefix: &str, text: &str, concat: &str, char_fn: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut run = String::new();
    for c in text.chars() {
        if c.is_control() {
            if !run.is_empty() {
                parts.push(format!("{}{}", prefix, quote(&run)));
                run.clear();
            }
            parts.push(format!("{}({})", char_fn, u32::from(c)));
        } else {
            run.push(c);
        }
    }
    if !run.is_empty() || parts.is_empty() {
        parts.push(format!("{}{}", prefix, quote(&run)));
    }
    parts.join(&format!(" {} ", concat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_doubles_single_quotes() {
        assert_eq!(quote("it's"), "'it''s'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_concat_escaped() {
        assert_eq!(
            concat_escaped("", "a\nb", "||", "chr"),
            "'a' || chr(10) || 'b'"
        );
        assert_eq!(concat_escaped("N", "\t", "+", "char"), "char(9)");
        assert_eq!(concat_escaped("", "", "||", "chr"), "''");
        assert_eq!(concat_escaped("", "x'y", "||", "chr"), "'x''y'");
    }

    #[test]
    fn test_fraction_truncation_warns() {
        let gen = crate::drivers::GenericGenerator::new();
        let ts = TypeSpec::temporal(TypeKind::Timestamp, Some(2));
        let r = gen.render_literal(&ts, &SqlValue::from("2024-03-01 10:20:30.125"));
        assert!(r.text.contains("10:20:30.12"), "{}", r.text);
        assert!(r.warnings.iter().any(|w| w.contains("truncated to 2 digits")));

        let r = gen.render_literal(&ts, &SqlValue::from("2024-03-01 10:20:30.5"));
        assert!(!r.is_lossy());
    }

    #[test]
    fn test_ansi_interval_reports_clamp() {
        let ds = TypeSpec::interval(TypeKind::IntervalDs, Some(2), Some(0));
        let r = ansi_interval(&ds, &Interval::from_months(12 * 10_000)).unwrap();
        assert!(r.text.starts_with("INTERVAL '106751 23:47:16'"), "{}", r.text);
        assert!(r.warnings.iter().any(|w| w.contains("clamped")));
    }

    #[test]
    fn test_linearized_interval() {
        let ym = TypeSpec::interval(TypeKind::IntervalYm, Some(2), None);
        let r = linearized_interval(&ym, &Interval::from_months(14));
        assert_eq!(r, Rendered::exact("14"));

        let r = linearized_interval(&ym, &Interval::new(1, 5));
        assert_eq!(r.text, "1");
        assert!(r.is_lossy());

        let ys = TypeSpec::interval(TypeKind::IntervalYs, None, Some(6));
        let r = linearized_interval(&ys, &Interval::new(1, 5));
        assert_eq!(r.text, "2629746000000005");
    }
}
