//! Oracle script generator.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::interval::Interval;
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};
use crate::dialect::literal;

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 38,
    max_scale: 127,
    negative_scale: true,
};

/// Base-10 exponent range of `NUMBER`.
const NUMBER_EXPONENTS: (i32, i32) = (-130, 125);

const MAX_FLOAT_BITS: u32 = 126;
const MAX_CHAR: u32 = 2000;
const MAX_VARCHAR2: u32 = 4000;
const MAX_NCHAR: u32 = 1000;
const MAX_NVARCHAR2: u32 = 2000;
const MAX_RAW: u32 = 2000;
const MAX_FRACTION: u32 = 9;

/// Oracle generator.
#[derive(Debug, Clone, Default)]
pub struct OracleGenerator;

impl OracleGenerator {
    /// Create a new Oracle generator.
    pub fn new() -> Self {
        Self
    }

    fn float(&self, spec: &TypeSpec) -> Rendered {
        if spec.exp_of_2 {
            return ddl::float_type(spec, "BINARY_FLOAT", "BINARY_DOUBLE", ddl::IEEE_DOUBLE_EXPONENTS);
        }
        let mut out = if spec.size_in_bits {
            let mut warnings = Vec::new();
            let bits = ddl::clamp_length(spec.size.unwrap_or(MAX_FLOAT_BITS), MAX_FLOAT_BITS, "FLOAT", &mut warnings);
            Rendered::exact(format!("FLOAT({})", bits.max(1))).with_warnings(warnings)
        } else {
            let mut out = Rendered::exact("NUMBER");
            if spec.size.unwrap_or(0) > LIMITS.max_precision {
                out.warn(format!(
                    "{}-digit mantissa exceeds NUMBER precision {}; rounded",
                    spec.size.unwrap_or(0),
                    LIMITS.max_precision
                ));
            }
            out
        };
        if let Some((min, max)) = spec.exponents_base10() {
            if min < NUMBER_EXPONENTS.0 || max > NUMBER_EXPONENTS.1 {
                out.warn(format!(
                    "exponent range 10^[{},{}] exceeds 10^[{},{}]",
                    min, max, NUMBER_EXPONENTS.0, NUMBER_EXPONENTS.1
                ));
            }
        }
        out
    }

    fn fixed(&self, spec: &TypeSpec) -> Rendered {
        ddl::decimal_type("NUMBER", spec, LIMITS, true)
    }

    fn fraction(&self, spec: &TypeSpec, warnings: &mut Vec<String>, suffix: &str) -> String {
        match ddl::clamp_fraction(spec, MAX_FRACTION, warnings) {
            Some(n) => format!("TIMESTAMP({}){}", n, suffix),
            None => format!("TIMESTAMP{}", suffix),
        }
    }
}

/// Fixed type promoted to its varying form and then to a LOB.
fn promoted(size: Option<u32>, fixed: (&str, u32), varying: (&str, u32), lob: &str) -> String {
    match size {
        None => fixed.0.to_string(),
        Some(n) if n <= fixed.1 => format!("{}({})", fixed.0, n.max(1)),
        Some(n) if n <= varying.1 => format!("{}({})", varying.0, n),
        Some(_) => lob.to_string(),
    }
}

/// Oracle varying types need an explicit length; unbounded ones become LOBs.
fn varying(size: Option<u32>, varying: (&str, u32), lob: &str) -> String {
    match size {
        Some(n) if n <= varying.1 => format!("{}({})", varying.0, n.max(1)),
        _ => lob.to_string(),
    }
}

impl ScriptGenerator for OracleGenerator {
    fn name(&self) -> &str {
        "oracle"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => return self.float(spec),
            TypeKind::Char => {
                promoted(spec.size, ("CHAR", MAX_CHAR), ("VARCHAR2", MAX_VARCHAR2), "CLOB")
            }
            TypeKind::VarChar => varying(spec.size, ("VARCHAR2", MAX_VARCHAR2), "CLOB"),
            TypeKind::LongVarChar => "CLOB".to_string(),
            TypeKind::NChar => promoted(
                spec.size,
                ("NCHAR", MAX_NCHAR),
                ("NVARCHAR2", MAX_NVARCHAR2),
                "NCLOB",
            ),
            TypeKind::VarNChar => varying(spec.size, ("NVARCHAR2", MAX_NVARCHAR2), "NCLOB"),
            TypeKind::LongVarNChar => "NCLOB".to_string(),
            TypeKind::Raw | TypeKind::VarRaw => varying(spec.size, ("RAW", MAX_RAW), "BLOB"),
            TypeKind::LongVarRaw => "BLOB".to_string(),
            TypeKind::Date => "DATE".to_string(),
            TypeKind::Time => {
                warnings.push("oracle has no TIME type; stored with a date part".to_string());
                match spec.size {
                    Some(0) => "DATE".to_string(),
                    _ => self.fraction(spec, &mut warnings, ""),
                }
            }
            TypeKind::TimeTz => {
                warnings.push("oracle has no TIME type; stored with a date part".to_string());
                self.fraction(spec, &mut warnings, " WITH TIME ZONE")
            }
            TypeKind::Timestamp => match spec.size {
                Some(0) => "DATE".to_string(),
                _ => self.fraction(spec, &mut warnings, ""),
            },
            TypeKind::TimestampTz => self.fraction(spec, &mut warnings, " WITH TIME ZONE"),
            TypeKind::IntervalYm => {
                let leading = ddl::clamp_length(spec.size.unwrap_or(2), 9, "INTERVAL YEAR", &mut warnings);
                format!("INTERVAL YEAR({}) TO MONTH", leading)
            }
            TypeKind::IntervalDs => {
                let leading = ddl::clamp_length(spec.size.unwrap_or(2), 9, "INTERVAL DAY", &mut warnings);
                let fraction = ddl::clamp_length(spec.fraction.unwrap_or(6), MAX_FRACTION, "INTERVAL SECOND", &mut warnings);
                format!("INTERVAL DAY({}) TO SECOND({})", leading, fraction)
            }
            TypeKind::IntervalYs => {
                return ddl::linearized_interval_type(self.name(), spec, |n| self.fixed(n))
            }
            TypeKind::Unknown => return ddl::passthrough(self.name(), spec),
        };
        Rendered::exact(out).with_warnings(warnings)
    }

    fn national_prefix(&self) -> &str {
        "N"
    }

    fn string_literal(&self, spec: &TypeSpec, text: &str) -> Rendered {
        let (prefix, char_fn) = if spec.kind.is_national() {
            ("N", "nchr")
        } else {
            ("", "chr")
        };
        Rendered::exact(literal::concat_escaped(prefix, text, "||", char_fn))
    }

    fn binary_literal(&self, spec: &TypeSpec, bytes: &[u8]) -> String {
        if spec.kind.is_long() {
            format!("to_blob(hextoraw('{}'))", hex::encode(bytes))
        } else {
            format!("hextoraw('{}')", hex::encode(bytes))
        }
    }

    fn non_finite_literal(&self, value: f64) -> Option<String> {
        let token = if value.is_nan() {
            "BINARY_DOUBLE_NAN"
        } else if value > 0.0 {
            "BINARY_DOUBLE_INFINITY"
        } else {
            "-BINARY_DOUBLE_INFINITY"
        };
        Some(token.to_string())
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("to_date('{}','YYYY-MM-DD')", format_date(date))
    }

    // TIME columns are DATE or TIMESTAMP here, so times go through the
    // timestamp form anchored on their date part.
    fn time_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        self.timestamp_literal(value, digits, with_zone)
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        let text = value.format(digits, with_zone);
        match (with_zone, digits) {
            (true, 0) => format!("to_timestamp_tz('{}','YYYY-MM-DD HH24:MI:SS TZH:TZM')", text),
            (true, _) => format!("to_timestamp_tz('{}','YYYY-MM-DD HH24:MI:SS.FF TZH:TZM')", text),
            (false, 0) => format!("to_date('{}','YYYY-MM-DD HH24:MI:SS')", text),
            (false, _) => format!("to_timestamp('{}','YYYY-MM-DD HH24:MI:SS.FF')", text),
        }
    }

    fn interval_literal(&self, spec: &TypeSpec, value: &Interval) -> Rendered {
        literal::ansi_interval(spec, value)
            .unwrap_or_else(|| literal::linearized_interval(spec, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::SqlValue;

    fn render(spec: TypeSpec) -> Rendered {
        OracleGenerator::new().render_type(&spec)
    }

    #[test]
    fn test_numbers() {
        assert_eq!(render(TypeSpec::integer_bits(16)).text, "NUMBER(5)");
        assert_eq!(render(TypeSpec::decimal(Some(10), Some(2))).text, "NUMBER(10,2)");
        assert_eq!(render(TypeSpec::decimal(Some(5), Some(-2))).text, "NUMBER(5,-2)");
        assert_eq!(render(TypeSpec::decimal(None, None)).text, "NUMBER");
        assert_eq!(render(TypeSpec::float(38, false, -130, 125, false)), Rendered::exact("NUMBER"));
        assert_eq!(render(TypeSpec::ieee_single()).text, "BINARY_FLOAT");
        assert_eq!(render(TypeSpec::ieee_double()).text, "BINARY_DOUBLE");
        assert_eq!(render(TypeSpec::float(63, true, -130, 125, false)).text, "FLOAT(63)");
    }

    #[test]
    fn test_character_promotion() {
        assert_eq!(render(TypeSpec::sized(TypeKind::Char, Some(3000))).text, "VARCHAR2(3000)");
        assert_eq!(render(TypeSpec::sized(TypeKind::VarChar, Some(5000))).text, "CLOB");
        assert_eq!(render(TypeSpec::sized(TypeKind::VarChar, None)).text, "CLOB");
        assert_eq!(render(TypeSpec::sized(TypeKind::NChar, Some(1500))).text, "NVARCHAR2(1500)");
        assert_eq!(render(TypeSpec::sized(TypeKind::Raw, Some(16))).text, "RAW(16)");
        assert_eq!(render(TypeSpec::sized(TypeKind::VarRaw, None)).text, "BLOB");
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(render(TypeSpec::temporal(TypeKind::Timestamp, Some(0))).text, "DATE");
        assert_eq!(
            render(TypeSpec::temporal(TypeKind::TimestampTz, Some(3))).text,
            "TIMESTAMP(3) WITH TIME ZONE"
        );
        let r = render(TypeSpec::temporal(TypeKind::Time, Some(0)));
        assert_eq!(r.text, "DATE");
        assert!(r.is_lossy());
        assert_eq!(
            render(TypeSpec::interval(TypeKind::IntervalDs, Some(3), Some(2))).text,
            "INTERVAL DAY(3) TO SECOND(2)"
        );
    }

    #[test]
    fn test_literals() {
        let gen = OracleGenerator::new();
        let text = TypeSpec::sized(TypeKind::VarChar, Some(10));
        assert_eq!(
            gen.render_literal(&text, &SqlValue::from("a\nb")).text,
            "'a' || chr(10) || 'b'"
        );
        let raw = TypeSpec::sized(TypeKind::VarRaw, Some(2));
        assert_eq!(
            gen.render_literal(&raw, &SqlValue::from(vec![0xDE, 0xAD])).text,
            "hextoraw('dead')"
        );
        let double = TypeSpec::ieee_double();
        assert_eq!(
            gen.render_literal(&double, &SqlValue::F64(f64::NEG_INFINITY)).text,
            "-BINARY_DOUBLE_INFINITY"
        );
        let date = TypeSpec::temporal(TypeKind::Timestamp, Some(0));
        assert_eq!(
            gen.render_literal(&date, &SqlValue::from("2024-03-01 10:20:30")).text,
            "to_date('2024-03-01 10:20:30','YYYY-MM-DD HH24:MI:SS')"
        );
        let tz = TypeSpec::temporal(TypeKind::TimestampTz, Some(6));
        assert_eq!(
            gen.render_literal(&tz, &SqlValue::from("2024-03-01 10:20:30.5 +02:00")).text,
            "to_timestamp_tz('2024-03-01 10:20:30.5 +02:00','YYYY-MM-DD HH24:MI:SS.FF TZH:TZM')"
        );
    }
}
