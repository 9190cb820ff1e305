//! DB2 script generator.

use chrono::NaiveDate;

use crate::core::datetime::{format_date, DateTime};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};
use crate::dialect::literal;

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 31,
    max_scale: 31,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[(16, "SMALLINT"), (32, "INTEGER"), (64, "BIGINT")];

const MAX_CHAR: u32 = 254;
const MAX_VARCHAR: u32 = 32672;
const MAX_GRAPHIC: u32 = 127;
const MAX_VARGRAPHIC: u32 = 16336;

/// DB2 generator.
#[derive(Debug, Clone, Default)]
pub struct Db2Generator;

impl Db2Generator {
    /// Create a new DB2 generator.
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
            out.warn("unconstrained DECIMAL defaults to DECIMAL(5,0) in db2");
        }
        out
    }

    /// Fixed-length type, promoted to its varying form and then its LOB form
    /// when the length does not fit.
    fn character(&self, size: Option<u32>, fixed: (&str, u32), varying: (&str, u32), lob: &str) -> String {
        match size {
            None => fixed.0.to_string(),
            Some(n) if n <= fixed.1 => format!("{}({})", fixed.0, n.max(1)),
            Some(n) if n <= varying.1 => format!("{}({})", varying.0, n),
            Some(_) => lob.to_string(),
        }
    }

    fn varying(&self, size: Option<u32>, varying: (&str, u32), lob: &str) -> String {
        match size {
            Some(n) if n <= varying.1 => format!("{}({})", varying.0, n.max(1)),
            _ => lob.to_string(),
        }
    }
}

impl ScriptGenerator for Db2Generator {
    fn name(&self) -> &str {
        "db2"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "REAL", "DOUBLE", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char => self.character(
                spec.size,
                ("CHAR", MAX_CHAR),
                ("VARCHAR", MAX_VARCHAR),
                "CLOB",
            ),
            TypeKind::VarChar => self.varying(spec.size, ("VARCHAR", MAX_VARCHAR), "CLOB"),
            TypeKind::LongVarChar => "CLOB".to_string(),
            TypeKind::NChar => self.character(
                spec.size,
                ("GRAPHIC", MAX_GRAPHIC),
                ("VARGRAPHIC", MAX_VARGRAPHIC),
                "DBCLOB",
            ),
            TypeKind::VarNChar => {
                self.varying(spec.size, ("VARGRAPHIC", MAX_VARGRAPHIC), "DBCLOB")
            }
            TypeKind::LongVarNChar => "DBCLOB".to_string(),
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
                    warnings.push("db2 TIME has no fractional seconds; truncated".to_string());
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
                match ddl::clamp_fraction(spec, 12, &mut warnings) {
                    Some(n) => format!("TIMESTAMP({})", n),
                    None => "TIMESTAMP".to_string(),
                }
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

    fn national_prefix(&self) -> &str {
        "G"
    }

    fn string_literal(&self, spec: &TypeSpec, text: &str) -> Rendered {
        let prefix = if spec.kind.is_national() { "G" } else { "" };
        Rendered::exact(literal::concat_escaped(prefix, text, "||", "chr"))
    }

    fn binary_literal(&self, spec: &TypeSpec, bytes: &[u8]) -> String {
        if spec.kind.is_long() {
            format!("blob(x'{}')", hex::encode(bytes))
        } else {
            format!("x'{}'", hex::encode(bytes))
        }
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("'{}'", format_date(date))
    }

    fn time_literal(&self, value: &DateTime, _digits: u32, _with_zone: bool) -> String {
        format!("'{}'", value.time().format("%H.%M.%S"))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, _with_zone: bool) -> String {
        let text = value.format(digits, false);
        format!("'{}'", text.replacen(' ', "-", 1).replace(':', "."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interval::Interval;
    use crate::core::value::SqlValue;

    fn render(spec: TypeSpec) -> Rendered {
        Db2Generator::new().render_type(&spec)
    }

    #[test]
    fn test_numeric_types() {
        assert_eq!(render(TypeSpec::integer_bits(16)).text, "SMALLINT");
        assert_eq!(render(TypeSpec::integer_bits(64)).text, "BIGINT");

        let r = render(TypeSpec::decimal(Some(40), Some(2)));
        assert_eq!(r.text, "DECIMAL(31,2)");
        assert!(r.is_lossy());

        let r = render(TypeSpec::decimal(None, None));
        assert_eq!(r.text, "DECIMAL");
        assert!(r.is_lossy());
    }

    #[test]
    fn test_oracle_unconstrained_number_becomes_double() {
        let r = render(TypeSpec::float(38, false, -130, 125, false));
        assert_eq!(r.text, "DOUBLE");
    }

    #[test]
    fn test_character_promotion() {
        assert_eq!(render(TypeSpec::sized(TypeKind::Char, Some(10))).text, "CHAR(10)");
        assert_eq!(render(TypeSpec::sized(TypeKind::Char, Some(300))).text, "VARCHAR(300)");
        assert_eq!(render(TypeSpec::sized(TypeKind::VarChar, Some(40000))).text, "CLOB");
        assert_eq!(render(TypeSpec::sized(TypeKind::VarNChar, Some(20))).text, "VARGRAPHIC(20)");
        assert_eq!(
            render(TypeSpec::sized(TypeKind::VarRaw, Some(16))).text,
            "VARCHAR(16) FOR BIT DATA"
        );
    }

    #[test]
    fn test_temporal_drops_zone() {
        let r = render(TypeSpec::temporal(TypeKind::TimestampTz, Some(6)));
        assert_eq!(r.text, "TIMESTAMP(6)");
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_literals() {
        let gen = Db2Generator::new();
        let raw = TypeSpec::sized(TypeKind::Raw, Some(2));
        assert_eq!(
            gen.render_literal(&raw, &SqlValue::from(vec![0xDE, 0xAD])).text,
            "x'dead'"
        );
        let blob = TypeSpec::sized(TypeKind::LongVarRaw, None);
        assert_eq!(
            gen.render_literal(&blob, &SqlValue::from(vec![0x01])).text,
            "blob(x'01')"
        );

        let ts = TypeSpec::temporal(TypeKind::Timestamp, Some(6));
        assert_eq!(
            gen.render_literal(&ts, &SqlValue::from("2024-03-01 10:20:30.123456")).text,
            "'2024-03-01-10.20.30.123456'"
        );
        let time = TypeSpec::temporal(TypeKind::Time, Some(0));
        assert_eq!(
            gen.render_literal(&time, &SqlValue::from("2024-03-01 10:20:30")).text,
            "'10.20.30'"
        );

        let g = TypeSpec::sized(TypeKind::VarNChar, Some(10));
        assert_eq!(
            gen.render_literal(&g, &SqlValue::from("a\nb")).text,
            "G'a' || chr(10) || G'b'"
        );

        let ym = TypeSpec::interval(TypeKind::IntervalYm, Some(2), None);
        assert_eq!(
            gen.render_literal(&ym, &SqlValue::Interval(Interval::from_months(14))).text,
            "14"
        );
    }

    #[test]
    fn test_zoned_value_keeps_wall_clock() {
        let gen = Db2Generator::new();
        let ts = TypeSpec::temporal(TypeKind::TimestampTz, Some(0));
        let r = gen.render_literal(&ts, &SqlValue::from("2024-03-01 10:20:30 +02:00"));
        assert_eq!(r.text, "'2024-03-01-10.20.30'");
        assert!(r.is_lossy());
    }
}
