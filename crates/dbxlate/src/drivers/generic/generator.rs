//! Standard SQL script generator.

use crate::core::interval::Interval;
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::dialect::ddl::{self, DecimalLimits};
use crate::dialect::literal;

const LIMITS: DecimalLimits = DecimalLimits {
    max_precision: 38,
    max_scale: 38,
    negative_scale: false,
};

const INTEGERS: &[(u32, &str)] = &[(16, "SMALLINT"), (32, "INTEGER"), (64, "BIGINT")];

/// Standard SQL generator.
#[derive(Debug, Clone, Default)]
pub struct GenericGenerator;

impl GenericGenerator {
    /// Create a new generic generator.
    pub fn new() -> Self {
        Self
    }

    fn fixed(&self, spec: &TypeSpec) -> Rendered {
        if spec.is_binary_integer() {
            if let Some(name) = ddl::integer_rung(spec.size.unwrap_or(0), INTEGERS) {
                return Rendered::exact(name);
            }
        }
        ddl::decimal_type("DECIMAL", spec, LIMITS, false)
    }
}

fn with_fraction(name: &str, digits: Option<u32>, suffix: &str) -> String {
    match digits {
        Some(d) => format!("{}({}){}", name, d, suffix),
        None => format!("{}{}", name, suffix),
    }
}

impl ScriptGenerator for GenericGenerator {
    fn name(&self) -> &str {
        "generic"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        let mut warnings = Vec::new();
        let out = match spec.kind {
            TypeKind::Fixed => return self.fixed(spec),
            TypeKind::Float => {
                return ddl::float_type(spec, "REAL", "DOUBLE PRECISION", ddl::IEEE_DOUBLE_EXPONENTS)
            }
            TypeKind::Char => return ddl::sized_type("CHAR", spec, u32::MAX),
            TypeKind::NChar => return ddl::sized_type("NCHAR", spec, u32::MAX),
            TypeKind::VarChar if spec.size.is_some() => {
                return ddl::sized_type("VARCHAR", spec, u32::MAX)
            }
            TypeKind::VarNChar if spec.size.is_some() => {
                return ddl::sized_type("NVARCHAR", spec, u32::MAX)
            }
            TypeKind::VarChar | TypeKind::LongVarChar => "CLOB".to_string(),
            TypeKind::VarNChar | TypeKind::LongVarNChar => "NCLOB".to_string(),
            TypeKind::Raw => return ddl::sized_type("BINARY", spec, u32::MAX),
            TypeKind::VarRaw if spec.size.is_some() => {
                return ddl::sized_type("VARBINARY", spec, u32::MAX)
            }
            TypeKind::VarRaw | TypeKind::LongVarRaw => "BLOB".to_string(),
            TypeKind::Date => "DATE".to_string(),
            TypeKind::Time => with_fraction("TIME", ddl::clamp_fraction(spec, 9, &mut warnings), ""),
            TypeKind::TimeTz => with_fraction(
                "TIME",
                ddl::clamp_fraction(spec, 9, &mut warnings),
                " WITH TIME ZONE",
            ),
            TypeKind::Timestamp => {
                with_fraction("TIMESTAMP", ddl::clamp_fraction(spec, 9, &mut warnings), "")
            }
            TypeKind::TimestampTz => with_fraction(
                "TIMESTAMP",
                ddl::clamp_fraction(spec, 9, &mut warnings),
                " WITH TIME ZONE",
            ),
            TypeKind::IntervalYm => {
                format!("INTERVAL YEAR({}) TO MONTH", spec.size.unwrap_or(2))
            }
            TypeKind::IntervalDs => format!(
                "INTERVAL DAY({}) TO SECOND({})",
                spec.size.unwrap_or(2),
                spec.fraction.unwrap_or(6)
            ),
            TypeKind::IntervalYs => {
                return ddl::linearized_interval_type(self.name(), spec, |n| self.fixed(n))
            }
            TypeKind::Unknown => return ddl::passthrough(self.name(), spec),
        };
        Rendered::exact(out).with_warnings(warnings)
    }

    fn interval_literal(&self, spec: &TypeSpec, value: &Interval) -> Rendered {
        literal::ansi_interval(spec, value)
            .unwrap_or_else(|| literal::linearized_interval(spec, value))
    }
}
