//! Type-clause building blocks shared by the script generators.
//!
//! Each helper works in the unit the target wants and appends a warning to
//! the caller's list whenever it has to clamp.

use tracing::debug;

use crate::core::precision;
use crate::core::traits::Rendered;
use crate::core::typespec::TypeSpec;

/// Decimal precision limits of one engine.
#[derive(Debug, Clone, Copy)]
pub struct DecimalLimits {
    pub max_precision: u32,
    pub max_scale: u32,
    /// Engine accepts `scale < 0` (Oracle).
    pub negative_scale: bool,
}

/// Precision and scale of a FIXED spec in decimal digits, clamped to
/// `limits`. `None` when the type is unconstrained.
pub fn decimal_clause(
    spec: &TypeSpec,
    limits: DecimalLimits,
    warnings: &mut Vec<String>,
) -> Option<(u32, i32)> {
    let mut p = spec.size_digits()?;
    let mut s = spec.scale_digits().unwrap_or(0);

    if s < 0 && !limits.negative_scale {
        // 123 * 10^k needs k more integer digits once the scale is zero
        p = p.saturating_add(s.unsigned_abs());
        s = 0;
    }
    if p == 0 {
        p = 1;
    }
    if p > limits.max_precision {
        warnings.push(format!(
            "precision {} exceeds maximum {}; clamped",
            p, limits.max_precision
        ));
        p = limits.max_precision;
    }
    let max_scale = limits.max_scale.min(p) as i32;
    if s > max_scale {
        warnings.push(format!("scale {} exceeds maximum {}; clamped", s, max_scale));
        s = max_scale;
    }
    Some((p, s))
}

/// `NAME(p,s)`, `NAME(p)` when the scale is zero and `omit_zero_scale`, or
/// bare `NAME` when unconstrained.
pub fn decimal_type(
    name: &str,
    spec: &TypeSpec,
    limits: DecimalLimits,
    omit_zero_scale: bool,
) -> Rendered {
    let mut warnings = Vec::new();
    let text = match decimal_clause(spec, limits, &mut warnings) {
        Some((p, 0)) if omit_zero_scale => format!("{}({})", name, p),
        Some((p, s)) => format!("{}({},{})", name, p, s),
        None => name.to_string(),
    };
    Rendered::exact(text).with_warnings(warnings)
}

/// Smallest rung of an integer ladder wide enough for `bits`.
///
/// Ladder rungs are `(bits, type name)` in ascending order.
pub fn integer_rung<'a>(bits: u32, ladder: &[(u32, &'a str)]) -> Option<&'a str> {
    ladder
        .iter()
        .find(|(width, _)| bits <= *width)
        .map(|(_, name)| *name)
}

/// Single or double precision by mantissa width, with range checks.
///
/// `exponents` is the base-2 exponent range of the double type.
pub fn float_type(
    spec: &TypeSpec,
    single: &str,
    double: &str,
    exponents: (i32, i32),
) -> Rendered {
    let bits = spec.size_bits().unwrap_or(53);
    let mut out = if bits <= 24 {
        Rendered::exact(single)
    } else {
        Rendered::exact(double)
    };
    if bits > 53 {
        out.warn(format!(
            "{}-bit mantissa exceeds double precision; rounded",
            bits
        ));
    }
    if let Some((min, max)) = spec.exponents_base2() {
        if min < exponents.0 || max > exponents.1 {
            out.warn(format!(
                "exponent range 2^[{},{}] exceeds 2^[{},{}]",
                min, max, exponents.0, exponents.1
            ));
        }
    }
    out
}

/// IEEE double exponent range.
pub const IEEE_DOUBLE_EXPONENTS: (i32, i32) = (-1022, 1023);

/// Clamp a length to the engine maximum.
pub fn clamp_length(size: u32, max: u32, what: &str, warnings: &mut Vec<String>) -> u32 {
    if size > max {
        warnings.push(format!("{} length {} exceeds maximum {}; clamped", what, size, max));
        max
    } else {
        size
    }
}

/// `NAME(n)` with clamping, or bare `NAME` when the type has no size.
pub fn sized_type(name: &str, spec: &TypeSpec, max: u32) -> Rendered {
    match spec.size {
        Some(size) => {
            let mut warnings = Vec::new();
            let n = clamp_length(size.max(1), max, name, &mut warnings);
            Rendered::exact(format!("{}({})", name, n)).with_warnings(warnings)
        }
        None => Rendered::exact(name),
    }
}

/// Fractional-second digits clamped to the engine maximum.
pub fn clamp_fraction(spec: &TypeSpec, max: u32, warnings: &mut Vec<String>) -> Option<u32> {
    spec.size.map(|digits| {
        if digits > max {
            warnings.push(format!(
                "fractional seconds {} exceed maximum {}; truncated",
                digits, max
            ));
            max
        } else {
            digits
        }
    })
}

/// Warning for a zone-aware column on an engine without zone types.
pub fn zone_dropped(dialect: &str, spec: &TypeSpec) -> String {
    format!("{} has no {} type; time zone dropped", dialect, spec.kind)
}

/// Native representation verbatim for kinds the target cannot express.
pub fn passthrough(dialect: &str, spec: &TypeSpec) -> Rendered {
    debug!("Passing through unknown type '{}' to {}", spec.native_representation, dialect);
    Rendered::lossy(
        spec.native_representation.clone(),
        format!(
            "unknown type '{}' passed through unchanged to {}",
            spec.native_representation, dialect
        ),
    )
}

/// Numeric stand-in for an interval on engines without interval types.
pub fn linearized_interval_type(
    dialect: &str,
    spec: &TypeSpec,
    render_fixed: impl Fn(&TypeSpec) -> Rendered,
) -> Rendered {
    match spec.linearized_interval() {
        Some(numeric) => render_fixed(&numeric).with_warnings(vec![format!(
            "{} has no {} type; stored as a number",
            dialect, spec.kind
        )]),
        None => passthrough(dialect, spec),
    }
}

/// Digits needed to hold a FLOAT's mantissa as a DECIMAL.
pub fn float_as_digits(spec: &TypeSpec) -> u32 {
    spec.size
        .map(|s| precision::as_digits(s, spec.size_in_bits))
        .unwrap_or(38)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: DecimalLimits = DecimalLimits {
        max_precision: 31,
        max_scale: 31,
        negative_scale: false,
    };

    #[test]
    fn test_decimal_clause_converts_bits() {
        let mut w = Vec::new();
        let spec = TypeSpec::integer_bits(64);
        assert_eq!(decimal_clause(&spec, LIMITS, &mut w), Some((20, 0)));
        assert!(w.is_empty());
    }

    #[test]
    fn test_decimal_clause_clamps_with_warning() {
        let mut w = Vec::new();
        let spec = TypeSpec::decimal(Some(40), Some(35));
        assert_eq!(decimal_clause(&spec, LIMITS, &mut w), Some((31, 31)));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_negative_scale_folds_into_precision() {
        let mut w = Vec::new();
        let spec = TypeSpec::decimal(Some(5), Some(-3));
        assert_eq!(decimal_clause(&spec, LIMITS, &mut w), Some((8, 0)));

        let oracle = DecimalLimits {
            max_precision: 38,
            max_scale: 127,
            negative_scale: true,
        };
        assert_eq!(decimal_clause(&spec, oracle, &mut w), Some((5, -3)));
    }

    #[test]
    fn test_unconstrained_decimal() {
        let spec = TypeSpec::decimal(None, None);
        assert_eq!(decimal_type("NUMERIC", &spec, LIMITS, false).text, "NUMERIC");
    }

    #[test]
    fn test_integer_rung() {
        let ladder = [(16, "SMALLINT"), (32, "INTEGER"), (64, "BIGINT")];
        assert_eq!(integer_rung(1, &ladder), Some("SMALLINT"));
        assert_eq!(integer_rung(33, &ladder), Some("BIGINT"));
        assert_eq!(integer_rung(65, &ladder), None);
    }

    #[test]
    fn test_float_type_selection() {
        let r = float_type(&TypeSpec::ieee_single(), "REAL", "DOUBLE", IEEE_DOUBLE_EXPONENTS);
        assert_eq!(r, Rendered::exact("REAL"));

        let oracle_number = TypeSpec::float(38, false, -130, 125, false);
        let r = float_type(&oracle_number, "REAL", "DOUBLE", IEEE_DOUBLE_EXPONENTS);
        assert_eq!(r.text, "DOUBLE");
        assert!(r.is_lossy());
    }

    #[test]
    fn test_sized_type_clamps() {
        let spec = TypeSpec::sized(crate::core::TypeKind::VarChar, Some(5000));
        let r = sized_type("VARCHAR2", &spec, 4000);
        assert_eq!(r.text, "VARCHAR2(4000)");
        assert!(r.is_lossy());
    }
}
