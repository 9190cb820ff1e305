//! Helpers shared by the dialect importers.
//!
//! - [`TypeName`]: a vendor type name split into its base words and its
//!   parenthesized arguments
//! - [`finish`]: fills in the native representation and raw metadata
//! - [`infer_from_java_class`]: inference from the probed host class

use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};

/// A vendor type name in normalized form.
///
/// `"TIMESTAMP(6) WITH LOCAL TIME ZONE"` parses into the base
/// `"timestamp with local time zone"` and the argument list `["6"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// Lowercase words outside any parentheses, single-spaced.
    pub base: String,
    /// Comma-separated arguments of every parenthesized group, in order.
    pub args: Vec<String>,
}

impl TypeName {
    pub fn parse(type_name: &str) -> Self {
        let mut base = String::new();
        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut current = String::new();

        for c in type_name.chars() {
            match c {
                '(' => {
                    depth += 1;
                    base.push(' ');
                }
                ')' if depth > 0 => {
                    depth -= 1;
                    args.push(current.trim().to_lowercase());
                    current.clear();
                }
                ',' if depth > 0 => {
                    args.push(current.trim().to_lowercase());
                    current.clear();
                }
                _ if depth > 0 => current.push(c),
                _ => base.push(c),
            }
        }

        let base = base
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self { base, args }
    }

    /// Numeric argument at `index`.
    pub fn arg(&self, index: usize) -> Option<i32> {
        self.args.get(index).and_then(|a| a.parse().ok())
    }

    /// Non-negative numeric argument at `index`.
    pub fn arg_u32(&self, index: usize) -> Option<u32> {
        self.args.get(index).and_then(|a| a.parse().ok())
    }

    /// Base name with a trailing word removed, if present.
    pub fn strip_suffix(&self, word: &str) -> Option<&str> {
        self.base
            .strip_suffix(word)
            .map(str::trim_end)
            .filter(|rest| !rest.is_empty())
    }
}

/// Size from the type name's first argument, else the reported size.
pub fn size_of(name: &TypeName, raw: &RawColumn) -> Option<u32> {
    name.arg_u32(0).or_else(|| raw.size_u32())
}

/// Scale from the type name's second argument, else the reported scale.
pub fn scale_of(name: &TypeName, raw: &RawColumn) -> Option<i32> {
    name.arg(1).or(raw.scale)
}

/// Attach the native representation (unless the importer set one) and the
/// as-reported metadata.
pub fn finish(spec: TypeSpec, raw: &RawColumn) -> TypeSpec {
    if !spec.native_representation.is_empty() {
        return spec.with_raw(raw);
    }
    let native = native_of(&spec, raw);
    spec.native(native).with_raw(raw)
}

/// Type names whose bare form takes a fractional-seconds argument.
const FRACTIONAL_NAMES: [&str; 11] = [
    "time",
    "timetz",
    "time with time zone",
    "time without time zone",
    "timestamp",
    "timestamptz",
    "timestamp with time zone",
    "timestamp without time zone",
    "timestamp with local time zone",
    "datetime2",
    "datetimeoffset",
];

/// Trailing qualifiers the size clause goes in front of.
const QUALIFIERS: [&str; 5] = [
    " with local time zone",
    " with time zone",
    " without time zone",
    " for bit data",
    " identity",
];

/// `raw`'s type name carrying `args` as its size clause.
///
/// A name that already has arguments is kept as written; empty parentheses
/// (`VARCHAR () FOR BIT DATA`) are filled in. The clause goes before a
/// trailing qualifier, so `timestamp with time zone` becomes
/// `timestamp(3) with time zone`.
pub fn clause_name(raw: &RawColumn, args: Option<String>) -> String {
    let name = raw.type_name.trim();
    let Some(args) = args else {
        return name.to_string();
    };
    if let Some(open) = name.find('(') {
        let rest = &name[open + 1..];
        return match rest.find(')') {
            Some(close) if rest[..close].trim().is_empty() => format!(
                "{}({}){}",
                &name[..open],
                args,
                &rest[close + 1..]
            ),
            _ => name.to_string(),
        };
    }
    if name.contains('[') {
        return name.to_string();
    }
    let lower = name.to_ascii_lowercase();
    for qualifier in QUALIFIERS {
        if lower.ends_with(qualifier) {
            let cut = name.len() - qualifier.len();
            return format!("{}({}){}", &name[..cut], args, &name[cut..]);
        }
    }
    format!("{}({})", name, args)
}

fn native_of(spec: &TypeSpec, raw: &RawColumn) -> String {
    let name = raw.type_name.trim();
    if name.contains('[') {
        return name.to_string();
    }
    let base = TypeName::parse(name).base;
    let args = match spec.kind {
        TypeKind::Unknown => match (raw.size, raw.scale) {
            (Some(size), Some(scale)) => Some(format!("{},{}", size, scale)),
            (Some(size), None) => Some(size.to_string()),
            _ => None,
        },
        TypeKind::Fixed if spec.size_in_bits => spec
            .size
            .filter(|bits| *bits > 1 && base == "bit")
            .map(|bits| bits.to_string()),
        TypeKind::Fixed => spec.size.map(|size| match spec.scale {
            Some(scale) => format!("{},{}", size, scale),
            None => size.to_string(),
        }),
        TypeKind::Float if base == "float" => {
            raw.size_u32().filter(|bits| *bits > 0).map(|bits| bits.to_string())
        }
        TypeKind::Time | TypeKind::TimeTz | TypeKind::Timestamp | TypeKind::TimestampTz
            if raw.scale.is_some() && FRACTIONAL_NAMES.contains(&base.as_str()) =>
        {
            spec.size.map(|digits| digits.to_string())
        }
        k if (k.is_character() || k.is_binary()) && !k.is_long() => {
            spec.size.map(|size| size.to_string())
        }
        _ => None,
    };
    clause_name(raw, args)
}

/// UNKNOWN carrying the raw name and its reported clause.
pub fn unknown(raw: &RawColumn) -> TypeSpec {
    TypeSpec::unknown().native(raw.clause_representation())
}

/// Inference from the host value class a probe reported.
///
/// Covers the classes Oracle and PostgreSQL drivers hand out for types the
/// catalog names ambiguously.
pub fn infer_from_java_class(raw: &RawColumn) -> Option<TypeSpec> {
    let class = raw.java_class.as_deref()?;
    let spec = match class {
        "java.lang.String" => TypeSpec::sized(TypeKind::LongVarChar, None),
        "java.lang.Boolean" => TypeSpec::integer_bits(1),
        "java.lang.Short" => TypeSpec::integer_bits(16),
        "java.lang.Integer" => TypeSpec::integer_bits(32),
        "java.lang.Long" => TypeSpec::integer_bits(64),
        "java.math.BigDecimal" => TypeSpec::decimal(None, None),
        "java.lang.Float" => TypeSpec::ieee_single(),
        "java.lang.Double" => TypeSpec::ieee_double(),
        "java.sql.Date" => TypeSpec::temporal(TypeKind::Date, None),
        "java.sql.Time" => TypeSpec::temporal(TypeKind::Time, None),
        "java.sql.Timestamp" => TypeSpec::temporal(TypeKind::Timestamp, raw.size_u32()),
        "[B" => TypeSpec::sized(TypeKind::LongVarRaw, None),
        "oracle.sql.TIMESTAMPTZ" | "oracle.sql.TIMESTAMPLTZ" => {
            TypeSpec::temporal(TypeKind::TimestampTz, Some(6))
        }
        "oracle.sql.INTERVALYM" => TypeSpec::interval(TypeKind::IntervalYm, Some(2), None),
        "oracle.sql.INTERVALDS" => TypeSpec::interval(TypeKind::IntervalDs, Some(2), Some(6)),
        "oracle.sql.BLOB" | "java.sql.Blob" => TypeSpec::sized(TypeKind::LongVarRaw, None),
        "oracle.sql.CLOB" | "java.sql.Clob" => TypeSpec::sized(TypeKind::LongVarChar, None),
        "oracle.sql.NCLOB" | "java.sql.NClob" => TypeSpec::sized(TypeKind::LongVarNChar, None),
        "org.postgresql.util.PGInterval" => {
            TypeSpec::interval(TypeKind::IntervalYs, None, Some(6))
        }
        _ => return None,
    };
    Some(spec)
}
