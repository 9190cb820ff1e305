//! Canonical (vendor-neutral) column type description.
//!
//! A [`TypeSpec`] is what importers produce and generators consume. It keeps
//! the magnitude of a type together with the *unit* it was reported in, so
//! that a DB2 `SMALLINT` (16 bits) and an Oracle `NUMBER(5)` (5 digits) can
//! both be carried without first forcing one of them through a lossy
//! conversion.
//!
//! # Field relevance
//!
//! | kind                       | size                  | scale | fraction | exponents |
//! |----------------------------|-----------------------|-------|----------|-----------|
//! | `Fixed`                    | digits or bits        | yes   |          |           |
//! | `Float`                    | mantissa digits/bits  |       |          | yes       |
//! | character kinds            | characters            |       |          |           |
//! | binary kinds               | bytes                 |       |          |           |
//! | `Time*`, `Timestamp*`      | fractional digits     |       |          |           |
//! | `IntervalYm`               | year digits           |       |          |           |
//! | `IntervalDs`, `IntervalYs` | day / year digits     |       | yes      |           |
//!
//! Fields that do not apply to a kind are `None`. Generators branch on that
//! to decide whether to print a parenthesized clause, so the constructors
//! below never fill them with defaults.

use serde::{Deserialize, Serialize};

use super::precision;

/// Leading-field digits assumed for intervals whose source did not report one.
pub const DEFAULT_INTERVAL_LEADING: u32 = 9;

/// Closed set of canonical type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    #[serde(rename = "FIXED")]
    Fixed,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "CHAR")]
    Char,
    #[serde(rename = "NCHAR")]
    NChar,
    #[serde(rename = "VARCHAR")]
    VarChar,
    #[serde(rename = "VARNCHAR")]
    VarNChar,
    #[serde(rename = "LONGVARCHAR")]
    LongVarChar,
    #[serde(rename = "LONGVARNCHAR")]
    LongVarNChar,
    #[serde(rename = "RAW")]
    Raw,
    #[serde(rename = "VARRAW")]
    VarRaw,
    #[serde(rename = "LONGVARRAW")]
    LongVarRaw,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "TIME")]
    Time,
    #[serde(rename = "TIME_TZ")]
    TimeTz,
    #[serde(rename = "TIMESTAMP")]
    Timestamp,
    #[serde(rename = "TIMESTAMP_TZ")]
    TimestampTz,
    #[serde(rename = "INTERVAL_YM")]
    IntervalYm,
    #[serde(rename = "INTERVAL_DS")]
    IntervalDs,
    #[serde(rename = "INTERVAL_YS")]
    IntervalYs,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl TypeKind {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Fixed => "FIXED",
            TypeKind::Float => "FLOAT",
            TypeKind::Char => "CHAR",
            TypeKind::NChar => "NCHAR",
            TypeKind::VarChar => "VARCHAR",
            TypeKind::VarNChar => "VARNCHAR",
            TypeKind::LongVarChar => "LONGVARCHAR",
            TypeKind::LongVarNChar => "LONGVARNCHAR",
            TypeKind::Raw => "RAW",
            TypeKind::VarRaw => "VARRAW",
            TypeKind::LongVarRaw => "LONGVARRAW",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::TimeTz => "TIME_TZ",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::TimestampTz => "TIMESTAMP_TZ",
            TypeKind::IntervalYm => "INTERVAL_YM",
            TypeKind::IntervalDs => "INTERVAL_DS",
            TypeKind::IntervalYs => "INTERVAL_YS",
            TypeKind::Unknown => "UNKNOWN",
        }
    }

    /// Character kinds, national or not.
    pub fn is_character(&self) -> bool {
        matches!(
            self,
            TypeKind::Char
                | TypeKind::NChar
                | TypeKind::VarChar
                | TypeKind::VarNChar
                | TypeKind::LongVarChar
                | TypeKind::LongVarNChar
        )
    }

    /// National character kinds.
    pub fn is_national(&self) -> bool {
        matches!(
            self,
            TypeKind::NChar | TypeKind::VarNChar | TypeKind::LongVarNChar
        )
    }

    /// Binary kinds.
    pub fn is_binary(&self) -> bool {
        matches!(self, TypeKind::Raw | TypeKind::VarRaw | TypeKind::LongVarRaw)
    }

    /// Unbounded ("LOB") kinds.
    pub fn is_long(&self) -> bool {
        matches!(
            self,
            TypeKind::LongVarChar | TypeKind::LongVarNChar | TypeKind::LongVarRaw
        )
    }

    /// Date, time and timestamp kinds.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            TypeKind::Date
                | TypeKind::Time
                | TypeKind::TimeTz
                | TypeKind::Timestamp
                | TypeKind::TimestampTz
        )
    }

    /// Kinds carrying a zone offset.
    pub fn is_zoned(&self) -> bool {
        matches!(self, TypeKind::TimeTz | TypeKind::TimestampTz)
    }

    pub fn is_interval(&self) -> bool {
        matches!(
            self,
            TypeKind::IntervalYm | TypeKind::IntervalDs | TypeKind::IntervalYs
        )
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column metadata exactly as the connectivity layer reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Vendor type name (e.g. "NUMBER", "int identity", "DATETIME[YY:MS]").
    pub type_name: String,

    /// Reported precision/length, if any.
    #[serde(default)]
    pub size: Option<i32>,

    /// Reported scale, if any.
    #[serde(default)]
    pub scale: Option<i32>,

    /// Generic SQL type code (see [`sql_types`](super::sql_types)).
    #[serde(default)]
    pub sql_type: i32,

    /// Host value class name, when known.
    #[serde(default)]
    pub java_class: Option<String>,
}

impl RawColumn {
    /// Create raw metadata for a type name and generic type code.
    pub fn new(type_name: impl Into<String>, sql_type: i32) -> Self {
        Self {
            type_name: type_name.into(),
            sql_type,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_java_class(mut self, class: impl Into<String>) -> Self {
        self.java_class = Some(class.into());
        self
    }

    /// Type name followed by the reported `(size[,scale])` clause.
    pub fn clause_representation(&self) -> String {
        match (self.size, self.scale) {
            (Some(size), Some(scale)) => format!("{}({},{})", self.type_name, size, scale),
            (Some(size), None) => format!("{}({})", self.type_name, size),
            _ => self.type_name.clone(),
        }
    }

    /// Reported size as a non-negative magnitude.
    pub fn size_u32(&self) -> Option<u32> {
        self.size.and_then(|s| u32::try_from(s).ok())
    }
}

/// Canonical type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub kind: TypeKind,

    pub size: Option<u32>,
    pub size_in_bits: bool,

    pub scale: Option<i32>,
    pub scale_in_bits: bool,

    /// Fractional-second digits of day-time and year-second intervals.
    pub fraction: Option<u32>,

    pub min_exp: Option<i32>,
    pub max_exp: Option<i32>,
    pub exp_of_2: bool,

    /// How the type reads in its own dialect, e.g. `NUMBER(10,2)`.
    pub native_representation: String,

    /// Set for engine-native auto-updating timestamp columns (MySQL).
    #[serde(default)]
    pub is_auto_timestamp: bool,

    /// As-reported metadata.
    #[serde(default)]
    pub jdbc: RawColumn,
}

impl TypeSpec {
    fn bare(kind: TypeKind) -> Self {
        Self {
            kind,
            size: None,
            size_in_bits: false,
            scale: None,
            scale_in_bits: false,
            fraction: None,
            min_exp: None,
            max_exp: None,
            exp_of_2: false,
            native_representation: String::new(),
            is_auto_timestamp: false,
            jdbc: RawColumn::default(),
        }
    }

    /// Exact numeric type.
    pub fn fixed(size: Option<u32>, size_in_bits: bool, scale: Option<i32>, scale_in_bits: bool) -> Self {
        Self {
            size,
            size_in_bits,
            scale,
            scale_in_bits,
            ..Self::bare(TypeKind::Fixed)
        }
    }

    /// Bit-denominated integer with zero scale.
    pub fn integer_bits(bits: u32) -> Self {
        Self::fixed(Some(bits), true, Some(0), false)
    }

    /// Digit-denominated decimal; `None` precision means unconstrained.
    pub fn decimal(precision: Option<u32>, scale: Option<i32>) -> Self {
        Self::fixed(precision, false, scale, false)
    }

    /// Approximate numeric type.
    pub fn float(size: u32, size_in_bits: bool, min_exp: i32, max_exp: i32, exp_of_2: bool) -> Self {
        Self {
            size: Some(size),
            size_in_bits,
            min_exp: Some(min_exp),
            max_exp: Some(max_exp),
            exp_of_2,
            ..Self::bare(TypeKind::Float)
        }
    }

    /// IEEE 754 single precision.
    pub fn ieee_single() -> Self {
        Self::float(24, true, -126, 127, true)
    }

    /// IEEE 754 double precision.
    pub fn ieee_double() -> Self {
        Self::float(53, true, -1022, 1023, true)
    }

    /// Character or binary kind with an optional length.
    pub fn sized(kind: TypeKind, size: Option<u32>) -> Self {
        debug_assert!(kind.is_character() || kind.is_binary());
        Self {
            size,
            ..Self::bare(kind)
        }
    }

    /// Date/time kind; `fraction_digits` is ignored for `Date`.
    pub fn temporal(kind: TypeKind, fraction_digits: Option<u32>) -> Self {
        debug_assert!(kind.is_temporal());
        let size = if kind == TypeKind::Date {
            None
        } else {
            fraction_digits
        };
        Self {
            size,
            ..Self::bare(kind)
        }
    }

    /// Interval kind with leading-field and fractional-second digits.
    pub fn interval(kind: TypeKind, leading: Option<u32>, fraction: Option<u32>) -> Self {
        debug_assert!(kind.is_interval());
        let fraction = if kind == TypeKind::IntervalYm {
            None
        } else {
            fraction
        };
        Self {
            size: leading,
            fraction,
            ..Self::bare(kind)
        }
    }

    /// Unrecognized vendor type.
    pub fn unknown() -> Self {
        Self::bare(TypeKind::Unknown)
    }

    /// Attach the native representation.
    pub fn native(mut self, representation: impl Into<String>) -> Self {
        self.native_representation = representation.into();
        self
    }

    /// Attach the as-reported metadata.
    pub fn with_raw(mut self, raw: &RawColumn) -> Self {
        self.jdbc = raw.clone();
        self
    }

    /// Mark as an engine-native auto-updating timestamp.
    pub fn auto_timestamp(mut self) -> Self {
        self.is_auto_timestamp = true;
        self
    }

    /// Size in bits, converting from digits if necessary.
    pub fn size_bits(&self) -> Option<u32> {
        self.size.map(|s| precision::as_bits(s, self.size_in_bits))
    }

    /// Size in decimal digits, converting from bits if necessary.
    pub fn size_digits(&self) -> Option<u32> {
        self.size.map(|s| precision::as_digits(s, self.size_in_bits))
    }

    /// Scale in decimal digits. Always `None` for non-`Fixed` kinds.
    pub fn scale_digits(&self) -> Option<i32> {
        if self.kind != TypeKind::Fixed {
            return None;
        }
        self.scale
            .map(|s| precision::scale_as_digits(s, self.scale_in_bits))
    }

    /// True for bit-denominated integers, which map onto integer ladders.
    pub fn is_binary_integer(&self) -> bool {
        self.kind == TypeKind::Fixed
            && self.size.is_some()
            && self.size_in_bits
            && self.scale.unwrap_or(0) == 0
    }

    /// Exponent range in base 2, if this is a float.
    pub fn exponents_base2(&self) -> Option<(i32, i32)> {
        match (self.min_exp, self.max_exp) {
            (Some(min), Some(max)) => Some(precision::exponents_as_base2(min, max, self.exp_of_2)),
            _ => None,
        }
    }

    /// Exponent range in base 10, if this is a float.
    pub fn exponents_base10(&self) -> Option<(i32, i32)> {
        match (self.min_exp, self.max_exp) {
            (Some(min), Some(max)) => {
                Some(precision::exponents_as_base10(min, max, self.exp_of_2))
            }
            _ => None,
        }
    }

    /// Numeric stand-in for an interval on engines without interval types.
    ///
    /// Year-month intervals linearize to months, day-second intervals to
    /// nanoseconds and year-second intervals to total nanoseconds. The digit
    /// count is sized to the leading-field precision.
    pub fn linearized_interval(&self) -> Option<TypeSpec> {
        let leading = self.size.unwrap_or(DEFAULT_INTERVAL_LEADING);
        let digits = match self.kind {
            TypeKind::IntervalYm => leading + 2,
            TypeKind::IntervalDs => leading + 14,
            TypeKind::IntervalYs => leading + 17,
            _ => return None,
        };
        Some(TypeSpec::decimal(Some(digits), Some(0)).native(format!("DECIMAL({},0)", digits)))
    }
}

impl std::fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        match self.kind {
            TypeKind::Fixed => {
                if let Some(size) = self.size {
                    let unit = if self.size_in_bits { " bits" } else { "" };
                    write!(f, "({}{}", size, unit)?;
                    if let Some(scale) = self.scale {
                        let unit = if self.scale_in_bits { " bits" } else { "" };
                        write!(f, ",{}{}", scale, unit)?;
                    }
                    write!(f, ")")?;
                }
            }
            TypeKind::Float => {
                if let Some(size) = self.size {
                    let unit = if self.size_in_bits { " bits" } else { "" };
                    write!(f, "({}{}", size, unit)?;
                    if let (Some(min), Some(max)) = (self.min_exp, self.max_exp) {
                        let base = if self.exp_of_2 { 2 } else { 10 };
                        write!(f, ", {}^[{},{}]", base, min, max)?;
                    }
                    write!(f, ")")?;
                }
            }
            TypeKind::IntervalDs | TypeKind::IntervalYs => match (self.size, self.fraction) {
                (Some(l), Some(fr)) => write!(f, "({},{})", l, fr)?,
                (Some(l), None) => write!(f, "({})", l)?,
                (None, Some(fr)) => write!(f, "(,{})", fr)?,
                (None, None) => {}
            },
            TypeKind::Unknown => write!(f, "[{}]", self.native_representation)?,
            _ => {
                if let Some(size) = self.size {
                    write!(f, "({})", size)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sql_types;

    #[test]
    fn test_constructors_leave_irrelevant_fields_empty() {
        let spec = TypeSpec::sized(TypeKind::VarChar, Some(40));
        assert_eq!(spec.size, Some(40));
        assert!(spec.scale.is_none());
        assert!(spec.min_exp.is_none());
        assert!(spec.fraction.is_none());

        let spec = TypeSpec::temporal(TypeKind::Date, Some(6));
        assert!(spec.size.is_none());

        let spec = TypeSpec::interval(TypeKind::IntervalYm, Some(2), Some(6));
        assert_eq!(spec.size, Some(2));
        assert!(spec.fraction.is_none());

        let spec = TypeSpec::ieee_double();
        assert!(spec.scale.is_none());
        assert_eq!(spec.exponents_base2(), Some((-1022, 1023)));
    }

    #[test]
    fn test_unit_views() {
        let small = TypeSpec::integer_bits(16);
        assert_eq!(small.size_digits(), Some(5));
        assert_eq!(small.scale_digits(), Some(0));
        assert!(small.is_binary_integer());

        let dec = TypeSpec::decimal(Some(10), Some(2));
        assert_eq!(dec.size_bits(), Some(34));
        assert!(!dec.is_binary_integer());

        let oracle_number = TypeSpec::float(38, false, -130, 125, false);
        assert_eq!(oracle_number.size_bits(), Some(127));
        assert_eq!(oracle_number.exponents_base2(), Some((-432, 416)));
        assert_eq!(oracle_number.scale_digits(), None);
    }

    #[test]
    fn test_raw_clause_representation() {
        let raw = RawColumn::new("GEOMETRY", sql_types::OTHER)
            .with_size(10)
            .with_scale(2);
        assert_eq!(raw.clause_representation(), "GEOMETRY(10,2)");
        assert_eq!(
            RawColumn::new("xml", sql_types::SQLXML).clause_representation(),
            "xml"
        );
    }

    #[test]
    fn test_linearized_interval_digits() {
        let ym = TypeSpec::interval(TypeKind::IntervalYm, Some(2), None);
        assert_eq!(ym.linearized_interval().unwrap().size, Some(4));

        let ds = TypeSpec::interval(TypeKind::IntervalDs, Some(2), Some(6));
        assert_eq!(ds.linearized_interval().unwrap().size, Some(16));

        let ys = TypeSpec::interval(TypeKind::IntervalYs, None, None);
        assert_eq!(ys.linearized_interval().unwrap().size, Some(26));

        assert!(TypeSpec::integer_bits(8).linearized_interval().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeSpec::integer_bits(16).to_string(), "FIXED(16 bits,0)");
        assert_eq!(
            TypeSpec::float(38, false, -130, 125, false).to_string(),
            "FLOAT(38, 10^[-130,125])"
        );
        assert_eq!(
            TypeSpec::unknown().native("GEOMETRY").to_string(),
            "UNKNOWN[GEOMETRY]"
        );
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&TypeKind::TimestampTz).unwrap();
        assert_eq!(json, "\"TIMESTAMP_TZ\"");
        let kind: TypeKind = serde_json::from_str("\"VARNCHAR\"").unwrap();
        assert_eq!(kind, TypeKind::VarNChar);
    }
}
