//! Core traits for dialect-specific translation.
//!
//! - [`Importer`]: vendor column metadata → [`TypeSpec`]
//! - [`ScriptGenerator`]: [`TypeSpec`] / [`SqlValue`] → vendor SQL text
//!
//! # Design Patterns
//!
//! - **Strategy**: one importer and one generator per dialect, looked up in
//!   the [`DialectCatalog`](super::DialectCatalog)
//! - **Template Method**: [`ScriptGenerator::render_literal`] drives the
//!   per-value dispatch and calls small dialect hooks for the parts that
//!   differ between engines

use chrono::NaiveDate;
use serde::Serialize;

use super::datetime::DateTime;
use super::interval::Interval;
use super::typespec::{RawColumn, TypeKind, TypeSpec};
use super::value::SqlValue;
use crate::dialect::literal;

/// Rendered SQL text plus any losses incurred producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<String>,
}

impl Rendered {
    /// Rendering that preserved everything.
    pub fn exact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            warnings: Vec::new(),
        }
    }

    /// Rendering that lost information.
    pub fn lossy(text: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            warnings: vec![warning.into()],
        }
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Append warnings accumulated elsewhere.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn is_lossy(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// What an importer can rely on from its connectivity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Table-listing metadata is trustworthy for this engine.
    pub reports_table_info: bool,
    /// Host value classes must be discovered with a zero-row probe query.
    pub requires_probe: bool,
}

/// Turns a vendor's column metadata into the canonical form.
///
/// Inference is total: names the importer does not recognize fall back to
/// the generic type-code table and finally to `UNKNOWN`.
pub trait Importer: Send + Sync {
    /// Dialect identifier (e.g. "oracle", "postgres").
    fn name(&self) -> &str;

    /// Infer the canonical type of one column.
    fn infer(&self, raw: &RawColumn) -> TypeSpec;

    fn reports_table_info(&self) -> bool {
        true
    }

    fn requires_probe(&self) -> bool {
        false
    }

    /// Zero-row query whose result metadata lists the table's host classes.
    fn probe_sql(&self, table: &str) -> String {
        format!("SELECT * FROM {} WHERE 1 = 2", table)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            reports_table_info: self.reports_table_info(),
            requires_probe: self.requires_probe(),
        }
    }
}

/// Turns canonical types and values into one dialect's SQL text.
///
/// Implementors supply [`render_type`](ScriptGenerator::render_type) and
/// override the literal hooks where their engine deviates from standard
/// SQL. Neither rendering path fails; losses are reported in
/// [`Rendered::warnings`].
pub trait ScriptGenerator: Send + Sync {
    /// Dialect identifier.
    fn name(&self) -> &str;

    /// DDL type clause for a column.
    fn render_type(&self, spec: &TypeSpec) -> Rendered;

    /// Literal for `value` in a column of type `spec`.
    fn render_literal(&self, spec: &TypeSpec, value: &SqlValue<'_>) -> Rendered {
        literal::render(self, spec, value)
    }

    fn null_token(&self) -> &str {
        "NULL"
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Whether values of a zoned kind keep their offset in this dialect.
    fn supports_zone(&self, _kind: TypeKind) -> bool {
        true
    }

    /// Largest fractional-second precision accepted in literals.
    fn max_fraction_digits(&self) -> u32 {
        9
    }

    // ===== Literal hooks =====

    /// Prefix for national character literals (`N`, `G`), empty if none.
    fn national_prefix(&self) -> &str {
        ""
    }

    fn string_literal(&self, spec: &TypeSpec, text: &str) -> Rendered {
        let prefix = if spec.kind.is_national() {
            self.national_prefix()
        } else {
            ""
        };
        Rendered::exact(format!("{}{}", prefix, literal::quote(text)))
    }

    fn binary_literal(&self, _spec: &TypeSpec, bytes: &[u8]) -> String {
        format!("x'{}'", hex::encode(bytes))
    }

    fn bool_literal(&self, _spec: &TypeSpec, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    /// Token for NaN and infinities, if the dialect has one.
    fn non_finite_literal(&self, _value: f64) -> Option<String> {
        None
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("DATE '{}'", DateTime::from_date(date).format_date())
    }

    fn time_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        format!("TIME '{}'", value.format_time(digits, with_zone))
    }

    fn timestamp_literal(&self, value: &DateTime, digits: u32, with_zone: bool) -> String {
        format!("TIMESTAMP '{}'", value.format(digits, with_zone))
    }

    /// Interval literal; engines without interval types use the linearized
    /// integer.
    fn interval_literal(&self, spec: &TypeSpec, value: &Interval) -> Rendered {
        literal::linearized_interval(spec, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Importer for Plain {
        fn name(&self) -> &str {
            "plain"
        }

        fn infer(&self, _raw: &RawColumn) -> TypeSpec {
            TypeSpec::unknown()
        }
    }

    #[test]
    fn test_rendered_lossless() {
        let r = Rendered::exact("bigint");
        assert_eq!(r.text, "bigint");
        assert!(!r.is_lossy());
    }

    #[test]
    fn test_rendered_lossy() {
        let mut r = Rendered::lossy("DECIMAL(31,2)", "precision 40 clamped to 31");
        r.warn("second");
        assert!(r.is_lossy());
        assert_eq!(r.warnings.len(), 2);
        assert_eq!(r.to_string(), "DECIMAL(31,2)");
    }

    #[test]
    fn test_importer_defaults() {
        let imp = Plain;
        assert_eq!(imp.probe_sql("HR.EMP"), "SELECT * FROM HR.EMP WHERE 1 = 2");
        assert_eq!(
            imp.capabilities(),
            Capabilities {
                reports_table_info: true,
                requires_probe: false
            }
        );
    }
}
