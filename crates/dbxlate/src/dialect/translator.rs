//! Hub-and-spoke composition of one importer with one generator.
//!
//! ```text
//! Source dialect  →  TypeSpec  →  Target dialect
//!   NUMBER(10,2)  →  FIXED(10,2)  →  numeric(10,2)
//! ```
//!
//! Adding a dialect takes one importer and one generator instead of a mapper
//! per dialect pair.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::traits::{Importer, Rendered, ScriptGenerator};
use crate::core::typespec::{RawColumn, TypeSpec};
use crate::core::value::SqlValue;

/// One column carried through both halves of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedColumn {
    pub spec: TypeSpec,
    pub ddl: Rendered,
}

/// Importer → canonical → generator pipeline.
///
/// # Example
///
/// ```rust
/// use dbxlate::core::{sql_types, DialectCatalog, RawColumn};
///
/// let catalog = DialectCatalog::with_builtins();
/// let translator = catalog.translator("oracle", "postgres").unwrap();
/// let raw = RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(10).with_scale(2);
/// assert_eq!(translator.translate_column(&raw).ddl.text, "numeric(10,2)");
/// ```
#[derive(Clone)]
pub struct Translator {
    importer: Arc<dyn Importer>,
    generator: Arc<dyn ScriptGenerator>,
}

impl Translator {
    pub fn new(importer: Arc<dyn Importer>, generator: Arc<dyn ScriptGenerator>) -> Self {
        Self {
            importer,
            generator,
        }
    }

    pub fn source_dialect(&self) -> &str {
        self.importer.name()
    }

    pub fn target_dialect(&self) -> &str {
        self.generator.name()
    }

    pub fn importer(&self) -> &Arc<dyn Importer> {
        &self.importer
    }

    pub fn generator(&self) -> &Arc<dyn ScriptGenerator> {
        &self.generator
    }

    /// Infer the canonical type and render the target DDL clause.
    pub fn translate_column(&self, raw: &RawColumn) -> TranslatedColumn {
        let spec = self.importer.infer(raw);
        let ddl = self.generator.render_type(&spec);
        debug!(
            "{} {} -> {} -> {} {}",
            self.source_dialect(),
            raw.clause_representation(),
            spec,
            self.target_dialect(),
            ddl
        );
        for w in &ddl.warnings {
            warn!("{}: {}", raw.clause_representation(), w);
        }
        TranslatedColumn { spec, ddl }
    }

    /// Render a source value as a target literal.
    pub fn translate_value(&self, raw: &RawColumn, value: &SqlValue<'_>) -> Rendered {
        let spec = self.importer.infer(raw);
        self.generator.render_literal(&spec, value)
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("source", &self.importer.name())
            .field("target", &self.generator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::typespec::TypeKind;

    struct MockImporter;
    impl Importer for MockImporter {
        fn name(&self) -> &str {
            "mock_source"
        }

        fn infer(&self, raw: &RawColumn) -> TypeSpec {
            match raw.type_name.to_lowercase().as_str() {
                "int" => TypeSpec::integer_bits(32),
                "geo" => TypeSpec::unknown().native("GEO"),
                _ => TypeSpec::sized(TypeKind::VarChar, raw.size_u32()),
            }
        }
    }

    struct MockGenerator;
    impl ScriptGenerator for MockGenerator {
        fn name(&self) -> &str {
            "mock_target"
        }

        fn render_type(&self, spec: &TypeSpec) -> Rendered {
            match spec.kind {
                TypeKind::Fixed => Rendered::exact("INTEGER"),
                TypeKind::VarChar => Rendered::exact(format!("TEXT({})", spec.size.unwrap_or(0))),
                _ => Rendered::lossy(spec.native_representation.clone(), "Unsupported type"),
            }
        }
    }

    fn translator() -> Translator {
        Translator::new(Arc::new(MockImporter), Arc::new(MockGenerator))
    }

    #[test]
    fn test_translate_column_lossless() {
        let t = translator();
        assert_eq!(t.source_dialect(), "mock_source");
        assert_eq!(t.target_dialect(), "mock_target");

        let col = t.translate_column(&RawColumn::new("int", 4));
        assert_eq!(col.ddl.text, "INTEGER");
        assert!(!col.ddl.is_lossy());
        assert_eq!(col.spec, TypeSpec::integer_bits(32));
    }

    #[test]
    fn test_translate_column_lossy() {
        let col = translator().translate_column(&RawColumn::new("geo", 1111));
        assert_eq!(col.ddl.text, "GEO");
        assert_eq!(col.ddl.warnings, vec!["Unsupported type".to_string()]);
    }

    #[test]
    fn test_translate_value_uses_inferred_kind() {
        let t = translator();
        let raw = RawColumn::new("text", 12).with_size(10);
        let r = t.translate_value(&raw, &SqlValue::from("it's"));
        assert_eq!(r.text, "'it''s'");
        assert_eq!(format!("{:?}", t), "Translator { source: \"mock_source\", target: \"mock_target\" }");
    }
}
