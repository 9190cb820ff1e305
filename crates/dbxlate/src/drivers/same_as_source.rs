//! Identity generator: emits each column's native type unchanged.
//!
//! Used when source and target are the same engine, where re-deriving the
//! type through the canonical form could only lose detail.

use crate::core::interval::Interval;
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::typespec::{TypeKind, TypeSpec};
use crate::core::value::SqlValue;
use crate::drivers::generic::GenericGenerator;

/// Generator that reproduces the source's native type text.
#[derive(Debug, Clone, Default)]
pub struct SameAsSourceGenerator {
    literals: GenericGenerator,
}

impl SameAsSourceGenerator {
    /// Create a new identity generator.
    pub fn new() -> Self {
        Self {
            literals: GenericGenerator::new(),
        }
    }
}

impl ScriptGenerator for SameAsSourceGenerator {
    fn name(&self) -> &str {
        "same_as_source"
    }

    fn render_type(&self, spec: &TypeSpec) -> Rendered {
        if spec.native_representation.is_empty() {
            // Built by hand rather than imported; nothing to reproduce.
            return Rendered::lossy(
                spec.kind.as_str(),
                format!("{} has no native representation; kind name used", spec),
            );
        }
        Rendered::exact(spec.native_representation.clone())
    }

    fn render_literal(&self, spec: &TypeSpec, value: &SqlValue<'_>) -> Rendered {
        self.literals.render_literal(spec, value)
    }

    fn quote_ident(&self, name: &str) -> String {
        self.literals.quote_ident(name)
    }

    fn supports_zone(&self, kind: TypeKind) -> bool {
        self.literals.supports_zone(kind)
    }

    fn interval_literal(&self, spec: &TypeSpec, value: &Interval) -> Rendered {
        self.literals.interval_literal(spec, value)
    }
}
