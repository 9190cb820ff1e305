//! Derby column metadata → canonical types.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// Apache Derby importer.
#[derive(Debug, Clone, Default)]
pub struct DerbyImporter;

impl DerbyImporter {
    /// Create a new Derby importer.
    pub fn new() -> Self {
        Self
    }
}

impl Importer for DerbyImporter {
    fn name(&self) -> &str {
        "derby"
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let name = TypeName::parse(&raw.type_name);
        let size = common::size_of(&name, raw);

        let spec = match name.base.as_str() {
            "smallint" => TypeSpec::integer_bits(16),
            "integer" | "int" => TypeSpec::integer_bits(32),
            "bigint" => TypeSpec::integer_bits(64),
            "decimal" | "numeric" | "dec" => TypeSpec::decimal(
                Some(size.filter(|p| *p > 0).unwrap_or(5)),
                Some(common::scale_of(&name, raw).unwrap_or(0)),
            ),
            "real" => TypeSpec::ieee_single(),
            "double" | "double precision" => TypeSpec::ieee_double(),
            "float" => match size {
                Some(bits) if bits <= 23 => TypeSpec::ieee_single(),
                _ => TypeSpec::ieee_double(),
            },
            "boolean" => TypeSpec::integer_bits(1),
            "char" | "character" => TypeSpec::sized(TypeKind::Char, size),
            "varchar" | "char varying" | "character varying" => {
                TypeSpec::sized(TypeKind::VarChar, size)
            }
            "long varchar" | "clob" | "character large object" | "xml" => {
                TypeSpec::sized(TypeKind::LongVarChar, None)
            }
            "char for bit data" | "character for bit data" => {
                TypeSpec::sized(TypeKind::Raw, size)
            }
            "varchar for bit data" | "char varying for bit data" => {
                TypeSpec::sized(TypeKind::VarRaw, size)
            }
            "long varchar for bit data" | "blob" | "binary large object" => {
                TypeSpec::sized(TypeKind::LongVarRaw, None)
            }
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            // Derby's temporal types take no precision argument.
            "time" => TypeSpec::temporal(TypeKind::Time, Some(0)).native(raw.type_name.trim()),
            "timestamp" => {
                TypeSpec::temporal(TypeKind::Timestamp, Some(9)).native(raw.type_name.trim())
            }
            _ => infer_from_sql_type(raw),
        };
        common::finish(spec, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sql_types;

    #[test]
    fn test_derby_names() {
        let imp = DerbyImporter::new();
        let spec = imp.infer(&RawColumn::new("TIMESTAMP", sql_types::TIMESTAMP).with_size(29));
        assert_eq!(spec.size, Some(9));

        let spec = imp.infer(&RawColumn::new("BOOLEAN", sql_types::BOOLEAN));
        assert_eq!(spec, TypeSpec::integer_bits(1).native("BOOLEAN").with_raw(&spec.jdbc));

        let raw = RawColumn::new("CHAR () FOR BIT DATA", sql_types::BINARY).with_size(8);
        assert_eq!(imp.infer(&raw).kind, TypeKind::Raw);

        let spec = imp.infer(&RawColumn::new("DECIMAL", sql_types::DECIMAL).with_size(9).with_scale(2));
        assert_eq!(spec.native_representation, "DECIMAL(9,2)");
        assert!(imp.reports_table_info());
    }
}
