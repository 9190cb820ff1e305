//! MySQL/MariaDB column metadata → canonical types.

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
use crate::drivers::common::{self, TypeName};
use crate::drivers::generic::infer_from_sql_type;

/// MySQL/MariaDB importer.
#[derive(Debug, Clone, Default)]
pub struct MysqlImporter;

impl MysqlImporter {
    /// Create a new MySQL importer.
    pub fn new() -> Self {
        Self
    }
}

impl Importer for MysqlImporter {
    fn name(&self) -> &str {
        "mysql"
    }

    fn reports_table_info(&self) -> bool {
        false
    }

    fn infer(&self, raw: &RawColumn) -> TypeSpec {
        let parsed = TypeName::parse(&raw.type_name);
        let base = parsed.strip_suffix("zerofill").unwrap_or(parsed.base.as_str());
        let (base, unsigned) = match base.strip_suffix("unsigned") {
            Some(rest) => (rest.trim_end(), true),
            None => (base, false),
        };
        // An unsigned column needs one more bit to hold its range as signed.
        let int = |bits: u32| TypeSpec::integer_bits(if unsigned { bits + 1 } else { bits });
        let size = common::size_of(&parsed, raw);
        let fsp = parsed
            .arg_u32(0)
            .or_else(|| raw.scale.and_then(|s| u32::try_from(s).ok()))
            .unwrap_or(0);
        let native = raw.type_name.trim();

        let spec = match base {
            "bit" => TypeSpec::integer_bits(parsed.arg_u32(0).or(raw.size_u32()).unwrap_or(1)),
            "bool" | "boolean" => TypeSpec::integer_bits(1),
            "tinyint" => int(8),
            "smallint" => int(16),
            "mediumint" => int(24),
            "int" | "integer" => int(32),
            "bigint" => int(64),
            "decimal" | "numeric" | "dec" | "fixed" => TypeSpec::decimal(
                Some(size.filter(|p| *p > 0).unwrap_or(10)),
                Some(common::scale_of(&parsed, raw).unwrap_or(0)),
            ),
            "float" => match parsed.args.len() {
                1 if parsed.arg_u32(0).unwrap_or(0) > 24 => TypeSpec::ieee_double(),
                _ => TypeSpec::ieee_single(),
            },
            "double" | "double precision" | "real" => TypeSpec::ieee_double(),
            "year" => TypeSpec::decimal(Some(4), Some(0)).native(native),
            "char" => TypeSpec::sized(TypeKind::Char, size),
            "varchar" => TypeSpec::sized(TypeKind::VarChar, size),
            "tinytext" => TypeSpec::sized(TypeKind::VarChar, Some(255)).native(native),
            "text" | "mediumtext" | "longtext" | "json" => {
                TypeSpec::sized(TypeKind::LongVarChar, None)
            }
            "binary" => TypeSpec::sized(TypeKind::Raw, size),
            "varbinary" => TypeSpec::sized(TypeKind::VarRaw, size),
            "tinyblob" => TypeSpec::sized(TypeKind::VarRaw, Some(255)).native(native),
            "blob" | "mediumblob" | "longblob" => TypeSpec::sized(TypeKind::LongVarRaw, None),
            "enum" | "set" => TypeSpec::sized(TypeKind::VarChar, raw.size_u32()).native(native),
            "date" => TypeSpec::temporal(TypeKind::Date, None),
            "time" => TypeSpec::temporal(TypeKind::Time, Some(fsp)),
            // `datetime` alone means `datetime(0)`.
            "datetime" => {
                let fraction = Some(fsp).filter(|n| *n > 0).map(|n| n.to_string());
                TypeSpec::temporal(TypeKind::Timestamp, Some(fsp))
                    .native(common::clause_name(raw, fraction))
            }
            "timestamp" => TypeSpec::temporal(TypeKind::Timestamp, Some(fsp)).auto_timestamp(),
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
    fn test_unsigned_widens_by_one_bit() {
        let imp = MysqlImporter::new();
        let spec = imp.infer(&RawColumn::new("int(10) unsigned", sql_types::INTEGER));
        assert_eq!(spec.size, Some(33));
        assert_eq!(spec.native_representation, "int(10) unsigned");

        let spec = imp.infer(&RawColumn::new("TINYINT UNSIGNED ZEROFILL", sql_types::TINYINT));
        assert_eq!(spec.size, Some(9));

        let spec = imp.infer(&RawColumn::new("mediumint", sql_types::INTEGER));
        assert_eq!(spec.size, Some(24));
    }

    #[test]
    fn test_timestamp_is_auto() {
        let imp = MysqlImporter::new();
        let spec = imp.infer(&RawColumn::new("timestamp(3)", sql_types::TIMESTAMP));
        assert!(spec.is_auto_timestamp);
        assert_eq!(spec.size, Some(3));

        let spec = imp.infer(&RawColumn::new("datetime", sql_types::TIMESTAMP));
        assert!(!spec.is_auto_timestamp);
        assert_eq!(spec.size, Some(0));
    }

    #[test]
    fn test_text_and_blob_families() {
        let imp = MysqlImporter::new();
        let spec = imp.infer(&RawColumn::new("tinytext", sql_types::VARCHAR));
        assert_eq!((spec.kind, spec.size), (TypeKind::VarChar, Some(255)));
        assert_eq!(spec.native_representation, "tinytext");

        assert_eq!(
            imp.infer(&RawColumn::new("LONGBLOB", sql_types::LONGVARBINARY)).kind,
            TypeKind::LongVarRaw
        );
        let spec = imp.infer(&RawColumn::new("year", sql_types::DATE));
        assert_eq!((spec.size, spec.scale), (Some(4), Some(0)));
        assert!(!imp.reports_table_info());
    }
}
