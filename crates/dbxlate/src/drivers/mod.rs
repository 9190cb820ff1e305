//! Dialect implementations.
//!
//! Each dialect module provides one [`Importer`] and one [`ScriptGenerator`]:
//!
//! - [`generic`]: standard SQL, and the `sql_type` fallback every importer uses
//! - [`db2`], [`derby`], [`mssql`], [`mysql`], [`oracle`], [`postgres`],
//!   [`smallsql`], [`transbase`]: engine-specific corrections and syntax
//! - [`same_as_source`]: identity generator for same-engine copies
//! - [`common`]: type-name parsing shared by the importers
//!
//! # Adding a Dialect
//!
//! 1. Create a module under `drivers/` with an importer and a generator
//! 2. Fall back to [`generic::infer_from_sql_type`] for unmatched names
//! 3. Register both in `DialectCatalog::with_builtins()`
//!
//! [`Importer`]: crate::core::Importer
//! [`ScriptGenerator`]: crate::core::ScriptGenerator

pub mod common;
pub mod db2;
pub mod derby;
pub mod generic;
pub mod mssql;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod same_as_source;
pub mod smallsql;
pub mod transbase;

pub use db2::{Db2Generator, Db2Importer};
pub use derby::{DerbyGenerator, DerbyImporter};
pub use generic::{GenericGenerator, GenericImporter};
pub use mssql::{MssqlGenerator, MssqlImporter};
pub use mysql::{MysqlGenerator, MysqlImporter};
pub use oracle::{OracleGenerator, OracleImporter};
pub use postgres::{PostgresGenerator, PostgresImporter};
pub use same_as_source::SameAsSourceGenerator;
pub use smallsql::{SmallsqlGenerator, SmallsqlImporter};
pub use transbase::{TransbaseGenerator, TransbaseImporter};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interval::Interval;
    use crate::core::sql_types;
    use crate::core::traits::{Importer, ScriptGenerator};
    use crate::core::typespec::{RawColumn, TypeKind, TypeSpec};
    use crate::core::value::SqlValue;

    fn generators() -> Vec<Box<dyn ScriptGenerator>> {
        vec![
            Box::new(GenericGenerator::new()),
            Box::new(Db2Generator::new()),
            Box::new(DerbyGenerator::new()),
            Box::new(MssqlGenerator::new()),
            Box::new(MysqlGenerator::new()),
            Box::new(OracleGenerator::new()),
            Box::new(PostgresGenerator::new()),
            Box::new(SmallsqlGenerator::new()),
            Box::new(TransbaseGenerator::new()),
            Box::new(SameAsSourceGenerator::new()),
        ]
    }

    fn importers() -> Vec<Box<dyn Importer>> {
        vec![
            Box::new(GenericImporter::new()),
            Box::new(Db2Importer::new()),
            Box::new(DerbyImporter::new()),
            Box::new(MssqlImporter::new()),
            Box::new(MysqlImporter::new()),
            Box::new(OracleImporter::new()),
            Box::new(PostgresImporter::new()),
            Box::new(SmallsqlImporter::new()),
            Box::new(TransbaseImporter::new()),
        ]
    }

    fn every_kind() -> Vec<TypeSpec> {
        vec![
            TypeSpec::integer_bits(32),
            TypeSpec::decimal(Some(10), Some(2)),
            TypeSpec::ieee_double(),
            TypeSpec::sized(TypeKind::Char, Some(10)),
            TypeSpec::sized(TypeKind::VarNChar, Some(10)),
            TypeSpec::sized(TypeKind::LongVarChar, None),
            TypeSpec::sized(TypeKind::Raw, Some(16)),
            TypeSpec::sized(TypeKind::LongVarRaw, None),
            TypeSpec::temporal(TypeKind::Date, None),
            TypeSpec::temporal(TypeKind::TimeTz, Some(3)),
            TypeSpec::temporal(TypeKind::TimestampTz, Some(6)),
            TypeSpec::interval(TypeKind::IntervalYm, Some(2), None),
            TypeSpec::interval(TypeKind::IntervalDs, Some(2), Some(6)),
            TypeSpec::interval(TypeKind::IntervalYs, None, Some(6)),
            TypeSpec::unknown().native("GEOMETRY"),
        ]
    }

    #[test]
    fn test_null_literal_for_every_dialect_and_kind() {
        for gen in generators() {
            for spec in every_kind() {
                let r = gen.render_literal(&spec, &SqlValue::Null);
                assert_eq!(r.text, "NULL", "{} / {}", gen.name(), spec);
                assert!(!r.is_lossy());
            }
        }
    }

    #[test]
    fn test_render_type_is_total() {
        for gen in generators() {
            for spec in every_kind() {
                let r = gen.render_type(&spec);
                assert!(!r.text.is_empty(), "{} / {}", gen.name(), spec);
            }
        }
    }

    #[test]
    fn test_db2_smallint_round_trip() {
        let raw = RawColumn::new("SMALLINT", sql_types::SMALLINT).with_size(16);
        let spec = Db2Importer::new().infer(&raw);
        assert_eq!(spec.kind, TypeKind::Fixed);
        assert_eq!(spec.size, Some(16));
        assert!(spec.size_in_bits);
        assert_eq!(spec.scale, Some(0));

        assert_eq!(GenericGenerator::new().render_type(&spec).text, "SMALLINT");
        assert_eq!(PostgresGenerator::new().render_type(&spec).text, "smallint");
    }

    #[test]
    fn test_oracle_number_to_db2_double() {
        let raw = RawColumn::new("NUMBER", sql_types::NUMERIC);
        let spec = OracleImporter::new().infer(&raw);
        assert_eq!(spec.kind, TypeKind::Float);
        assert_eq!(spec.size, Some(38));
        assert_eq!((spec.min_exp, spec.max_exp), (Some(-130), Some(125)));
        assert!(!spec.exp_of_2);

        assert_eq!(Db2Generator::new().render_type(&spec).text, "DOUBLE");
    }

    #[test]
    fn test_binary_literals() {
        let raw = TypeSpec::sized(TypeKind::Raw, Some(2));
        let bytes = SqlValue::from(vec![0xDE, 0xAD]);
        assert_eq!(MysqlGenerator::new().render_literal(&raw, &bytes).text, "0xdead");
        assert_eq!(Db2Generator::new().render_literal(&raw, &bytes).text, "x'dead'");
    }

    #[test]
    fn test_interval_without_native_support() {
        let ym = TypeSpec::interval(TypeKind::IntervalYm, Some(2), None);
        let value = SqlValue::Interval(Interval::from_months(14));
        for gen in [
            Box::new(Db2Generator::new()) as Box<dyn ScriptGenerator>,
            Box::new(DerbyGenerator::new()),
            Box::new(MssqlGenerator::new()),
            Box::new(MysqlGenerator::new()),
            Box::new(SmallsqlGenerator::new()),
        ] {
            assert_eq!(gen.render_literal(&ym, &value).text, "14", "{}", gen.name());
        }
    }

    #[test]
    fn test_unknown_type_keeps_raw_clause() {
        for imp in importers() {
            let raw = RawColumn::new("FANCYTYPE", sql_types::OTHER)
                .with_size(12)
                .with_scale(3);
            let spec = imp.infer(&raw);
            assert_eq!(spec.kind, TypeKind::Unknown, "{}", imp.name());
            assert_eq!(spec.native_representation, "FANCYTYPE(12,3)", "{}", imp.name());
        }
    }

    #[test]
    fn test_same_as_source_identity() {
        let same = SameAsSourceGenerator::new();
        let columns = [
            RawColumn::new("VARCHAR2", sql_types::VARCHAR).with_size(20),
            RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(10).with_scale(2),
            RawColumn::new("INTERVAL DAY(3) TO SECOND(2)", -104),
            RawColumn::new("XMLTYPE", sql_types::OTHER),
        ];
        for raw in &columns {
            let spec = OracleImporter::new().infer(raw);
            assert_eq!(same.render_type(&spec).text, spec.native_representation);
        }
    }

    #[test]
    fn test_same_as_source_keeps_size_clauses() {
        let same = SameAsSourceGenerator::new();
        let cases: Vec<(Box<dyn Importer>, RawColumn, &str)> = vec![
            (Box::new(GenericImporter::new()), RawColumn::new("FLOAT", sql_types::FLOAT).with_size(53), "FLOAT(53)"),
            (Box::new(Db2Importer::new()), RawColumn::new("VARGRAPHIC", sql_types::VARCHAR).with_size(40), "VARGRAPHIC(20)"),
            (Box::new(Db2Importer::new()), RawColumn::new("DECFLOAT", sql_types::DECIMAL).with_size(16), "DECFLOAT(16)"),
            (Box::new(Db2Importer::new()), RawColumn::new("CHAR FOR BIT DATA", sql_types::BINARY).with_size(8), "CHAR(8) FOR BIT DATA"),
            (Box::new(Db2Importer::new()), RawColumn::new("VARCHAR () FOR BIT DATA", sql_types::VARBINARY).with_size(16), "VARCHAR (16) FOR BIT DATA"),
            (Box::new(Db2Importer::new()), RawColumn::new("TIME", sql_types::TIME).with_size(8).with_scale(0), "TIME"),
            (Box::new(DerbyImporter::new()), RawColumn::new("FLOAT", sql_types::FLOAT).with_size(23), "FLOAT(23)"),
            (Box::new(DerbyImporter::new()), RawColumn::new("TIMESTAMP", sql_types::TIMESTAMP).with_size(29).with_scale(9), "TIMESTAMP"),
            (Box::new(MssqlImporter::new()), RawColumn::new("float", sql_types::REAL).with_size(24), "float(24)"),
            (Box::new(MssqlImporter::new()), RawColumn::new("datetime2", sql_types::TIMESTAMP).with_size(23).with_scale(3), "datetime2(3)"),
            (Box::new(MssqlImporter::new()), RawColumn::new("datetime", sql_types::TIMESTAMP).with_size(23).with_scale(3), "datetime"),
            (Box::new(MssqlImporter::new()), RawColumn::new("decimal identity", sql_types::DECIMAL).with_size(10).with_scale(0), "decimal(10,0) identity"),
            (Box::new(MysqlImporter::new()), RawColumn::new("BIT", sql_types::BIT).with_size(8), "BIT(8)"),
            (Box::new(MysqlImporter::new()), RawColumn::new("datetime", sql_types::TIMESTAMP).with_size(23).with_scale(3), "datetime(3)"),
            (Box::new(MysqlImporter::new()), RawColumn::new("decimal", sql_types::DECIMAL).with_size(10).with_scale(2), "decimal(10,2)"),
            (Box::new(OracleImporter::new()), RawColumn::new("FLOAT", sql_types::FLOAT).with_size(63), "FLOAT(63)"),
            (Box::new(OracleImporter::new()), RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(12).with_scale(-127), "FLOAT(12)"),
            (Box::new(OracleImporter::new()), RawColumn::new("TIMESTAMP", sql_types::TIMESTAMP).with_size(11).with_scale(3), "TIMESTAMP(3)"),
            (Box::new(OracleImporter::new()), RawColumn::new("TIMESTAMP WITH TIME ZONE", -101).with_size(13).with_scale(6), "TIMESTAMP(6) WITH TIME ZONE"),
            (Box::new(OracleImporter::new()), RawColumn::new("INTERVALDS", -104), "INTERVAL DAY(2) TO SECOND(6)"),
            (Box::new(PostgresImporter::new()), RawColumn::new("timestamp", sql_types::TIMESTAMP).with_size(29).with_scale(3), "timestamp(3)"),
            (Box::new(PostgresImporter::new()), RawColumn::new("time", sql_types::TIME).with_size(15), "time"),
            (Box::new(PostgresImporter::new()), RawColumn::new("bit", sql_types::BIT).with_size(12), "bit(12)"),
            (Box::new(PostgresImporter::new()), RawColumn::new("varbit", sql_types::OTHER).with_size(20), "varbit(20)"),
            (Box::new(SmallsqlImporter::new()), RawColumn::new("NVARCHAR", sql_types::NVARCHAR).with_size(40), "NVARCHAR(40)"),
            (Box::new(SmallsqlImporter::new()), RawColumn::new("TIMESTAMP", sql_types::TIMESTAMP).with_size(23).with_scale(3), "TIMESTAMP"),
            (Box::new(TransbaseImporter::new()), RawColumn::new("DATETIME[YY:MS]", sql_types::TIMESTAMP), "DATETIME[YY:MS]"),
        ];
        for (imp, raw, expected) in cases {
            let spec = imp.infer(&raw);
            assert_eq!(spec.native_representation, expected, "{} {}", imp.name(), raw.type_name);
            let r = same.render_type(&spec);
            assert_eq!(r.text, expected, "{} {}", imp.name(), raw.type_name);
            assert!(!r.is_lossy());
        }
    }

    #[test]
    fn test_capability_flags() {
        for imp in importers() {
            let expected = matches!(imp.name(), "generic" | "db2" | "derby");
            assert_eq!(imp.reports_table_info(), expected, "{}", imp.name());
            let probe = matches!(imp.name(), "oracle" | "postgres");
            assert_eq!(imp.requires_probe(), probe, "{}", imp.name());
        }
    }
}
