//! Dialect catalog for explicit dependency injection.
//!
//! The [`DialectCatalog`] is a registry of importers and script generators
//! keyed by dialect name. It is constructed explicitly and handed to callers
//! instead of living in global state, so tests can build catalogs holding
//! only mocks.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dialect::Translator;
use crate::error::{Result, XlateError};

use super::traits::{Capabilities, Importer, ScriptGenerator};

/// Canonical dialect names and the aliases accepted for them.
const ALIASES: &[(&str, &[&str])] = &[
    ("generic", &["generic", "sql", "ansi"]),
    ("db2", &["db2", "db2udb"]),
    ("derby", &["derby", "javadb"]),
    ("mssql", &["mssql", "sqlserver", "sql_server", "ms-sql"]),
    ("mysql", &["mysql", "mariadb"]),
    ("oracle", &["oracle", "ora"]),
    ("postgres", &["postgres", "postgresql", "pg"]),
    ("smallsql", &["smallsql"]),
    ("transbase", &["transbase", "tb"]),
    (
        "same_as_source",
        &["same_as_source", "same-as-source", "same"],
    ),
];

/// Registry of importers and script generators.
///
/// # Example
///
/// ```rust
/// use dbxlate::core::DialectCatalog;
///
/// let catalog = DialectCatalog::with_builtins();
/// assert!(catalog.has_importer("oracle"));
/// assert!(catalog.has_generator("same_as_source"));
/// assert_eq!(catalog.require_generator("PostgreSQL").unwrap().name(), "postgres");
/// ```
#[derive(Default)]
pub struct DialectCatalog {
    /// Importers by canonical dialect name.
    importers: BTreeMap<String, Arc<dyn Importer>>,

    /// Generators by canonical dialect name.
    generators: BTreeMap<String, Arc<dyn ScriptGenerator>>,
}

impl DialectCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with every built-in dialect registered.
    ///
    /// Each engine contributes one importer and one generator; the hub is
    /// [`TypeSpec`](super::TypeSpec), so any pair composes through a
    /// [`Translator`]. `same_as_source` is a generator only.
    pub fn with_builtins() -> Self {
        use crate::drivers::{
            Db2Generator, Db2Importer, DerbyGenerator, DerbyImporter, GenericGenerator,
            GenericImporter, MssqlGenerator, MssqlImporter, MysqlGenerator, MysqlImporter,
            OracleGenerator, OracleImporter, PostgresGenerator, PostgresImporter,
            SameAsSourceGenerator, SmallsqlGenerator, SmallsqlImporter, TransbaseGenerator,
            TransbaseImporter,
        };

        let mut catalog = Self::new();

        catalog.register_importer("generic", GenericImporter::new());
        catalog.register_importer("db2", Db2Importer::new());
        catalog.register_importer("derby", DerbyImporter::new());
        catalog.register_importer("mssql", MssqlImporter::new());
        catalog.register_importer("mysql", MysqlImporter::new());
        catalog.register_importer("oracle", OracleImporter::new());
        catalog.register_importer("postgres", PostgresImporter::new());
        catalog.register_importer("smallsql", SmallsqlImporter::new());
        catalog.register_importer("transbase", TransbaseImporter::new());

        catalog.register_generator("generic", GenericGenerator::new());
        catalog.register_generator("db2", Db2Generator::new());
        catalog.register_generator("derby", DerbyGenerator::new());
        catalog.register_generator("mssql", MssqlGenerator::new());
        catalog.register_generator("mysql", MysqlGenerator::new());
        catalog.register_generator("oracle", OracleGenerator::new());
        catalog.register_generator("postgres", PostgresGenerator::new());
        catalog.register_generator("smallsql", SmallsqlGenerator::new());
        catalog.register_generator("transbase", TransbaseGenerator::new());
        catalog.register_generator("same_as_source", SameAsSourceGenerator::new());

        catalog
    }

    /// Register an importer by name.
    pub fn register_importer(&mut self, name: impl Into<String>, importer: impl Importer + 'static) {
        self.importers.insert(name.into(), Arc::new(importer));
    }

    /// Register an importer as an Arc (for sharing).
    pub fn register_importer_arc(&mut self, name: impl Into<String>, importer: Arc<dyn Importer>) {
        self.importers.insert(name.into(), importer);
    }

    /// Register a generator by name.
    pub fn register_generator(
        &mut self,
        name: impl Into<String>,
        generator: impl ScriptGenerator + 'static,
    ) {
        self.generators.insert(name.into(), Arc::new(generator));
    }

    /// Register a generator as an Arc (for sharing).
    pub fn register_generator_arc(
        &mut self,
        name: impl Into<String>,
        generator: Arc<dyn ScriptGenerator>,
    ) {
        self.generators.insert(name.into(), generator);
    }

    /// Get an importer by exact name.
    pub fn get_importer(&self, name: &str) -> Option<Arc<dyn Importer>> {
        self.importers.get(name).cloned()
    }

    /// Get a generator by exact name.
    pub fn get_generator(&self, name: &str) -> Option<Arc<dyn ScriptGenerator>> {
        self.generators.get(name).cloned()
    }

    /// Get an importer by name or alias, returning an error if not found.
    pub fn require_importer(&self, name: &str) -> Result<Arc<dyn Importer>> {
        lookup(&self.importers, name).ok_or_else(|| XlateError::UnknownDialect {
            name: name.to_string(),
            supported: self.importer_names().join(", "),
        })
    }

    /// Get a generator by name or alias, returning an error if not found.
    pub fn require_generator(&self, name: &str) -> Result<Arc<dyn ScriptGenerator>> {
        lookup(&self.generators, name).ok_or_else(|| XlateError::UnknownDialect {
            name: name.to_string(),
            supported: self.generator_names().join(", "),
        })
    }

    /// Check if an importer is registered.
    pub fn has_importer(&self, name: &str) -> bool {
        lookup(&self.importers, name).is_some()
    }

    /// Check if a generator is registered.
    pub fn has_generator(&self, name: &str) -> bool {
        lookup(&self.generators, name).is_some()
    }

    /// Registered importer names, sorted.
    pub fn importer_names(&self) -> Vec<&str> {
        self.importers.keys().map(String::as_str).collect()
    }

    /// Registered generator names, sorted.
    pub fn generator_names(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }

    /// Connectivity capabilities of a source dialect.
    pub fn capabilities(&self, name: &str) -> Result<Capabilities> {
        Ok(self.require_importer(name)?.capabilities())
    }

    /// Compose the importer of `source` with the generator of `target`.
    pub fn translator(&self, source: &str, target: &str) -> Result<Translator> {
        Ok(Translator::new(
            self.require_importer(source)?,
            self.require_generator(target)?,
        ))
    }

    /// Get the canonical dialect name for an alias.
    ///
    /// - "mssql", "sqlserver", "sql_server" → "mssql"
    /// - "postgres", "postgresql", "pg" → "postgres"
    /// - "mysql", "mariadb" → "mysql"
    /// - "same", "same-as-source" → "same_as_source"
    pub fn normalize_dialect(name: &str) -> Result<&'static str> {
        let lower = name.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(_, aliases)| aliases.contains(&lower.as_str()))
            .map(|(canonical, _)| *canonical)
            .ok_or_else(|| XlateError::UnknownDialect {
                name: name.to_string(),
                supported: ALIASES
                    .iter()
                    .map(|(canonical, _)| *canonical)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Exact name first, then the lowercase form, then the alias table.
fn lookup<T: ?Sized>(map: &BTreeMap<String, Arc<T>>, name: &str) -> Option<Arc<T>> {
    if let Some(found) = map.get(name) {
        return Some(found.clone());
    }
    let lower = name.trim().to_lowercase();
    if let Some(found) = map.get(&lower) {
        return Some(found.clone());
    }
    DialectCatalog::normalize_dialect(&lower)
        .ok()
        .and_then(|canonical| map.get(canonical).cloned())
}

impl std::fmt::Debug for DialectCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectCatalog")
            .field("importers", &self.importers.keys().collect::<Vec<_>>())
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::Rendered;
    use crate::core::typespec::{RawColumn, TypeSpec};

    // Mock importer for testing
    struct MockImporter {
        name: &'static str,
    }

    impl Importer for MockImporter {
        fn name(&self) -> &str {
            self.name
        }

        fn infer(&self, _raw: &RawColumn) -> TypeSpec {
            TypeSpec::integer_bits(32)
        }

        fn requires_probe(&self) -> bool {
            true
        }
    }

    // Mock generator for testing
    struct MockGenerator {
        name: &'static str,
    }

    impl ScriptGenerator for MockGenerator {
        fn name(&self) -> &str {
            self.name
        }

        fn render_type(&self, _spec: &TypeSpec) -> Rendered {
            Rendered::exact("int")
        }
    }

    #[test]
    fn test_catalog_importer_registration() {
        let mut catalog = DialectCatalog::new();
        assert!(!catalog.has_importer("test"));

        catalog.register_importer("test", MockImporter { name: "test" });
        assert!(catalog.has_importer("test"));

        let importer = catalog.get_importer("test").unwrap();
        assert_eq!(importer.name(), "test");
    }

    #[test]
    fn test_catalog_require_methods() {
        let mut catalog = DialectCatalog::new();
        catalog.register_importer("postgres", MockImporter { name: "postgres" });
        catalog.register_generator("mssql", MockGenerator { name: "mssql" });

        assert!(catalog.require_importer("PG").is_ok());
        assert!(catalog.require_generator("SqlServer").is_ok());
        assert!(catalog.require_generator("postgres").is_err());

        match catalog.require_importer("informix") {
            Err(XlateError::UnknownDialect { name, supported }) => {
                assert_eq!(name, "informix");
                assert_eq!(supported, "postgres");
            }
            other => panic!("unexpected: {:?}", other.map(|i| i.name().to_string())),
        }
    }

    #[test]
    fn test_catalog_translator_and_capabilities() {
        let mut catalog = DialectCatalog::new();
        catalog.register_importer("a", MockImporter { name: "a" });
        catalog.register_generator("b", MockGenerator { name: "b" });

        let translator = catalog.translator("a", "b").unwrap();
        assert_eq!(translator.source_dialect(), "a");
        assert_eq!(translator.target_dialect(), "b");
        assert!(catalog.translator("b", "a").is_err());

        let caps = catalog.capabilities("a").unwrap();
        assert!(caps.requires_probe);
        assert!(caps.reports_table_info);
    }

    #[test]
    fn test_normalize_dialect() {
        assert_eq!(DialectCatalog::normalize_dialect("SQLSERVER").unwrap(), "mssql");
        assert_eq!(DialectCatalog::normalize_dialect("pg").unwrap(), "postgres");
        assert_eq!(DialectCatalog::normalize_dialect("MariaDB").unwrap(), "mysql");
        assert_eq!(
            DialectCatalog::normalize_dialect("same-as-source").unwrap(),
            "same_as_source"
        );
        assert!(DialectCatalog::normalize_dialect("informix").is_err());
    }

    #[test]
    fn test_builtins_enumeration() {
        let catalog = DialectCatalog::with_builtins();
        assert_eq!(
            catalog.importer_names(),
            vec![
                "db2", "derby", "generic", "mssql", "mysql", "oracle", "postgres", "smallsql",
                "transbase"
            ]
        );
        assert_eq!(catalog.generator_names().len(), 10);
        assert!(!catalog.has_importer("same_as_source"));

        let oracle = catalog.capabilities("oracle").unwrap();
        assert!(oracle.requires_probe);
        assert!(!oracle.reports_table_info);
        assert!(catalog.capabilities("db2").unwrap().reports_table_info);

        let debug = format!("{:?}", catalog);
        assert!(debug.starts_with("DialectCatalog { importers: ["));
    }
}
