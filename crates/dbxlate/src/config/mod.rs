//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::core::DialectCatalog;
use crate::error::Result;
use crate::script::ScriptOptions;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Canonical name of the source dialect, if one is set.
    pub fn source(&self) -> Result<Option<&'static str>> {
        self.source_dialect
            .as_deref()
            .map(DialectCatalog::normalize_dialect)
            .transpose()
    }

    /// Canonical name of the target dialect.
    pub fn target(&self) -> Result<&'static str> {
        DialectCatalog::normalize_dialect(&self.target_dialect)
    }

    pub fn script_options(&self) -> ScriptOptions {
        ScriptOptions::from(&self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XlateError;

    #[test]
    fn test_from_yaml_with_defaults() {
        let config = Config::from_yaml("target_dialect: PostgreSQL\n").unwrap();
        assert_eq!(config.source().unwrap(), None);
        assert_eq!(config.target().unwrap(), "postgres");
        assert_eq!(config.script_options(), ScriptOptions::default());
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
source_dialect: sqlserver
target_dialect: oracle
script:
  terminator: "\n/"
  qualify_schema: false
  warnings_as_errors: true
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.source().unwrap(), Some("mssql"));
        let options = config.script_options();
        assert_eq!(options.terminator, "\n/");
        assert!(!options.qualify_schema);
        assert!(options.include_primary_key);
        assert!(options.warnings_as_errors);
    }

    #[test]
    fn test_invalid_yaml_and_dialect() {
        assert!(matches!(
            Config::from_yaml("target_dialect: [oops"),
            Err(XlateError::Yaml(_))
        ));
        assert!(matches!(
            Config::from_yaml("target_dialect: informix"),
            Err(XlateError::UnknownDialect { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dbxlate.yaml");
        std::fs::write(&path, "source_dialect: db2\ntarget_dialect: mysql\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.target().unwrap(), "mysql");

        assert!(matches!(
            Config::load(dir.path().join("missing.yaml")),
            Err(XlateError::Io(_))
        ));
    }
}
