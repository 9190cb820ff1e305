//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::script::ScriptOptions;

/// Root configuration structure.
///
/// ```yaml
/// source_dialect: oracle
/// target_dialect: postgres
/// script:
///   terminator: ";"
///   qualify_schema: true
///   warnings_as_errors: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Dialect the table documents were read from. Optional when the
    /// documents already carry canonical types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dialect: Option<String>,

    /// Dialect scripts are generated for.
    pub target_dialect: String,

    /// Statement layout.
    #[serde(default)]
    pub script: ScriptConfig,
}

/// Script generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Statement terminator (default: ";").
    #[serde(default = "default_terminator")]
    pub terminator: String,

    /// Prefix table names with their schema (default: true).
    #[serde(default = "default_true")]
    pub qualify_schema: bool,

    /// Emit primary key constraints (default: true).
    #[serde(default = "default_true")]
    pub include_primary_key: bool,

    /// Emit foreign key constraints (default: true).
    #[serde(default = "default_true")]
    pub include_foreign_keys: bool,

    /// Treat any lossy rendering as an error (default: false).
    #[serde(default)]
    pub warnings_as_errors: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            terminator: default_terminator(),
            qualify_schema: true,
            include_primary_key: true,
            include_foreign_keys: true,
            warnings_as_errors: false,
        }
    }
}

impl From<&ScriptConfig> for ScriptOptions {
    fn from(config: &ScriptConfig) -> Self {
        ScriptOptions {
            terminator: config.terminator.clone(),
            qualify_schema: config.qualify_schema,
            include_primary_key: config.include_primary_key,
            include_foreign_keys: config.include_foreign_keys,
            warnings_as_errors: config.warnings_as_errors,
        }
    }
}

fn default_terminator() -> String {
    ";".to_string()
}

fn default_true() -> bool {
    true
}
