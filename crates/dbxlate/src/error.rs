//! Error types for the translation library.

use thiserror::Error;

/// Boxed driver error carried through probe failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for translation operations.
///
/// Type inference and rendering are total and never produce these; only the
/// I/O-bearing edges (metadata probes, LOB loading, configuration and input
/// documents) do.
#[derive(Error, Debug)]
pub enum XlateError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dialect name not registered in the catalog
    #[error("Unknown dialect '{name}'. Supported dialects: {supported}")]
    UnknownDialect { name: String, supported: String },

    /// The zero-row metadata probe failed in the driver
    #[error("Metadata probe failed for query: {sql}")]
    Probe {
        sql: String,
        #[source]
        source: BoxError,
    },

    /// The probe answered, but its columns do not line up with the metadata
    #[error("Metadata probe for {table} returned {probed} columns, expected {expected}")]
    ProbeMismatch {
        table: String,
        expected: usize,
        probed: usize,
    },

    /// A deferred large object could not be materialized
    #[error("Large object load failed: {0}")]
    LobLoad(String),

    /// A value could not be read for its column type
    #[error("Invalid value for {kind} column: {message}")]
    Value { kind: String, message: String },

    /// A statement could not be assembled
    #[error("Script error: {0}")]
    Script(String),

    /// Row diff or commit graph could not be computed
    #[error("Diff error: {0}")]
    Diff(String),

    /// Rendering produced warnings while warnings are configured as fatal
    #[error("Lossy translation of {context}: {}", warnings.join("; "))]
    Lossy {
        context: String,
        warnings: Vec<String>,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl XlateError {
    /// Create a Probe error wrapping the driver's failure.
    pub fn probe(sql: impl Into<String>, source: impl Into<BoxError>) -> Self {
        XlateError::Probe {
            sql: sql.into(),
            source: source.into(),
        }
    }

    /// Create a Value error.
    pub fn value(kind: impl std::fmt::Display, message: impl Into<String>) -> Self {
        XlateError::Value {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    /// Create a Lossy error from accumulated warnings.
    pub fn lossy(context: impl Into<String>, warnings: Vec<String>) -> Self {
        XlateError::Lossy {
            context: context.into(),
            warnings,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            XlateError::Config(_) | XlateError::UnknownDialect { .. } => 2,
            XlateError::Io(_) | XlateError::Yaml(_) | XlateError::Json(_) => 3,
            XlateError::Lossy { .. } => 4,
            XlateError::Probe { .. } | XlateError::ProbeMismatch { .. } => 5,
            XlateError::LobLoad(_)
            | XlateError::Value { .. }
            | XlateError::Script(_)
            | XlateError::Diff(_) => 1,
        }
    }
}

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, XlateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detailed_includes_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "socket closed");
        let err = XlateError::probe("SELECT * FROM t WHERE 1 = 2", io);
        let text = err.format_detailed();
        assert!(text.starts_with("Error: Metadata probe failed"));
        assert!(text.contains("Caused by:\n  1: socket closed"));
    }

    #[test]
    fn test_lossy_message_joins_warnings() {
        let err = XlateError::lossy(
            "orders.note",
            vec!["clamped".to_string(), "zone dropped".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Lossy translation of orders.note: clamped; zone dropped"
        );
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(XlateError::Config("x".into()).exit_code(), 2);
        assert_eq!(XlateError::Diff("cycle".into()).exit_code(), 1);
    }
}
