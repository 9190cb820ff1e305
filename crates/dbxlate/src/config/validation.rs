//! Configuration validation.

use super::Config;
use crate::core::DialectCatalog;
use crate::error::{Result, XlateError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.target_dialect.trim().is_empty() {
        return Err(XlateError::Config("target_dialect is required".into()));
    }
    DialectCatalog::normalize_dialect(&config.target_dialect)?;

    if let Some(source) = &config.source_dialect {
        if DialectCatalog::normalize_dialect(source)? == "same_as_source" {
            return Err(XlateError::Config(
                "source_dialect cannot be 'same_as_source'; it only names a target".into(),
            ));
        }
    }

    if config.script.terminator.trim().is_empty() {
        return Err(XlateError::Config(
            "script.terminator must not be empty".into(),
        ));
    }

    Ok(())
}
