//! Error types for the filament lineage engine.
//!
//! This module provides a unified error type [`FilamentError`] along with a
//! convenient [`Result`] type alias.
//!
//! Most of the engine never produces errors at all: unknown types truncate a
//! hierarchy walk, malformed relationships classify as non-qualifying, and
//! unrecognized status strings collapse to `Unknown`. The variants below cover
//! the two cases that do surface:
//!
//! - **Malformed instance**: an entity or relationship reached normalization
//!   without a type descriptor or status. Relevance checks reject these
//!   upstream, so hitting this is a caller bug, not a data condition.
//! - **Configuration**: an option payload that could not be interpreted when
//!   the caller asked for strict parsing (the classifier itself is lenient
//!   and falls back to defaults).
//!
//! # Example
//!
//! ```rust
//! use filament::error::{FilamentError, Result};
//!
//! fn require_type(type_name: Option<&str>) -> Result<&str> {
//!     type_name.ok_or_else(|| FilamentError::MalformedInstance {
//!         guid: "entity-1".into(),
//!         reason: "missing type descriptor".into(),
//!     })
//! }
//! ```

use thiserror::Error;

/// Main error type for filament operations.
#[derive(Error, Debug)]
pub enum FilamentError {
    /// An instance lacking its type descriptor or status reached a stage that
    /// requires them. Entities and relationships are screened by the
    /// relevance classifier before normalization, so this indicates a caller
    /// that skipped the screen.
    #[error("Malformed instance {guid}: {reason}")]
    MalformedInstance { guid: String, reason: String },

    /// A relationship was normalized without one of its end-proxies.
    #[error("Relationship {guid} is missing end-proxy {end}")]
    MissingEndProxy { guid: String, end: &'static str },

    /// Configuration payload could not be interpreted.
    #[error("Invalid configuration for option '{option}': {reason}")]
    Config { option: String, reason: String },
}

impl FilamentError {
    /// Returns true if this error indicates a contract violation by the
    /// caller rather than bad input data. Callers typically treat these as
    /// fatal instead of skipping the instance.
    pub fn is_caller_bug(&self) -> bool {
        matches!(
            self,
            FilamentError::MalformedInstance { .. } | FilamentError::MissingEndProxy { .. }
        )
    }
}

/// Result type alias for filament operations.
pub type Result<T> = std::result::Result<T, FilamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_bug_classification() {
        let err = FilamentError::MalformedInstance {
            guid: "e1".into(),
            reason: "missing status".into(),
        };
        assert!(err.is_caller_bug());

        let err = FilamentError::Config {
            option: "LineageClassificationTypes".into(),
            reason: "expected array of strings".into(),
        };
        assert!(!err.is_caller_bug());
    }

    #[test]
    fn test_error_display() {
        let err = FilamentError::MissingEndProxy {
            guid: "r1".into(),
            end: "two",
        };
        assert_eq!(err.to_string(), "Relationship r1 is missing end-proxy two");
    }
}
