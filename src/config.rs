//! Classifier configuration.
//!
//! The relevance classifier is extensible in exactly one place: operators may
//! supply extra qualifying-classification type names under the single named
//! option [`LINEAGE_CLASSIFICATION_TYPES_OPTION`] in the access-service
//! options map. Everything else about the classifier is fixed at build time.
//!
//! Option handling is deliberately lenient: a missing option, a non-array
//! payload, or non-string array entries fall back to the built-in defaults
//! with a warning, so a bad deployment descriptor degrades the classifier to
//! stock behavior instead of failing startup. [`ClassifierConfig::try_from_options`]
//! is the strict variant for callers that validate configuration up front.

use crate::error::{FilamentError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Options-map key carrying extra qualifying-classification type names.
pub const LINEAGE_CLASSIFICATION_TYPES_OPTION: &str = "LineageClassificationTypes";

/// Configuration for the lineage relevance classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Classification type names added to the built-in qualifying set.
    pub extra_lineage_classifications: Vec<String>,
}

impl ClassifierConfig {
    /// Builds a configuration from an access-service options map, falling
    /// back to defaults on missing or malformed input.
    pub fn from_options(options: &HashMap<String, Value>) -> Self {
        match Self::try_from_options(options) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "ignoring malformed classifier options, using defaults");
                Self::default()
            }
        }
    }

    /// Strict variant of [`from_options`]: a present-but-malformed option is
    /// an error instead of a fallback.
    ///
    /// [`from_options`]: ClassifierConfig::from_options
    pub fn try_from_options(options: &HashMap<String, Value>) -> Result<Self> {
        let Some(value) = options.get(LINEAGE_CLASSIFICATION_TYPES_OPTION) else {
            debug!("no extra lineage classification types configured");
            return Ok(Self::default());
        };

        let entries = value.as_array().ok_or_else(|| FilamentError::Config {
            option: LINEAGE_CLASSIFICATION_TYPES_OPTION.to_string(),
            reason: "expected an array of strings".to_string(),
        })?;

        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.as_str().ok_or_else(|| FilamentError::Config {
                option: LINEAGE_CLASSIFICATION_TYPES_OPTION.to_string(),
                reason: format!("expected string entry, got {entry}"),
            })?;
            names.push(name.to_string());
        }

        Ok(Self {
            extra_lineage_classifications: names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_option_falls_back_to_defaults() {
        let config = ClassifierConfig::from_options(&HashMap::new());
        assert!(config.extra_lineage_classifications.is_empty());
    }

    #[test]
    fn test_valid_option_is_read() {
        let mut options = HashMap::new();
        options.insert(
            LINEAGE_CLASSIFICATION_TYPES_OPTION.to_string(),
            json!(["DataQuality", "Retention"]),
        );
        let config = ClassifierConfig::from_options(&options);
        assert_eq!(
            config.extra_lineage_classifications,
            vec!["DataQuality".to_string(), "Retention".to_string()]
        );
    }

    #[test]
    fn test_malformed_option_falls_back_to_defaults() {
        let mut options = HashMap::new();
        options.insert(LINEAGE_CLASSIFICATION_TYPES_OPTION.to_string(), json!("DataQuality"));
        let config = ClassifierConfig::from_options(&options);
        assert!(config.extra_lineage_classifications.is_empty());

        options.insert(
            LINEAGE_CLASSIFICATION_TYPES_OPTION.to_string(),
            json!(["DataQuality", 42]),
        );
        let config = ClassifierConfig::from_options(&options);
        assert!(config.extra_lineage_classifications.is_empty());
    }

    #[test]
    fn test_strict_variant_reports_errors() {
        let mut options = HashMap::new();
        options.insert(LINEAGE_CLASSIFICATION_TYPES_OPTION.to_string(), json!({}));
        let err = ClassifierConfig::try_from_options(&options).unwrap_err();
        assert!(!err.is_caller_bug());
        assert!(err.to_string().contains(LINEAGE_CLASSIFICATION_TYPES_OPTION));
    }
}
