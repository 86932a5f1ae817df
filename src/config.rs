//! Classifier configuration.
//!
//! The category table is the only tunable input of the pipeline. It is
//! loaded from JSON so keyword lists can grow without code changes:
//!
//! ```json
//! {
//!   "fallback": "other",
//!   "acceptance_threshold": 0.3,
//!   "fuzzy_threshold": 0.8,
//!   "categories": [
//!     { "id": "food", "name": "餐饮", "keywords": ["午餐", "外卖"] },
//!     { "id": "other", "keywords": [] }
//!   ]
//! }
//! ```
//!
//! Everything except `categories` has a default. Validation happens when the
//! config is turned into a [`Classifier`](crate::Classifier).

use crate::categories::{BUILTIN_FALLBACK, CategoryDefinition, builtin_definitions};
use crate::error::{ConfigError, Result};
use crate::pipeline::MatchThresholds;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Id of the catch-all category.
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: f64,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Categories in canonical (tie-break) order.
    pub categories: Vec<CategoryDefinition>,
}

fn default_fallback() -> String {
    BUILTIN_FALLBACK.to_string()
}

fn default_acceptance_threshold() -> f64 {
    MatchThresholds::DEFAULT_ACCEPTANCE
}

fn default_fuzzy_threshold() -> f64 {
    MatchThresholds::DEFAULT_FUZZY
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ClassifierConfig {
    /// The embedded default table.
    pub fn builtin() -> Self {
        Self {
            fallback: default_fallback(),
            acceptance_threshold: default_acceptance_threshold(),
            fuzzy_threshold: default_fuzzy_threshold(),
            categories: builtin_definitions(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), categories = config.categories.len(), "loaded category config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checked thresholds.
    pub fn thresholds(&self) -> Result<MatchThresholds> {
        check_unit_range("acceptance_threshold", self.acceptance_threshold)?;
        check_unit_range("fuzzy_threshold", self.fuzzy_threshold)?;
        Ok(MatchThresholds { acceptance: self.acceptance_threshold, fuzzy: self.fuzzy_threshold })
    }
}

fn check_unit_range(name: &'static str, value: f64) -> Result<()> {
    // NaN fails `contains` as well.
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(ConfigError::ThresholdOutOfRange { name, value }) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ClassifierConfig::from_json_str(r#"{"categories": [{"id": "other", "keywords": []}]}"#).unwrap();
        assert_eq!(config.fallback, "other");
        assert_eq!(config.acceptance_threshold, 0.3);
        assert_eq!(config.fuzzy_threshold, 0.8);
        assert_eq!(config.categories[0].name, None);
    }

    #[test]
    fn missing_categories_is_a_json_error() {
        let err = ClassifierConfig::from_json_str(r#"{"fallback": "other"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn builtin_round_trips_through_json() {
        let builtin = ClassifierConfig::builtin();
        let json = builtin.to_json_pretty().unwrap();
        assert_eq!(ClassifierConfig::from_json_str(&json).unwrap(), builtin);
    }

    #[test]
    fn thresholds_outside_unit_range_are_rejected() {
        let mut config = ClassifierConfig::builtin();
        config.acceptance_threshold = 1.5;
        assert!(matches!(
            config.thresholds(),
            Err(ConfigError::ThresholdOutOfRange { name: "acceptance_threshold", .. })
        ));

        config.acceptance_threshold = 0.3;
        config.fuzzy_threshold = f64::NAN;
        assert!(matches!(config.thresholds(), Err(ConfigError::ThresholdOutOfRange { name: "fuzzy_threshold", .. })));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"fallback": "misc", "acceptance_threshold": 0.5, "categories": [
                {{"id": "pets", "name": "宠物", "keywords": ["猫粮", "狗粮"]}},
                {{"id": "misc", "keywords": []}}
            ]}}"#
        )
        .unwrap();

        let config = ClassifierConfig::load(file.path()).unwrap();
        assert_eq!(config.fallback, "misc");
        assert_eq!(config.acceptance_threshold, 0.5);
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name.as_deref(), Some("宠物"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClassifierConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
