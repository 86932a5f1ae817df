//! Initialization errors.
//!
//! Classification itself never fails: every stage reports absence instead of
//! an error. The only hard failures happen while loading and validating a
//! category table, and they all surface here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read category config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid category config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category table is empty")]
    EmptyTable,

    #[error("category at position {index} has an empty id")]
    EmptyCategoryId { index: usize },

    #[error("duplicate category id '{0}'")]
    DuplicateCategory(String),

    #[error("category '{0}' has no keywords")]
    MissingKeywords(String),

    #[error("category '{category}' contains an empty keyword")]
    EmptyKeyword { category: String },

    #[error("fallback category '{0}' is not defined in the table")]
    UnknownFallback(String),

    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
