//! Rule-based parsing of short spoken expense utterances.
//!
//! `voxpense` turns an already-transcribed utterance such as `"今天午餐花了38块"`
//! into a transaction candidate: an amount, a spending category and a cleaned
//! description. Everything is deterministic and local; there is no model and no
//! network round-trip.
//!
//! ```
//! use voxpense::Classifier;
//!
//! let classifier = Classifier::builtin();
//! let result = classifier.classify("打车去机场用了120元");
//!
//! assert_eq!(result.category, "transport");
//! assert_eq!(result.extracted_amount.map(|a| a.to_string()), Some("120.00".to_string()));
//! ```
//!
//! A [`Classifier`] is immutable once built. Build it once (from the builtin
//! table or a [`ClassifierConfig`]) and share it by reference; every call is a
//! pure function of the input text.

#[macro_use]
mod macros;
mod api;
mod categories;
mod config;
mod error;
mod pipeline;

pub use api::{ClassificationDetails, ClassificationResult, ClassificationVerbose, Classifier, ClassifierSet, Options};
pub use categories::{CategoryDefinition, CategoryTable};
pub use config::ClassifierConfig;
pub use error::{ConfigError, Result};
pub use pipeline::{
    AmountMatch, AmountPattern, CategoryScore, DictionarySegmenter, InputSignals, KeywordHit, MatchThresholds,
    MatchTier, Segmenter, StageTimings,
};

use serde::Serialize;

/// Byte span into the normalized text (`start` inclusive, `end` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
