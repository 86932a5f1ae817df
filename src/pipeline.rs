//! Classification pipeline stages.
//!
//! Each stage is a stateless transform over the normalized utterance. The
//! [`Classifier`](crate::Classifier) runs them in a fixed order:
//!
//! ```text
//! raw text ── normalize ──┬─ InputSignals::scan      (signals.rs)
//!            (normalize.rs)│
//!                          ├─ extract_amount          (amount.rs)
//!                          │    verb-qualified > unit-qualified > bare numeral
//!                          │
//!                          ├─ Segmenter::segment      (tokenize.rs)
//!                          │        │
//!                          │        v
//!                          │  match_category          (matcher.rs)
//!                          │    exact / substring / fuzzy per token × keyword
//!                          │
//!                          └─ extract_description     (describe.rs)
//!                               strip amounts + filler verbs
//! ```
//!
//! ## Responsibilities by module
//!
//! - `signals.rs`: cheap bitflag scan of the normalized text, used to skip the
//!   amount cascade when there is nothing numeric to find.
//! - `normalize.rs`: trimming, full-width punctuation folding, case folding.
//! - `amount.rs`: the ordered numeric pattern cascade and decimal parsing.
//! - `tokenize.rs`: the [`Segmenter`] seam and the default dictionary
//!   segmenter (forward maximum matching).
//! - `matcher.rs`: per-category scoring, thresholding and the fallback policy.
//! - `describe.rs`: residual description extraction.
//! - `metrics.rs`: per-stage timings surfaced by the verbose API.
//!
//! No stage returns an error. Absence (`None`, zero tokens, fallback category)
//! is the normal outcome for ambiguous input.

#[path = "pipeline/amount.rs"]
mod amount;
#[path = "pipeline/describe.rs"]
mod describe;
#[path = "pipeline/matcher.rs"]
mod matcher;
#[path = "pipeline/metrics.rs"]
mod metrics;
#[path = "pipeline/normalize.rs"]
mod normalize;
#[path = "pipeline/signals.rs"]
mod signals;
#[path = "pipeline/tokenize.rs"]
mod tokenize;

pub use amount::{AmountMatch, AmountPattern};
pub use matcher::{CategoryScore, KeywordHit, MatchThresholds, MatchTier};
pub use metrics::StageTimings;
pub use signals::InputSignals;
pub use tokenize::{DictionarySegmenter, Segmenter};

pub(crate) use amount::{AMOUNT_UNITS, SPEND_VERBS, extract_amount};
pub(crate) use describe::{FILLER_VERBS, extract_description};
pub(crate) use matcher::match_category;
pub(crate) use metrics::timed;
pub(crate) use normalize::normalize;
