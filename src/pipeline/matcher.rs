//! Category scoring.
//!
//! Every category is scored against every token. For each `(token, keyword)`
//! pair only the best tier counts:
//!
//! ```text
//! Exact      token == keyword                          +1.0
//! Substring  token ⊂ keyword or keyword ⊂ token        +0.7
//! Fuzzy      normalized_levenshtein > fuzzy            +0.5
//! ```
//!
//! A category's score is the sum over all pairs divided by the number of
//! tokens (never the number of keywords), capped at 1.0. The highest score
//! wins; ties go to the category declared first. A winner below the acceptance
//! threshold is replaced by the fallback category with confidence 1.0, which
//! means "certainly the default bucket", not "strong match".

use crate::categories::CategoryTable;
use serde::Serialize;

/// Score thresholds used by [`match_category`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchThresholds {
    /// Minimum normalized score for a category to be accepted.
    pub acceptance: f64,
    /// Similarity a pair must exceed to count as a fuzzy match.
    pub fuzzy: f64,
}

impl MatchThresholds {
    pub const DEFAULT_ACCEPTANCE: f64 = 0.3;
    pub const DEFAULT_FUZZY: f64 = 0.8;
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self { acceptance: Self::DEFAULT_ACCEPTANCE, fuzzy: Self::DEFAULT_FUZZY }
    }
}

/// How a token matched a keyword. Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Fuzzy,
    Substring,
    Exact,
}

impl MatchTier {
    pub fn weight(self) -> f64 {
        match self {
            MatchTier::Exact => 1.0,
            MatchTier::Substring => 0.7,
            MatchTier::Fuzzy => 0.5,
        }
    }
}

/// One scoring `(token, keyword)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub token: String,
    pub keyword: String,
    pub tier: MatchTier,
}

/// Score of a single category for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    /// Sum of hit weights.
    pub raw: f64,
    /// `raw / token_count`, capped at 1.0.
    pub score: f64,
    pub hits: Vec<KeywordHit>,
}

/// Outcome of category matching.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryMatch {
    pub category: String,
    pub confidence: f64,
    /// True when the acceptance threshold forced the fallback category.
    pub fallback: bool,
    /// Scores for every category, in table order.
    pub scores: Vec<CategoryScore>,
}

/// Score every category in `table` against `tokens` and pick the winner.
pub(crate) fn match_category(tokens: &[String], table: &CategoryTable, thresholds: &MatchThresholds) -> CategoryMatch {
    let scores: Vec<CategoryScore> = table
        .categories()
        .iter()
        .map(|category| {
            let mut raw = 0.0;
            let mut hits = Vec::new();
            for token in tokens {
                for keyword in &category.keywords {
                    if let Some(tier) = best_tier(token, keyword, thresholds.fuzzy) {
                        raw += tier.weight();
                        hits.push(KeywordHit { token: token.clone(), keyword: keyword.clone(), tier });
                    }
                }
            }
            let score = if tokens.is_empty() { 0.0 } else { (raw / tokens.len() as f64).min(1.0) };
            CategoryScore { category: category.id.clone(), raw, score, hits }
        })
        .collect();

    // Strict `>` keeps the first category in table order on ties.
    let mut best: Option<&CategoryScore> = None;
    for candidate in &scores {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    let (category, confidence, fallback) = match best {
        Some(b) if b.score >= thresholds.acceptance => (b.category.clone(), b.score, false),
        _ => (table.fallback().id.clone(), 1.0, true),
    };

    tracing::trace!(tokens = tokens.len(), %category, confidence, fallback, "category matched");

    CategoryMatch { category, confidence, fallback, scores }
}

/// Strongest tier linking `token` and `keyword`, if any.
pub(crate) fn best_tier(token: &str, keyword: &str, fuzzy_threshold: f64) -> Option<MatchTier> {
    if token == keyword {
        Some(MatchTier::Exact)
    } else if token.contains(keyword) || keyword.contains(token) {
        Some(MatchTier::Substring)
    } else if strsim::normalized_levenshtein(token, keyword) > fuzzy_threshold {
        Some(MatchTier::Fuzzy)
    } else {
        None
    }
}
