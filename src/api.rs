use crate::categories::{BUILTIN_FALLBACK, COMMON_WORDS, CategoryTable, builtin_definitions};
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::pipeline::{
    self, AMOUNT_UNITS, AmountMatch, CategoryScore, DictionarySegmenter, FILLER_VERBS, InputSignals, MatchThresholds,
    SPEND_VERBS, Segmenter, StageTimings, timed,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Named category table to use (see [`ClassifierSet`]). `None` selects
    /// the default table.
    pub table: Option<String>,
}

/// A transaction candidate parsed from one utterance.
///
/// Owned by the caller; the classifier keeps nothing after returning it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Id of the chosen category.
    pub category: String,
    /// In `[0.0, 1.0]`. Exactly `1.0` when `fallback` is set.
    pub confidence: f64,
    /// Stated amount with two decimal places, if any numeral was found.
    pub extracted_amount: Option<Decimal>,
    /// Residual description; `None` only for empty input.
    pub extracted_description: Option<String>,
    /// True when no category cleared the acceptance threshold and the
    /// fallback category was assigned. Distinguishes "confident default" from
    /// "confident specific match".
    pub fallback: bool,
}

/// Intermediate values of one classification.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationDetails {
    pub normalized: String,
    pub signals: InputSignals,
    pub tokens: Vec<String>,
    pub amount: Option<AmountMatch>,
    /// Every category's score, in table order.
    pub scores: Vec<CategoryScore>,
    pub timings: StageTimings,
}

/// Result from [`Classifier::classify_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationVerbose {
    pub text: String,
    pub result: ClassificationResult,
    pub details: ClassificationDetails,
}

/// The classification pipeline.
///
/// Holds only the read-only category table, thresholds and segmenter, so one
/// instance can be shared across threads and called concurrently. Replacing
/// the table means building a new `Classifier`.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Arc<CategoryTable>,
    thresholds: MatchThresholds,
    segmenter: Arc<dyn Segmenter>,
}

impl Classifier {
    /// Classifier over the builtin category table with default thresholds.
    pub fn builtin() -> Self {
        let table = CategoryTable::assemble(builtin_definitions(), BUILTIN_FALLBACK)
            .unwrap_or_else(|| unreachable!("builtin table declares its fallback category"));
        Self::assemble(table, MatchThresholds::default())
    }

    /// Validate `config` and build a classifier from it.
    pub fn from_config(config: ClassifierConfig) -> Result<Self> {
        let thresholds = config.thresholds()?;
        let table = CategoryTable::new(config.categories, &config.fallback)?;
        Ok(Self::assemble(table, thresholds))
    }

    fn assemble(table: CategoryTable, thresholds: MatchThresholds) -> Self {
        let segmenter = DictionarySegmenter::new(
            table
                .keywords()
                .chain(SPEND_VERBS.iter().copied())
                .chain(FILLER_VERBS.iter().copied())
                .chain(AMOUNT_UNITS.iter().copied())
                .chain(COMMON_WORDS.iter().copied()),
        );
        tracing::debug!(categories = table.len(), lexicon = segmenter.len(), "classifier assembled");
        Classifier { table: Arc::new(table), thresholds, segmenter: Arc::new(segmenter) }
    }

    /// Replace the word segmenter, e.g. with one backed by a full dictionary.
    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Arc::new(segmenter);
        self
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Classify one utterance.
    ///
    /// # Example
    /// ```
    /// use voxpense::Classifier;
    ///
    /// let result = Classifier::builtin().classify("今天午餐花了38块");
    /// assert_eq!(result.category, "food");
    /// assert_eq!(result.extracted_description.as_deref(), Some("今天午餐"));
    /// ```
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.run(text).0
    }

    /// Classify `text` and return the intermediate values as well.
    pub fn classify_verbose(&self, text: &str) -> ClassificationVerbose {
        let (result, details) = self.run(text);
        ClassificationVerbose { text: text.to_string(), result, details }
    }

    fn run(&self, text: &str) -> (ClassificationResult, ClassificationDetails) {
        let start = Instant::now();
        let mut timings = StageTimings::default();

        let (normalized, elapsed) = timed(|| pipeline::normalize(text));
        timings.normalize = elapsed;
        let signals = InputSignals::scan(&normalized);

        let (amount, elapsed) = timed(|| pipeline::extract_amount(&normalized, signals));
        timings.amount = elapsed;

        let (tokens, elapsed) = timed(|| self.segmenter.segment(&normalized));
        timings.tokenize = elapsed;
        tracing::trace!(?tokens, "segmented");

        let (matched, elapsed) = timed(|| pipeline::match_category(&tokens, &self.table, &self.thresholds));
        timings.matching = elapsed;

        let (description, elapsed) = timed(|| pipeline::extract_description(&normalized));
        timings.describe = elapsed;
        timings.total = start.elapsed();

        let result = ClassificationResult {
            category: matched.category,
            confidence: matched.confidence,
            extracted_amount: amount.as_ref().map(|m| m.value),
            extracted_description: description,
            fallback: matched.fallback,
        };

        tracing::debug!(
            category = %result.category,
            confidence = result.confidence,
            fallback = result.fallback,
            amount = ?result.extracted_amount,
            "classified utterance"
        );

        let details =
            ClassificationDetails { normalized, signals, tokens, amount, scores: matched.scores, timings };
        (result, details)
    }
}

/// Several classifiers addressable by table id, with a default.
#[derive(Debug, Clone)]
pub struct ClassifierSet {
    default: Classifier,
    tables: BTreeMap<String, Classifier>,
}

impl ClassifierSet {
    pub fn new(default: Classifier) -> Self {
        ClassifierSet { default, tables: BTreeMap::new() }
    }

    /// Register `classifier` under `id`, replacing any previous entry.
    pub fn with_table(mut self, id: impl Into<String>, classifier: Classifier) -> Self {
        self.tables.insert(id.into(), classifier);
        self
    }

    /// Classifier selected by `options`. Unknown ids resolve to the default.
    pub fn resolve(&self, options: &Options) -> &Classifier {
        match options.table.as_deref() {
            None => &self.default,
            Some(id) => self.tables.get(id).unwrap_or_else(|| {
                tracing::warn!(table = id, "unknown category table, using default");
                &self.default
            }),
        }
    }

    pub fn table_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn classify_with(&self, text: &str, options: &Options) -> ClassificationResult {
        self.resolve(options).classify(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryDefinition;
    use crate::pipeline::AmountPattern;
    use std::time::Duration;

    fn pets_classifier() -> Classifier {
        let config = ClassifierConfig {
            fallback: "misc".to_string(),
            acceptance_threshold: 0.3,
            fuzzy_threshold: 0.8,
            categories: vec![
                CategoryDefinition {
                    id: "pets".to_string(),
                    name: None,
                    keywords: vec!["猫粮".to_string(), "宠物".to_string()],
                },
                CategoryDefinition { id: "misc".to_string(), name: None, keywords: vec![] },
            ],
        };
        Classifier::from_config(config).unwrap()
    }

    #[test]
    fn verbose_exposes_intermediate_values() {
        let out = Classifier::builtin().classify_verbose("今天午餐花了38块");

        assert_eq!(out.text, "今天午餐花了38块");
        assert_eq!(out.details.normalized, "今天午餐花了38块");
        assert_eq!(out.details.tokens, vec!["今天", "午餐", "花了", "38", "块"]);
        assert!(out.details.signals.contains(InputSignals::HAS_SPEND_VERB));

        let amount = out.details.amount.as_ref().unwrap();
        assert_eq!(amount.pattern, AmountPattern::VerbQualified);
        assert_eq!(out.result.extracted_amount, Some(amount.value));

        assert_eq!(out.details.scores.len(), Classifier::builtin().table().len());
        let food = &out.details.scores[0];
        assert_eq!(food.category, "food");
        assert_eq!(food.score, out.result.confidence);
        assert!(food.hits.iter().any(|h| h.keyword == "午餐"));

        assert!(out.details.timings.total >= Duration::ZERO);
        assert!(out.details.timings.matching <= out.details.timings.total);
    }

    #[test]
    fn classify_matches_verbose_result() {
        let classifier = Classifier::builtin();
        for text in ["打车去机场用了120元", "", "嗯啊test123"] {
            assert_eq!(classifier.classify(text), classifier.classify_verbose(text).result);
        }
    }

    #[test]
    fn custom_config_drives_lexicon_and_fallback() {
        let classifier = pets_classifier();

        let out = classifier.classify_verbose("猫粮花了80");
        assert!(out.details.tokens.contains(&"猫粮".to_string()));
        assert_eq!(out.result.category, "pets");
        assert_eq!(out.result.extracted_amount.map(|a| a.to_string()).as_deref(), Some("80.00"));

        let out = classifier.classify("午餐花了38块");
        assert_eq!(out.category, "misc");
        assert!(out.fallback);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ClassifierConfig::builtin();
        config.fallback = "nope".to_string();
        assert!(Classifier::from_config(config).is_err());

        let mut config = ClassifierConfig::builtin();
        config.fuzzy_threshold = -0.1;
        assert!(Classifier::from_config(config).is_err());
    }

    #[derive(Debug)]
    struct WhitespaceSegmenter;

    impl Segmenter for WhitespaceSegmenter {
        fn segment(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }
    }

    #[test]
    fn segmenter_is_pluggable() {
        let classifier = Classifier::builtin().with_segmenter(WhitespaceSegmenter);
        let out = classifier.classify_verbose("打车 机场 120元");
        assert_eq!(out.details.tokens, vec!["打车", "机场", "120元"]);
        assert_eq!(out.result.category, "transport");
    }

    #[test]
    fn classifier_set_resolves_tables() {
        let set = ClassifierSet::new(Classifier::builtin()).with_table("pets", pets_classifier());
        assert_eq!(set.table_ids().collect::<Vec<_>>(), vec!["pets"]);

        let default = set.classify_with("猫粮80元", &Options::default());
        assert!(default.fallback);

        let pets = set.classify_with("猫粮80元", &Options { table: Some("pets".into()) });
        assert_eq!(pets.category, "pets");

        let unknown = set.classify_with("午餐", &Options { table: Some("fr-FR".into()) });
        assert_eq!(unknown.category, "food");
    }

    #[test]
    fn shared_across_threads() {
        let classifier = Classifier::builtin();
        let expected = classifier.classify("看电影票价45元");

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| classifier.classify("看电影票价45元"))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn result_serializes_to_json() {
        let result = Classifier::builtin().classify("打车去机场用了120元");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "transport");
        assert_eq!(json["extracted_amount"], "120.00");
        assert_eq!(json["fallback"], false);
    }

    #[test]
    fn verbose_serializes_details_to_json() {
        let out = Classifier::builtin().classify_verbose("今天午餐花了38块");
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["result"]["category"], "food");
        assert_eq!(json["details"]["tokens"][1], "午餐");
        assert_eq!(json["details"]["amount"]["value"], "38.00");
        assert_eq!(json["details"]["amount"]["pattern"], "verb_qualified");
        assert_eq!(json["details"]["amount"]["span"]["start"], 12);
        assert_eq!(json["details"]["scores"][0]["hits"][0]["token"], "午餐");
        assert_eq!(json["details"]["scores"][0]["hits"][0]["tier"], "substring");
        assert!(json["details"]["signals"].as_str().unwrap().contains("HAS_DIGITS"));
        assert!(json["details"]["timings"]["total"].is_object());
    }
}
