//! Amount extraction.
//!
//! Three numeric patterns are tried in strict priority order; the first one
//! that both matches and parses wins, and only its first match in the text is
//! used. A capture that fails to parse as a decimal does not abort the cascade,
//! it just hands over to the next pattern.
//!
//! ```text
//! 1. verb-qualified   花了38块   用了12.5元   支付了200
//! 2. unit-qualified   38块钱     45元         5毛
//! 3. bare numeral     38
//! ```
//!
//! The unit is reported but never used to scale the value: `5毛` extracts `5.00`.

use crate::Span;
use crate::pipeline::InputSignals;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Spending verbs that qualify an amount (pattern 1).
pub(crate) const SPEND_VERBS: &[&str] = &["花了", "用了", "付了", "消费了", "支付了"];

/// Currency unit tokens recognized after a numeral.
pub(crate) const AMOUNT_UNITS: &[&str] = &["块钱", "元", "块", "毛", "分"];

/// Minor-unit precision of extracted amounts.
const AMOUNT_SCALE: u32 = 2;

/// Which pattern in the cascade produced an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPattern {
    VerbQualified,
    UnitQualified,
    Bare,
}

impl AmountPattern {
    /// Patterns in priority order.
    pub const CASCADE: [AmountPattern; 3] =
        [AmountPattern::VerbQualified, AmountPattern::UnitQualified, AmountPattern::Bare];

    pub fn name(self) -> &'static str {
        match self {
            AmountPattern::VerbQualified => "verb_qualified",
            AmountPattern::UnitQualified => "unit_qualified",
            AmountPattern::Bare => "bare",
        }
    }

    /// Group 1 is always the numeral; group 2, when present, the unit.
    pub(crate) fn regex(self) -> &'static Regex {
        match self {
            AmountPattern::VerbQualified => {
                regex!(r"(?:花了|用了|付了|消费了|支付了)([0-9]+(?:\.[0-9]+)?)(元|块|毛|分)?")
            }
            AmountPattern::UnitQualified => regex!(r"([0-9]+(?:\.[0-9]+)?)(块钱|元|块|毛|分)"),
            AmountPattern::Bare => regex!(r"([0-9]+(?:\.[0-9]+)?)"),
        }
    }
}

/// An extracted amount together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountMatch {
    /// Parsed value, scaled to two decimal places.
    pub value: Decimal,
    pub pattern: AmountPattern,
    /// Unit token that followed the numeral, if any.
    pub unit: Option<String>,
    /// Whole matched substring (verb and unit included).
    pub matched: String,
    /// Span of `matched` in the normalized text.
    pub span: Span,
}

/// Run the pattern cascade over normalized text.
///
/// Returns `None` when nothing numeric is stated, which callers must keep
/// distinct from an explicit zero.
pub(crate) fn extract_amount(normalized: &str, signals: InputSignals) -> Option<AmountMatch> {
    if !signals.contains(InputSignals::HAS_DIGITS) {
        return None;
    }

    for pattern in AmountPattern::CASCADE {
        let Some(caps) = pattern.regex().captures(normalized) else {
            continue;
        };
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        match parse_amount(number.as_str()) {
            Some(value) => {
                tracing::trace!(pattern = pattern.name(), matched = whole.as_str(), %value, "amount extracted");
                return Some(AmountMatch {
                    value,
                    pattern,
                    unit: caps.get(2).map(|u| u.as_str().to_string()),
                    matched: whole.as_str().to_string(),
                    span: Span { start: whole.start(), end: whole.end() },
                });
            }
            None => {
                tracing::trace!(pattern = pattern.name(), raw = number.as_str(), "numeral failed to parse");
            }
        }
    }

    None
}

/// Parse a numeral capture into a two-decimal amount.
///
/// Numerals too wide to carry two decimal places in a `Decimal` are rejected.
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut value = Decimal::from_str(raw).ok()?.round_dp(AMOUNT_SCALE);
    value.rescale(AMOUNT_SCALE);
    (value.scale() == AMOUNT_SCALE).then_some(value)
}
