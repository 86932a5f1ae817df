//! Residual description extraction.

use super::amount::AmountPattern;
use regex::Regex;
use std::cmp::Reverse;

/// Verbs removed from the description. Superset of the spending verbs.
pub(crate) const FILLER_VERBS: &[&str] = &["花了", "用了", "付了", "消费了", "支付了", "买了", "去了", "在"];

/// Trimmed from both ends after stripping.
const EDGE_PUNCTUATION: &[char] =
    &[',', '.', '!', '?', ';', ':', '-', '~', '，', '。', '！', '？', '；', '：', '、', '～', '—'];

/// Amount-bearing substrings, in cascade order. The verb-qualified form also
/// swallows a `块钱` unit, which the amount stage reads as `块` plus text.
fn amount_strippers() -> [&'static Regex; 3] {
    [
        regex!(r"(?:花了|用了|付了|消费了|支付了)[0-9]+(?:\.[0-9]+)?(?:块钱|元|块|毛|分)?"),
        AmountPattern::UnitQualified.regex(),
        AmountPattern::Bare.regex(),
    ]
}

/// Strip every amount-bearing substring and filler verb from `normalized`.
///
/// All three amount patterns are applied (every occurrence, not only the one
/// the amount stage picked), then the filler verbs, then edge punctuation. If
/// nothing is left the normalized text itself is returned, so the result is
/// `None` only for empty input.
pub(crate) fn extract_description(normalized: &str) -> Option<String> {
    if normalized.is_empty() {
        return None;
    }

    let mut residual = normalized.to_string();
    for re in amount_strippers() {
        residual = re.replace_all(&residual, "").into_owned();
    }

    // Longest first, so `支付了` is not cut down to `支` by `付了`.
    let mut verbs = FILLER_VERBS.to_vec();
    verbs.sort_by_key(|v| Reverse(v.chars().count()));
    for verb in verbs {
        residual = residual.replace(verb, "");
    }

    let trimmed = residual.trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c));
    if trimmed.is_empty() { Some(normalized.to_string()) } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(text: &str) -> Option<String> {
        extract_description(text)
    }

    #[test]
    fn strips_verb_qualified_amount() {
        assert_eq!(describe("今天午餐花了38块").as_deref(), Some("今天午餐"));
        assert_eq!(describe("打车去机场用了120元").as_deref(), Some("打车去机场"));
    }

    #[test]
    fn strips_unit_qualified_amount() {
        assert_eq!(describe("看电影票价45元").as_deref(), Some("看电影票价"));
        assert_eq!(describe("奶茶15块钱").as_deref(), Some("奶茶"));
    }

    #[test]
    fn strips_every_numeral_not_just_the_first() {
        assert_eq!(describe("花了20, 电话是110").as_deref(), Some("电话是"));
        assert_eq!(describe("2杯咖啡60元").as_deref(), Some("杯咖啡"));
    }

    #[test]
    fn strips_filler_verbs() {
        assert_eq!(describe("在超市买了水果").as_deref(), Some("超市水果"));
        assert_eq!(describe("网费支付了").as_deref(), Some("网费"));
        assert_eq!(describe("在京东支付了一百元").as_deref(), Some("京东一百元"));
        assert_eq!(describe("聚餐消费了").as_deref(), Some("聚餐"));
    }

    #[test]
    fn every_filler_verb_is_removed_whole() {
        for verb in FILLER_VERBS {
            assert_eq!(describe(&format!("网费{verb}")).as_deref(), Some("网费"), "{verb}");
        }
    }

    #[test]
    fn verb_qualified_amount_takes_kuai_qian_with_it() {
        assert_eq!(describe("奶茶花了15块钱").as_deref(), Some("奶茶"));
        assert_eq!(describe("奶茶花了15块").as_deref(), Some("奶茶"));
    }

    #[test]
    fn trims_edge_punctuation_and_spaces() {
        assert_eq!(describe("午餐 38块.").as_deref(), Some("午餐"));
        assert_eq!(describe("~打车!").as_deref(), Some("打车"));
    }

    #[test]
    fn falls_back_to_normalized_text_when_nothing_is_left() {
        assert_eq!(describe("花了38块").as_deref(), Some("花了38块"));
        assert_eq!(describe("100").as_deref(), Some("100"));
    }

    #[test]
    fn empty_input_has_no_description() {
        assert_eq!(describe(""), None);
    }
}
