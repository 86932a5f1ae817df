//! Word segmentation.
//!
//! Chinese has no mandatory spaces between words, and keyword matching only
//! works at word granularity, so tokenization goes through a [`Segmenter`].
//! The default [`DictionarySegmenter`] does forward maximum matching against a
//! lexicon built from the category table; callers with a better segmenter for
//! their language can plug it in with
//! [`Classifier::with_segmenter`](crate::Classifier::with_segmenter).
//!
//! Character classes handled by the default segmenter:
//!
//! ```text
//! whitespace / punctuation   boundary, never emitted
//! ASCII digits               one token per run, "12.5" kept whole
//! CJK ideographs             forward maximum matching; unknown runs merged
//! other letters              one token per run ("kfc", "café")
//! ```

use std::collections::HashSet;
use std::fmt::Debug;

/// Splits normalized text into word tokens.
///
/// Implementations must be deterministic, must return every token up front,
/// and should prefer multi-character words over single characters.
pub trait Segmenter: Debug + Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Forward-maximum-matching segmenter over a fixed lexicon.
#[derive(Debug, Clone, Default)]
pub struct DictionarySegmenter {
    words: HashSet<String>,
    max_word_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Ideograph,
    Letter,
    Boundary,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            CharClass::Digit
        } else if is_ideograph(c) {
            CharClass::Ideograph
        } else if c.is_alphanumeric() {
            CharClass::Letter
        } else {
            CharClass::Boundary
        }
    }
}

/// CJK unified ideographs (basic block, extension A/B, compatibility).
pub(crate) fn is_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}')
}

impl DictionarySegmenter {
    /// Build a segmenter from lexicon words. Blank entries are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> =
            words.into_iter().map(|w| w.as_ref().trim().to_string()).filter(|w| !w.is_empty()).collect();
        let max_word_chars = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        DictionarySegmenter { words, max_word_chars }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Longest lexicon word starting at `run[0]`, in chars.
    fn longest_word(&self, run: &[char]) -> Option<usize> {
        let limit = self.max_word_chars.min(run.len());
        (1..=limit).rev().find(|&n| {
            let candidate: String = run[..n].iter().collect();
            self.words.contains(&candidate)
        })
    }

    fn segment_ideographs(&self, run: &[char], tokens: &mut Vec<String>) {
        let mut unknown = String::new();
        let mut i = 0;

        while i < run.len() {
            match self.longest_word(&run[i..]) {
                Some(n) => {
                    if !unknown.is_empty() {
                        tokens.push(std::mem::take(&mut unknown));
                    }
                    tokens.push(run[i..i + n].iter().collect());
                    i += n;
                }
                None => {
                    unknown.push(run[i]);
                    i += 1;
                }
            }
        }

        if !unknown.is_empty() {
            tokens.push(unknown);
        }
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let class = CharClass::of(chars[i]);
            let end = match class {
                CharClass::Boundary => {
                    i += 1;
                    continue;
                }
                CharClass::Digit => number_end(&chars, i),
                _ => run_end(&chars, i, class),
            };

            if class == CharClass::Ideograph {
                self.segment_ideographs(&chars[i..end], &mut tokens);
            } else {
                tokens.push(chars[i..end].iter().collect());
            }
            i = end;
        }

        tokens
    }
}

fn run_end(chars: &[char], start: usize, class: CharClass) -> usize {
    let mut end = start;
    while end < chars.len() && CharClass::of(chars[end]) == class {
        end += 1;
    }
    end
}

/// Digits, optionally followed by `.` and more digits.
fn number_end(chars: &[char], start: usize) -> usize {
    let mut end = run_end(chars, start, CharClass::Digit);
    if end + 1 < chars.len() && chars[end] == '.' && chars[end + 1].is_ascii_digit() {
        end = run_end(chars, end + 1, CharClass::Digit);
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> DictionarySegmenter {
        DictionarySegmenter::new(["今天", "午餐", "花了", "块", "打车", "机场", "用了", "元", "看电影", "电影"])
    }

    #[test]
    fn segments_mixed_utterance() {
        assert_eq!(segmenter().segment("今天午餐花了38块"), vec!["今天", "午餐", "花了", "38", "块"]);
    }

    #[test]
    fn unknown_characters_are_merged() {
        assert_eq!(segmenter().segment("打车去机场用了120元"), vec!["打车", "去", "机场", "用了", "120", "元"]);
        assert_eq!(segmenter().segment("看电影票价45元"), vec!["看电影", "票价", "45", "元"]);
    }

    #[test]
    fn longest_match_wins() {
        assert_eq!(segmenter().segment("电影看电影"), vec!["电影", "看电影"]);
    }

    #[test]
    fn decimals_and_latin_runs_stay_whole() {
        assert_eq!(segmenter().segment("kfc 12.5元"), vec!["kfc", "12.5", "元"]);
        assert_eq!(segmenter().segment("test123"), vec!["test", "123"]);
        assert_eq!(segmenter().segment("12."), vec!["12"]);
    }

    #[test]
    fn punctuation_and_spaces_are_dropped() {
        assert_eq!(segmenter().segment("午餐, 打车!"), vec!["午餐", "打车"]);
        assert!(segmenter().segment(",.!? ").is_empty());
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(segmenter().segment("").is_empty());
    }

    #[test]
    fn empty_lexicon_merges_whole_runs() {
        let seg = DictionarySegmenter::new(Vec::<String>::new());
        assert!(seg.is_empty());
        assert_eq!(seg.segment("嗯啊test123"), vec!["嗯啊", "test", "123"]);
    }

    #[test]
    fn blank_lexicon_entries_are_ignored() {
        let seg = DictionarySegmenter::new(["", "  ", "午餐"]);
        assert_eq!(seg.len(), 1);
        assert!(seg.contains("午餐"));
    }
}
