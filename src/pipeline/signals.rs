//! Coarse input signals.
//!
//! A single pass over the normalized text produces a handful of booleans that
//! let later stages skip work that cannot succeed. The scan is a heuristic:
//! false positives are harmless because the real stages still have to match.
//!
//! Currently only `HAS_DIGITS` gates anything (the amount cascade). The other
//! bits are reported in verbose details to make misclassifications easier to
//! read.

use super::amount::SPEND_VERBS;
use super::tokenize::is_ideograph;
use serde::Serialize;

bitflags::bitflags! {
    /// Characteristics of a normalized utterance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct InputSignals: u8 {
        const HAS_DIGITS     = 1 << 0;
        const HAS_IDEOGRAPHS = 1 << 1;
        const HAS_LATIN      = 1 << 2;
        const HAS_SPEND_VERB = 1 << 3;
    }
}

impl InputSignals {
    /// Scan `normalized` text.
    pub fn scan(normalized: &str) -> Self {
        let mut signals = InputSignals::empty();

        for c in normalized.chars() {
            if c.is_ascii_digit() {
                signals |= InputSignals::HAS_DIGITS;
            } else if c.is_ascii_alphabetic() {
                signals |= InputSignals::HAS_LATIN;
            } else if is_ideograph(c) {
                signals |= InputSignals::HAS_IDEOGRAPHS;
            }
        }

        if signals.contains(InputSignals::HAS_IDEOGRAPHS) && SPEND_VERBS.iter().any(|v| normalized.contains(v)) {
            signals |= InputSignals::HAS_SPEND_VERB;
        }

        signals
    }
}
