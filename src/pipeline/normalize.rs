//! Text normalization.
//!
//! Every later stage (and every keyword in the category table) sees text in
//! this form, so matching never has to care about case or full-width
//! sentence punctuation.

/// Trim, fold full-width comma/period to ASCII, and case-fold.
///
/// Empty input yields empty output; downstream stages read that as "nothing
/// found" rather than an error.
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '，' => ',',
            '。' => '.',
            _ => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}
