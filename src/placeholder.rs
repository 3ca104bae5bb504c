//! Placeholder token extraction and restoration.
//!
//! Message texts carry in-text markers of the form `__identifier__` that a
//! translation service treats as ordinary words and may reorder, recase, or
//! otherwise mangle. After translating, the tokens found in the raw
//! translation are replaced, position by position, with the tokens from the
//! original text so they keep working as substitution keys.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"__\w+__").unwrap();
}

/// Extracts placeholder tokens from a string in occurrence order.
pub fn extract(text: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// Restores the original placeholder tokens in a raw translated string.
///
/// When the original and the translation contain the same number of tokens,
/// the token at the i-th match position in the translation is replaced by
/// the i-th original token, one substitution per position. Splicing by match
/// range keeps the pairing strictly positional even when the translation
/// already contains one of the original tokens at a later position. When the
/// counts differ there is no way to pair them up, so the raw translation is
/// returned unchanged; a mangled placeholder in the output beats a wrong one.
pub fn restore(original: &str, translated: &str) -> String {
    let original_tokens = extract(original);
    let matches: Vec<_> = PLACEHOLDER_REGEX.find_iter(translated).collect();

    if original_tokens.len() != matches.len() {
        return translated.to_string();
    }

    let mut result = String::with_capacity(translated.len());
    let mut tail = 0;
    for (m, token) in matches.iter().zip(original_tokens) {
        result.push_str(&translated[tail..m.start()]);
        result.push_str(token);
        tail = m.end();
    }
    result.push_str(&translated[tail..]);
    result
}
