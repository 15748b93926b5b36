//! Tokenizer shared by the in-memory index and the PostgreSQL query builder.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

/// Split text into lower-cased terms, keeping their order.
///
/// Anything that is not a letter or a digit separates terms.
///
/// ```ignore
/// assert_eq!(tokenize("Sore-throat, FEVER"), vec!["sore", "throat", "fever"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Like [`tokenize`], but drops repeated terms after their first occurrence.
pub fn unique_terms(text: &str) -> Vec<String> {
    let mut terms = tokenize(text);
    let mut seen = std::collections::HashSet::new();
    terms.retain(|term| seen.insert(term.clone()));
    terms
}
