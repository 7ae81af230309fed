//! Text normalization for search and name ordering.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize text for case-insensitive matching: NFKC followed by Unicode lowercase.
pub fn fold(input: &str) -> String {
    input.nfkc().collect::<String>().to_lowercase()
}

/// Whether `haystack` contains `needle` once both are folded.
///
/// An empty needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || fold(haystack).contains(&fold(needle))
}

/// Collation key used for name ordering.
///
/// Accents are stripped after canonical decomposition so that "Árbol" sorts with "arbol".
pub fn collation_key(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
