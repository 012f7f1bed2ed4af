//! Accent- and case-insensitive text comparison.

use unicode_normalization::UnicodeNormalization;

/// Lower-case, strip diacritics and trim surrounding whitespace.
///
/// `"  École "` and `"ecole"` normalize to the same string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Combining diacritical marks block, U+0300..=U+036F.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// True when `haystack` contains `needle` after both are normalized.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}
