//! Translation of loosely-spelled legacy field names to [`CanonicalField`]s.
//!
//! Legacy configs never agreed on field spellings (`mean`, `mean_insert_size`,
//! `rEaDlEnGtH`, ...), so a token is matched by looking for a key inside its
//! trailing run of word characters. The key does not have to start the token:
//! `insert_size_stddev` and `average_readlen` are both recognized.

use crate::core::types::CanonicalField;

/// How a key must appear in a token's trailing word run
enum Pattern {
    /// Word run ends with the key
    EndsWith(&'static str),
    /// Word run contains the key
    Contains(&'static str),
    /// Word run contains the first key and, later, the second
    ContainsInOrder(&'static str, &'static str),
}

impl Pattern {
    fn matches(&self, word: &str) -> bool {
        match self {
            Self::EndsWith(key) => word.ends_with(key),
            Self::Contains(key) => word.contains(key),
            Self::ContainsInOrder(first, second) => word
                .find(first)
                .is_some_and(|pos| word[pos + first.len()..].contains(second)),
        }
    }
}

/// Patterns in evaluation order; the first match wins
const PATTERNS: [(Pattern, CanonicalField); 9] = [
    (Pattern::EndsWith("map"), CanonicalField::BamFile),
    (Pattern::Contains("mean"), CanonicalField::InsertSizeMean),
    (Pattern::Contains("std"), CanonicalField::InsertSizeStddev),
    (Pattern::Contains("readlen"), CanonicalField::ReadLength),
    (Pattern::Contains("upp"), CanonicalField::InsertSizeUpperCutoff),
    (Pattern::Contains("low"), CanonicalField::InsertSizeLowerCutoff),
    (Pattern::ContainsInOrder("map", "qual"), CanonicalField::MinMapQual),
    (Pattern::Contains("lib"), CanonicalField::LibraryName),
    (Pattern::Contains("samp"), CanonicalField::SampleName),
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Classify a legacy field name, ignoring case.
///
/// Returns `None` for tokens that don't look like any known field.
///
/// ```
/// use bam_config::parsing::token::classify;
/// use bam_config::CanonicalField;
///
/// assert_eq!(classify("mean_insert_size"), Some(CanonicalField::InsertSizeMean));
/// assert_eq!(classify("mapPing_quAlity"), Some(CanonicalField::MinMapQual));
/// assert_eq!(classify("readgroup"), None);
/// ```
#[must_use]
pub fn classify(token: &str) -> Option<CanonicalField> {
    let lowered = token.to_ascii_lowercase();
    let word_start = lowered
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let word = &lowered[word_start..];

    PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.matches(word))
        .map(|&(_, field)| field)
}
