// Text normalization: turns raw document text into a set of comparable tokens.
//
// This is a set-similarity design: word multiplicity is thrown away, so
// "the the the" and "the" normalize to the same set.

use std::collections::HashSet;

/// Characters replaced with a space before splitting into words.
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}',
];

/// The normalized vocabulary of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(HashSet<String>);

impl TokenSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tokens present in both sets.
    pub fn intersection_len(&self, other: &TokenSet) -> usize {
        // Walk the smaller set
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.0.iter().filter(|t| large.0.contains(*t)).count()
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lower-case, strip punctuation, split on whitespace, and collect into a set.
///
/// Empty or whitespace-only input yields an empty set.
pub fn normalize(text: &str) -> TokenSet {
    text.to_lowercase()
        .replace(PUNCTUATION, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
