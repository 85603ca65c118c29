// Jaccard similarity over token sets.
//
//   score = |a ∩ b| / |a ∪ b| * 100
//
// Identical non-empty vocabularies score 100.0, disjoint ones 0.0. An empty
// side always scores 0.0; a blank submission never matches anything,
// including another blank submission.

use super::tokenize::{normalize, TokenSet};

/// Score two token sets as a percentage in [0, 100]. No rounding.
pub fn similarity(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection_len(b);
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64 * 100.0
}

/// Normalize both texts and score them.
///
/// Convenience for one-off comparisons; the driver caches token sets instead.
pub fn text_similarity(text_a: &str, text_b: &str) -> f64 {
    similarity(&normalize(text_a), &normalize(text_b))
}
