// Data models: the types that flow between the loader, the comparison
// engine, and the output layer.
//
// Nothing in here does any work. The engine consumes `Document`s and produces
// a `RunReport`; the classifier turns that into `AssignmentRecord`s for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One extracted submission, as handed to the engine by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier supplied by the caller (drive file id, relative path)
    pub id: String,
    /// User-visible name; the aggregation key for highest-similarity figures
    pub name: String,
    /// Plain text, already extracted from the source file
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
        }
    }

    /// Build a document from per-page text, joined the way the extraction
    /// step does it: every page is followed by a newline.
    pub fn from_pages(
        id: impl Into<String>,
        name: impl Into<String>,
        pages: &[String],
    ) -> Self {
        let mut text = String::new();
        for page in pages {
            text.push_str(page);
            text.push('\n');
        }
        Self::new(id, name, text)
    }
}

/// The score for one unordered pair of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub name_a: String,
    pub name_b: String,
    /// Jaccard coefficient as a percentage (0.0 to 100.0), unrounded
    pub score: f64,
}

/// Highest similarity observed for each document name.
///
/// Keyed by name, not id: two uploads sharing a file name share one slot.
pub type AggregateScores = BTreeMap<String, f64>;

/// Summary numbers for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Mean score over pairs with score > 0 (0.0 when there are none)
    pub mean_of_significant_pairs: f64,
    pub significant_pair_count: usize,
    pub total_pairs: usize,
}

/// Everything a completed comparison run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub aggregates: AggregateScores,
    /// Pairs above the report threshold, in enumeration order
    pub pairs: Vec<PairResult>,
    pub stats: RunStatistics,
    /// Every pair's score in enumeration order (i ascending, then j), kept
    /// so exports can be rebuilt from this run without rescoring
    #[serde(skip)]
    pub pair_scores: Vec<f64>,
}

/// Table metadata for a fetched file, before any scoring has happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_id: String,
    pub file_name: String,
    pub file_type: String,
    pub date_modified: String,
}

/// A row in the assignments table: file metadata plus its highest similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub date_modified: String,
    pub file_name: String,
    pub file_type: String,
    pub file_id: String,
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pages_appends_newline_per_page() {
        let pages = vec!["first page".to_string(), "second page".to_string()];
        let doc = Document::from_pages("id-1", "essay.pdf", &pages);
        assert_eq!(doc.text, "first page\nsecond page\n");
        assert_eq!(doc.name, "essay.pdf");
    }

    #[test]
    fn test_from_pages_empty() {
        let doc = Document::from_pages("id-1", "blank.pdf", &[]);
        assert!(doc.text.is_empty());
    }
}
