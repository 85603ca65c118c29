// Assignments list view: per-file records, flag filtering, and search.
//
// Every function here returns a fresh list. Nothing patches a previously
// returned view; a new fetch or a new run rebuilds the records from scratch.

use serde::Serialize;

use super::bands::is_flagged;
use crate::models::{AggregateScores, AssignmentRecord, FileMetadata};

/// Zip table metadata with a run's aggregate scores.
///
/// Files whose name never made it into the run score 0.0.
pub fn build_records(metadata: &[FileMetadata], aggregates: &AggregateScores) -> Vec<AssignmentRecord> {
    metadata
        .iter()
        .map(|meta| AssignmentRecord {
            date_modified: meta.date_modified.clone(),
            file_name: meta.file_name.clone(),
            file_type: meta.file_type.clone(),
            file_id: meta.file_id.clone(),
            similarity: aggregates.get(&meta.file_name).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Records with no score yet, for display before any comparison has run.
pub fn unscored_records(metadata: &[FileMetadata]) -> Vec<AssignmentRecord> {
    build_records(metadata, &AggregateScores::new())
}

/// All records, or only the flagged ones, in their original order.
pub fn filter_records(records: &[AssignmentRecord], high_similarity_only: bool) -> Vec<AssignmentRecord> {
    records
        .iter()
        .filter(|r| !high_similarity_only || is_flagged(r.similarity))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over "<file name> <file type>".
///
/// An empty query matches everything.
pub fn search_records(records: &[AssignmentRecord], query: &str) -> Vec<AssignmentRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            query.is_empty()
                || format!("{} {}", r.file_name, r.file_type)
                    .to_lowercase()
                    .contains(&query)
        })
        .cloned()
        .collect()
}

/// Headline counts for the assignments table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub total_count: usize,
    pub flagged_count: usize,
}

impl RecordSummary {
    /// Always computed over the unfiltered records.
    pub fn from_records(records: &[AssignmentRecord]) -> Self {
        Self {
            total_count: records.len(),
            flagged_count: records.iter().filter(|r| is_flagged(r.similarity)).count(),
        }
    }
}

/// What the assignments table shows: the visible rows plus the summary of
/// the full set they were filtered from.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView {
    pub records: Vec<AssignmentRecord>,
    pub summary: RecordSummary,
}

pub fn filtered_view(records: &[AssignmentRecord], high_similarity_only: bool) -> FilteredView {
    FilteredView {
        records: filter_records(records, high_similarity_only),
        summary: RecordSummary::from_records(records),
    }
}

/// Holds the current assignments table between refreshes.
///
/// Contents are only ever replaced wholesale: on a new fetch, on logout
/// (`clear`), and before every comparison run.
#[derive(Debug, Default)]
pub struct RecordBook {
    records: Vec<AssignmentRecord>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, records: Vec<AssignmentRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn view(&self, high_similarity_only: bool) -> FilteredView {
        filtered_view(&self.records, high_similarity_only)
    }
}
