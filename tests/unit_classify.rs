// Unit tests for classification: severity bands, the flagged-list filter,
// and the comparison matrix.

use copycat::classify::bands::{
    class_average_warning, is_flagged, is_report_worthy, PairBand, RowBand, CLASS_AVERAGE_WARNING,
    FLAG_THRESHOLD, MATRIX_MODERATE, MATRIX_SEVERE, REPORT_THRESHOLD, ROW_MODERATE, ROW_SEVERE,
};
use copycat::classify::matrix::{build_matrix, build_matrix_for, MatrixSummary};
use copycat::classify::records::{
    build_records, filter_records, filtered_view, search_records, RecordBook, RecordSummary,
};
use copycat::models::{AggregateScores, AssignmentRecord, FileMetadata, PairResult};

fn record(name: &str, similarity: f64) -> AssignmentRecord {
    AssignmentRecord {
        date_modified: "2024-09-01 09:30".to_string(),
        file_name: name.to_string(),
        file_type: "txt".to_string(),
        file_id: format!("id-{name}"),
        similarity,
    }
}

fn pair(a: &str, b: &str, score: f64) -> PairResult {
    PairResult {
        name_a: a.to_string(),
        name_b: b.to_string(),
        score,
    }
}

fn sample_records() -> Vec<AssignmentRecord> {
    vec![
        record("alice.txt", 12.0),
        record("bob.txt", 30.0),
        record("carol.txt", 30.5),
        record("dave.txt", 88.0),
        record("erin.txt", 0.0),
        record("frank.txt", 51.0),
    ]
}

// ============================================================
// Band thresholds
// ============================================================

#[test]
fn threshold_values() {
    assert_eq!(REPORT_THRESHOLD, 20.0);
    assert_eq!(MATRIX_MODERATE, 35.0);
    assert_eq!(MATRIX_SEVERE, 50.0);
    assert_eq!(FLAG_THRESHOLD, 30.0);
    assert_eq!(ROW_MODERATE, 50.0);
    assert_eq!(ROW_SEVERE, 70.0);
    assert_eq!(CLASS_AVERAGE_WARNING, 50.0);
}

#[test]
fn every_band_is_strictly_greater_than() {
    assert!(!is_report_worthy(REPORT_THRESHOLD));
    assert!(!is_flagged(FLAG_THRESHOLD));
    assert!(!class_average_warning(CLASS_AVERAGE_WARNING));
    assert_eq!(PairBand::from_score(MATRIX_MODERATE), PairBand::Low);
    assert_eq!(PairBand::from_score(MATRIX_SEVERE), PairBand::Moderate);
    assert_eq!(RowBand::from_score(ROW_MODERATE), RowBand::Normal);
    assert_eq!(RowBand::from_score(ROW_SEVERE), RowBand::Moderate);
}

#[test]
fn bands_at_extremes() {
    assert_eq!(PairBand::from_score(0.0), PairBand::Low);
    assert_eq!(PairBand::from_score(100.0), PairBand::Severe);
    assert_eq!(RowBand::from_score(0.0), RowBand::Normal);
    assert_eq!(RowBand::from_score(100.0), RowBand::Severe);
}

#[test]
fn band_display_matches_as_str() {
    for band in [PairBand::Low, PairBand::Moderate, PairBand::Severe] {
        assert_eq!(band.to_string(), band.as_str());
    }
    for band in [RowBand::Normal, RowBand::Moderate, RowBand::Severe] {
        assert_eq!(band.to_string(), band.as_str());
    }
}

// ============================================================
// Flagged-list filter
// ============================================================

#[test]
fn filter_off_returns_everything_in_order() {
    let records = sample_records();
    assert_eq!(filter_records(&records, false), records);
}

#[test]
fn filter_on_keeps_exactly_the_flagged_records() {
    let records = sample_records();
    let flagged = filter_records(&records, true);

    let names: Vec<&str> = flagged.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["carol.txt", "dave.txt", "frank.txt"]);

    assert!(flagged.iter().all(|r| r.similarity > 30.0));
    let omitted: Vec<_> = records.iter().filter(|r| !flagged.contains(r)).collect();
    assert!(omitted.iter().all(|r| r.similarity <= 30.0));
}

#[test]
fn summary_counts_come_from_unfiltered_set() {
    let records = sample_records();

    let all = filtered_view(&records, false);
    let flagged_only = filtered_view(&records, true);

    assert_eq!(all.summary, flagged_only.summary);
    assert_eq!(
        flagged_only.summary,
        RecordSummary {
            total_count: 6,
            flagged_count: 3
        }
    );
    assert_eq!(flagged_only.records.len(), 3);
}

#[test]
fn filter_returns_a_new_list_each_time() {
    let records = sample_records();
    let mut first = filter_records(&records, true);
    first.clear();
    assert_eq!(filter_records(&records, true).len(), 3);
    assert_eq!(records.len(), 6);
}

#[test]
fn filter_empty_input() {
    assert!(filter_records(&[], true).is_empty());
    assert_eq!(RecordSummary::from_records(&[]), RecordSummary::default());
}

#[test]
fn search_is_case_insensitive_and_covers_type() {
    let mut records = sample_records();
    records.push(AssignmentRecord {
        file_type: "md".to_string(),
        ..record("Notes.MD", 0.0)
    });

    assert_eq!(search_records(&records, "DAVE").len(), 1);
    assert_eq!(search_records(&records, "notes").len(), 1);
    assert_eq!(search_records(&records, " md").len(), 1);
    assert_eq!(search_records(&records, "txt").len(), 6);
    assert_eq!(search_records(&records, "").len(), 7);
}

#[test]
fn build_records_zips_metadata_with_aggregates() {
    let metadata = vec![
        FileMetadata {
            file_id: "1".to_string(),
            file_name: "a.txt".to_string(),
            file_type: "txt".to_string(),
            date_modified: "2024-01-01 00:00".to_string(),
        },
        FileMetadata {
            file_id: "2".to_string(),
            file_name: "b.txt".to_string(),
            file_type: "txt".to_string(),
            date_modified: "2024-01-02 00:00".to_string(),
        },
    ];
    let mut aggregates = AggregateScores::new();
    aggregates.insert("b.txt".to_string(), 64.5);
    aggregates.insert("not-in-table.txt".to_string(), 99.0);

    let records = build_records(&metadata, &aggregates);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].similarity, 0.0);
    assert_eq!(records[1].similarity, 64.5);
    assert_eq!(records[1].file_id, "2");
}

#[test]
fn record_book_view_reflects_latest_replace() {
    let mut book = RecordBook::new();
    book.replace(sample_records());
    assert_eq!(book.view(true).summary.flagged_count, 3);

    book.replace(vec![record("solo.txt", 99.0)]);
    let view = book.view(false);
    assert_eq!(view.summary.total_count, 1);
    assert_eq!(view.summary.flagged_count, 1);

    book.clear();
    assert_eq!(book.view(false).summary, RecordSummary::default());
}

// ============================================================
// Comparison matrix
// ============================================================

#[test]
fn matrix_is_symmetric_with_blank_diagonal() {
    let pairs = vec![
        pair("b.txt", "a.txt", 45.0),
        pair("c.txt", "a.txt", 22.0),
        pair("d.txt", "b.txt", 80.0),
    ];
    let m = build_matrix(&pairs);

    assert_eq!(m.names, vec!["a.txt", "b.txt", "c.txt", "d.txt"]);
    for i in 0..m.len() {
        assert_eq!(m.get(i, i), None);
        for j in 0..m.len() {
            assert_eq!(m.cells[i][j], m.cells[j][i]);
        }
    }
    assert_eq!(m.get(0, 1), Some(45.0));
    assert_eq!(m.get(1, 3), Some(80.0));
    // Not in the pair list: zero placeholder
    assert_eq!(m.get(2, 3), Some(0.0));
}

#[test]
fn matrix_names_are_unique() {
    let pairs = vec![pair("a", "b", 30.0), pair("a", "b", 30.0), pair("b", "a", 30.0)];
    let m = build_matrix(&pairs);
    assert_eq!(m.names, vec!["a", "b"]);
}

#[test]
fn matrix_for_display_batch_skips_unknown_names() {
    let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let pairs = vec![pair("a", "b", 40.0), pair("a", "removed", 90.0), pair("gone", "c", 70.0)];
    let m = build_matrix_for(names, &pairs);

    assert_eq!(m.len(), 3);
    assert_eq!(m.get(0, 1), Some(40.0));
    assert_eq!(m.get(0, 2), Some(0.0));
    assert_eq!(m.get(1, 2), Some(0.0));
}

#[test]
fn matrix_out_of_bounds_lookup_is_none() {
    let m = build_matrix(&[pair("a", "b", 40.0)]);
    assert_eq!(m.get(5, 0), None);
    assert_eq!(m.get(0, 5), None);
}

#[test]
fn matrix_summary_empty() {
    let s = MatrixSummary::from_pairs(&[]);
    assert_eq!(s.total_comparisons, 0);
    assert_eq!(s.average, 0.0);
    assert!(!s.average_warning());
}
