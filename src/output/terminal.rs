// Colored terminal output for the assignments table and comparison matrix.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs command handlers delegate here.

use colored::{ColoredString, Colorize};

use super::{format_percent, truncate_chars};
use crate::classify::bands::{class_average_warning, PairBand, RowBand};
use crate::classify::matrix::{MatrixSummary, SimilarityMatrix};
use crate::classify::records::FilteredView;
use crate::models::RunStatistics;

/// Matrix columns are cut to this many characters of the file name.
const MATRIX_COLUMN_WIDTH: usize = 12;

/// Display the assignments table with its summary counts.
///
/// The counts always describe the full set, even when only flagged rows are shown.
pub fn display_assignments(view: &FilteredView, high_similarity_only: bool) {
    let title = if high_similarity_only {
        "=== Flagged Assignments ==="
    } else {
        "=== Assignments ==="
    };
    println!("\n{}", title.bold());
    println!();

    if view.records.is_empty() {
        if high_similarity_only {
            println!("  No files above the flag threshold.");
        } else {
            println!("  No files loaded.");
        }
    } else {
        println!(
            "  {:<16}  {:<40} {:<6} {:>10}",
            "Modified".dimmed(),
            "File".dimmed(),
            "Type".dimmed(),
            "Similarity".dimmed(),
        );
        println!("  {}", "-".repeat(76).dimmed());

        for record in &view.records {
            println!(
                "  {:<16}  {:<40} {:<6} {:>10}",
                record.date_modified,
                truncate_chars(&record.file_name, 37),
                record.file_type,
                colorize_row(record.similarity),
            );
        }
    }

    println!();
    println!("  Total Files: {}", view.summary.total_count);
    let flagged = format!("Flagged Files: {}", view.summary.flagged_count);
    if view.summary.flagged_count > 0 {
        println!("  {}", flagged.red().bold());
    } else {
        println!("  {}", flagged);
    }
}

/// Display the run's class average and pair counts.
pub fn display_run_summary(stats: &RunStatistics) {
    let mean = format_percent(stats.mean_of_significant_pairs);
    let mean = if class_average_warning(stats.mean_of_significant_pairs) {
        mean.red().bold()
    } else {
        mean.bold()
    };

    println!("\n{}", "=== Class Summary ===".bold());
    println!("  Class average:      {mean}");
    println!("  Comparisons run:    {}", stats.total_pairs);
    println!("  With any overlap:   {}", stats.significant_pair_count);
}

/// Display the comparison matrix followed by its summary figures.
pub fn display_matrix(matrix: &SimilarityMatrix, summary: &MatrixSummary) {
    println!("\n{}", "=== Plagiarism Analysis Results ===".bold());

    let average = format!("Average Similarity Score: {}", format_percent(summary.average));
    if summary.average_warning() {
        println!("  {}", average.red().bold());
    } else {
        println!("  {}", average.bold());
    }
    println!();

    if matrix.is_empty() {
        println!("  No pairs above the report threshold.");
    } else {
        let w = MATRIX_COLUMN_WIDTH + 3;
        print!("  {:<w$}", "");
        for name in &matrix.names {
            print!(" {:>w$}", truncate_chars(name, MATRIX_COLUMN_WIDTH).dimmed());
        }
        println!();

        for (i, name) in matrix.names.iter().enumerate() {
            print!("  {:<w$}", truncate_chars(name, MATRIX_COLUMN_WIDTH));
            for j in 0..matrix.len() {
                match matrix.get(i, j) {
                    None => print!(" {:>w$}", ""),
                    Some(score) => print!(" {:>w$}", colorize_cell(score)),
                }
            }
            println!();
        }
    }

    println!();
    println!("  Total Comparisons: {}", summary.total_comparisons);
    println!("  Files with Similarity > 50%: {}", summary.severe_count);
    println!("  Files with Similarity > 35%: {}", summary.moderate_count);
}

/// Colorize an assignment row's similarity by its row band.
fn colorize_row(similarity: f64) -> ColoredString {
    let text = format_percent(similarity);
    match RowBand::from_score(similarity) {
        RowBand::Severe => text.red().bold(),
        RowBand::Moderate => text.yellow(),
        RowBand::Normal => text.normal(),
    }
}

/// Colorize a matrix cell by its pair band.
fn colorize_cell(score: f64) -> ColoredString {
    let text = format_percent(score);
    match PairBand::from_score(score) {
        PairBand::Severe => text.red(),
        PairBand::Moderate => text.blue(),
        PairBand::Low => text.normal(),
    }
}
