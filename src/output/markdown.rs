// Markdown report: a paginated, shareable record of one comparison run.
//
// Everything in the report is derived from the RunReport and the assignment
// records of that run, so the same run always renders the same tables.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use super::format_percent;
use crate::classify::bands::{class_average_warning, PairBand, RowBand};
use crate::classify::matrix::{build_matrix, MatrixSummary};
use crate::classify::records::RecordSummary;
use crate::models::{AssignmentRecord, RunReport};

/// Number of pages needed for `rows` rows at `page_size` rows per page.
pub fn page_count(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    rows.div_ceil(page_size)
}

/// Render the report and write it to `output_path`, creating parent
/// directories. Returns the path written.
pub fn generate_report(
    report: &RunReport,
    records: &[AssignmentRecord],
    page_size: usize,
    output_path: &Path,
) -> Result<String> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let markdown = render_report(report, records, page_size);
    std::fs::write(output_path, markdown)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(output_path.display().to_string())
}

/// Render the full report as a Markdown string.
pub fn render_report(report: &RunReport, records: &[AssignmentRecord], page_size: usize) -> String {
    let page_size = page_size.max(1);
    let mut md = String::new();

    let _ = writeln!(md, "# Copycat Similarity Report\n");
    let _ = writeln!(md, "Generated {}\n", Local::now().format("%Y-%m-%d %H:%M"));

    // Summary
    let summary = RecordSummary::from_records(records);
    let mean = report.stats.mean_of_significant_pairs;
    let _ = writeln!(md, "## Summary\n");
    let _ = writeln!(md, "- Total files: {}", summary.total_count);
    let _ = writeln!(md, "- Flagged files: {}", summary.flagged_count);
    let _ = writeln!(md, "- Comparisons run: {}", report.stats.total_pairs);
    let _ = writeln!(
        md,
        "- Comparisons with any overlap: {}",
        report.stats.significant_pair_count
    );
    if class_average_warning(mean) {
        let _ = writeln!(md, "- Class average: **{}** (above warning level)", format_percent(mean));
    } else {
        let _ = writeln!(md, "- Class average: {}", format_percent(mean));
    }
    md.push('\n');

    // Assignments, paginated
    let pages = page_count(records.len(), page_size);
    if pages == 0 {
        let _ = writeln!(md, "## Assignments\n\nNo submissions.\n");
    }
    for (page_idx, chunk) in records.chunks(page_size).enumerate() {
        let _ = writeln!(md, "## Assignments (page {} of {})\n", page_idx + 1, pages);
        let _ = writeln!(md, "| Date Modified | File | Type | Similarity | Band |");
        let _ = writeln!(md, "|---|---|---|---:|---|");
        for record in chunk {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {} |",
                record.date_modified,
                escape_cell(&record.file_name),
                record.file_type,
                format_percent(record.similarity),
                RowBand::from_score(record.similarity),
            );
        }
        md.push('\n');
    }

    // Comparison matrix
    let matrix = build_matrix(&report.pairs);
    let _ = writeln!(md, "## Comparison Matrix\n");
    if matrix.is_empty() {
        let _ = writeln!(md, "No pairs above the report threshold.\n");
    } else {
        let _ = write!(md, "| |");
        for name in &matrix.names {
            let _ = write!(md, " {} |", escape_cell(name));
        }
        md.push('\n');
        let _ = writeln!(md, "|---|{}", "---:|".repeat(matrix.len()));

        for (i, name) in matrix.names.iter().enumerate() {
            let _ = write!(md, "| {} |", escape_cell(name));
            for j in 0..matrix.len() {
                match matrix.get(i, j) {
                    None => md.push_str(" |"),
                    Some(score) => {
                        let _ = write!(md, " {} |", mark_cell(score));
                    }
                }
            }
            md.push('\n');
        }
        md.push('\n');
    }

    let matrix_summary = MatrixSummary::from_pairs(&report.pairs);
    let _ = writeln!(md, "- Total comparisons: {}", matrix_summary.total_comparisons);
    let _ = writeln!(md, "- Pairs above 50%: {}", matrix_summary.severe_count);
    let _ = writeln!(md, "- Pairs above 35%: {}", matrix_summary.moderate_count);
    let _ = writeln!(
        md,
        "- Average similarity score: {}",
        format_percent(matrix_summary.average)
    );

    md
}

/// Bold severe cells, italicise moderate ones.
fn mark_cell(score: f64) -> String {
    let text = format_percent(score);
    match PairBand::from_score(score) {
        PairBand::Severe => format!("**{text}**"),
        PairBand::Moderate => format!("_{text}_"),
        PairBand::Low => text,
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
