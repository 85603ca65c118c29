// Output formatting: terminal display, CSV export, and report generation.

pub mod csv;
pub mod markdown;
pub mod terminal;

/// Format a similarity score for display: two decimals and a percent sign.
///
/// Scores are kept unrounded everywhere else; rounding happens only here.
pub fn format_percent(score: f64) -> String {
    format!("{score:.2}%")
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
