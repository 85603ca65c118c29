// CSV export of the full similarity matrix.
//
// Layout: the header row is an empty corner cell followed by every document
// name; each following row is a name and its scores to two decimals. The
// diagonal reads 100.00.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::classify::matrix::FullMatrix;

/// Write `matrix` as CSV to any writer.
pub fn write_matrix<W: std::io::Write>(matrix: &FullMatrix, writer: W) -> Result<()> {
    let mut out = ::csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.names.len() + 1);
    header.push(String::new());
    header.extend(matrix.names.iter().cloned());
    out.write_record(&header)?;

    for (name, row) in matrix.names.iter().zip(&matrix.cells) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(name.clone());
        record.extend(row.iter().map(|score| format!("{score:.2}")));
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

/// Write `matrix` to a CSV file, creating parent directories as needed.
/// Returns the path written.
pub fn export_matrix(matrix: &FullMatrix, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_matrix(matrix, file)?;

    info!(path = %path.display(), documents = matrix.names.len(), "Similarity matrix exported");
    Ok(path.to_path_buf())
}
