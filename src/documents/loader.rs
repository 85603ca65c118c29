// Folder loader for plain-text submissions.
//
// Only the top level of the folder is read, the same as listing a single
// drive folder. Binary formats need text extraction, which is not done here:
// those files are skipped with a warning rather than compared as garbage.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::models::{Document, FileMetadata};

/// A submission read from disk: the text for the engine plus its table row.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub document: Document,
    pub metadata: FileMetadata,
}

/// Read every file in `dir` whose extension is in `extensions`.
///
/// Extension matching is case-insensitive. Results are sorted by file name
/// so repeated runs over the same folder enumerate pairs identically.
pub fn load_directory(dir: &Path, extensions: &[String]) -> Result<Vec<LoadedFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read submissions folder: {}", dir.display()))?;

    let mut files = Vec::new();
    let mut skipped = 0usize;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_type = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !extensions.iter().any(|ext| ext.eq_ignore_ascii_case(&file_type)) {
            warn!(path = %path.display(), "Unsupported file type, skipping");
            skipped += 1;
            continue;
        }

        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let file_id = path
            .strip_prefix(dir)
            .unwrap_or(path.as_path())
            .to_string_lossy()
            .into_owned();

        let date_modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        debug!(file = %file_name, bytes = bytes.len(), "Loaded submission");

        files.push(LoadedFile {
            document: Document::new(file_id.clone(), file_name.clone(), text),
            metadata: FileMetadata {
                file_id,
                file_name,
                file_type,
                date_modified,
            },
        });
    }

    files.sort_by(|a, b| a.metadata.file_name.cmp(&b.metadata.file_name));

    info!(loaded = files.len(), skipped, folder = %dir.display(), "Loaded submissions");

    Ok(files)
}

/// Split loaded files into the engine's input and the table's metadata.
pub fn split(files: Vec<LoadedFile>) -> (Vec<Document>, Vec<FileMetadata>) {
    files.into_iter().map(|f| (f.document, f.metadata)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("copycat-loader-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loads_allowed_extensions_sorted() {
        let dir = scratch_dir("sorted");
        std::fs::write(dir.join("b.txt"), "second file").unwrap();
        std::fs::write(dir.join("a.TXT"), "first file").unwrap();
        std::fs::write(dir.join("c.pdf"), [0x25, 0x50, 0x44, 0x46]).unwrap();
        std::fs::create_dir_all(dir.join("nested")).unwrap();

        let files = load_directory(&dir, &["txt".to_string()]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.metadata.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
        assert_eq!(files[0].metadata.file_type, "txt");
        assert_eq!(files[0].document.text, "first file");
        assert_eq!(files[0].document.id, "a.TXT");
        assert!(!files[0].metadata.date_modified.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("copycat-loader-does-not-exist-at-all");
        assert!(load_directory(&dir, &["txt".to_string()]).is_err());
    }

    #[test]
    fn test_split_preserves_order() {
        let dir = scratch_dir("split");
        std::fs::write(dir.join("x.txt"), "x").unwrap();
        std::fs::write(dir.join("y.txt"), "y").unwrap();

        let (docs, meta) = split(load_directory(&dir, &["txt".to_string()]).unwrap());
        assert_eq!(docs[0].name, meta[0].file_name);
        assert_eq!(docs[1].name, "y.txt");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
