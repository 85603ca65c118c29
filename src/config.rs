use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Extensions read by default: anything that is already plain text.
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Rows per page in the Markdown report.
pub const DEFAULT_REPORT_PAGE_SIZE: usize = 25;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// arguments override these values where both exist.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder holding the submissions to compare (COPYCAT_DOCS_DIR)
    pub docs_dir: PathBuf,
    /// Where reports and CSV exports go by default (COPYCAT_OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// File extensions treated as plain-text submissions (COPYCAT_EXTENSIONS)
    pub extensions: Vec<String>,
    /// Assignments per page in the Markdown report (COPYCAT_REPORT_PAGE_SIZE)
    pub report_page_size: usize,
}

impl Config {
    /// Load configuration from environment variables. Everything has a default.
    pub fn load() -> Result<Self> {
        let extensions = match env::var("COPYCAT_EXTENSIONS") {
            Ok(list) => parse_extensions(&list),
            Err(_) => DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        };

        let report_page_size = match env::var("COPYCAT_REPORT_PAGE_SIZE") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => anyhow::bail!(
                    "COPYCAT_REPORT_PAGE_SIZE must be a positive whole number, got {raw:?}"
                ),
            },
            Err(_) => DEFAULT_REPORT_PAGE_SIZE,
        };

        Ok(Self {
            docs_dir: env::var("COPYCAT_DOCS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./submissions")),
            output_dir: env::var("COPYCAT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output")),
            extensions,
            report_page_size,
        })
    }

    /// Check that the submissions folder exists.
    /// Call this before loading documents.
    pub fn require_docs_dir(&self) -> Result<()> {
        if !self.docs_dir.is_dir() {
            anyhow::bail!(
                "Submissions folder not found: {}\n\
                 Pass a folder on the command line or set COPYCAT_DOCS_DIR in your .env file.",
                self.docs_dir.display()
            );
        }
        Ok(())
    }

    /// Default path for the CSV similarity matrix export.
    pub fn default_csv_path(&self) -> PathBuf {
        self.output_dir.join("similarity-matrix.csv")
    }

    /// Default path for the Markdown report.
    pub fn default_report_path(&self) -> PathBuf {
        self.output_dir.join("copycat-report.md")
    }
}

/// Parse a comma-separated extension list: trimmed, lower-cased, leading dots
/// dropped, empty entries ignored.
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions() {
        assert_eq!(parse_extensions("txt, .MD ,,text"), vec!["txt", "md", "text"]);
        assert!(parse_extensions(" , ").is_empty());
    }

    #[test]
    fn test_require_docs_dir_missing() {
        let config = Config {
            docs_dir: PathBuf::from("/definitely/not/a/real/folder"),
            output_dir: PathBuf::from("./output"),
            extensions: vec!["txt".to_string()],
            report_page_size: DEFAULT_REPORT_PAGE_SIZE,
        };
        assert!(config.require_docs_dir().is_err());
    }

    #[test]
    fn test_default_output_paths() {
        let config = Config {
            docs_dir: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            extensions: vec![],
            report_page_size: 10,
        };
        assert_eq!(config.default_csv_path(), PathBuf::from("out/similarity-matrix.csv"));
        assert_eq!(config.default_report_path(), PathBuf::from("out/copycat-report.md"));
    }
}
