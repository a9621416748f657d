// src/scan/mod.rs
// =============================================================================
// The Source Scanner.
//
// Submodules:
// - files: finds the files to read (walkdir + globset)
// - patterns: the regex tables applied to each file
// - markdown: link extraction for markdown pages (pulldown-cmark)
//
// A Scanner owns a list of files and a way to turn one file's text into
// facts. `facts()` reads the files lazily, one at a time, and can be called
// again to rescan from the start.
// =============================================================================

mod files;
mod markdown;
mod patterns;

pub use files::FileSet;
pub use markdown::extract_markdown_links;
pub use patterns::PatternTable;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::facts::ExtractedFact;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a file's text becomes facts.
#[derive(Debug, Clone)]
pub enum Extractor {
    /// Apply a regex table to the raw text
    Patterns(PatternTable),
    /// Parse as CommonMark and keep link destinations
    Markdown,
}

impl Extractor {
    pub fn extract(&self, content: &str, path: &Path) -> Vec<ExtractedFact> {
        match self {
            Extractor::Patterns(table) => table.extract(content, path),
            Extractor::Markdown => extract_markdown_links(content, path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scanner {
    files: Vec<PathBuf>,
    extractor: Extractor,
}

impl Scanner {
    pub fn new(files: Vec<PathBuf>, extractor: Extractor) -> Self {
        Self { files, extractor }
    }

    /// Lazily scan every file.
    ///
    /// An unreadable file yields one `Err` and the iteration moves on to the
    /// next file.
    pub fn facts(&self) -> impl Iterator<Item = Result<ExtractedFact, ScanError>> + '_ {
        self.files.iter().flat_map(move |path| {
            let batch: Vec<Result<ExtractedFact, ScanError>> = match read_text(path) {
                Ok(content) => {
                    let facts = self.extractor.extract(&content, path);
                    tracing::debug!(file = %path.display(), facts = facts.len(), "scanned");
                    facts.into_iter().map(Ok).collect()
                }
                Err(e) => vec![Err(e)],
            };
            batch
        })
    }
}

/// Read a whole file as UTF-8.
pub fn read_text(path: &Path) -> Result<String, ScanError> {
    std::fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_unreadable_file_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.tsx");
        fs::write(&good, "<a href=\"/about\">About</a>").unwrap();
        let missing = dir.path().join("missing.tsx");

        let scanner = Scanner::new(
            vec![missing, good],
            Extractor::Patterns(PatternTable::links().unwrap()),
        );
        let items: Vec<_> = scanner.facts().collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(ScanError::Read { .. })));
        assert_eq!(items[1].as_ref().unwrap().raw_text, "/about");
    }

    #[test]
    fn test_scan_is_restartable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.tsx");
        fs::write(&file, "<a href=\"/blog\">Blog</a>\n<a href=\"/about\">About</a>").unwrap();

        let scanner = Scanner::new(vec![file], Extractor::Patterns(PatternTable::links().unwrap()));
        let first: Vec<_> = scanner.facts().filter_map(Result::ok).collect();
        let second: Vec<_> = scanner.facts().filter_map(Result::ok).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_file_yields_no_facts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.tsx");
        fs::write(&file, "").unwrap();

        let scanner = Scanner::new(vec![file], Extractor::Patterns(PatternTable::links().unwrap()));
        assert_eq!(scanner.facts().count(), 0);
    }
}
