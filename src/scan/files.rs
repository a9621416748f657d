// src/scan/files.rs
// =============================================================================
// Finds the files a pipeline should look at.
//
// We walk the site root with `walkdir` and keep every file whose path
// (relative to the root) matches one of the configured globs. Directories in
// the skip list and hidden directories are never entered.
//
// Results are sorted by path so two runs over the same tree visit files in the
// same order.
// =============================================================================

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A compiled set of globs plus the directories to skip.
#[derive(Debug, Clone)]
pub struct FileSet {
    globs: GlobSet,
    skip_dirs: Vec<String>,
}

impl FileSet {
    pub fn new<S: AsRef<str>>(patterns: &[S], skip_dirs: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;
            builder.add(glob);
        }
        let globs = builder.build().context("failed to build glob set")?;

        Ok(Self {
            globs,
            skip_dirs: skip_dirs.to_vec(),
        })
    }

    /// Does `relative` (a path relative to the root) match any glob?
    pub fn matches(&self, relative: &Path) -> bool {
        self.globs.is_match(relative)
    }

    /// Every matching file under `root`, sorted.
    ///
    /// Entries that cannot be read while walking are skipped with a debug log.
    /// The root itself must exist; a missing root is the one fatal condition.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("site root '{}' is not a readable directory", root.display());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_skipped(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.matches(relative) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        // .github holds CI workflows the performance-budget check reads
        let hidden = name.starts_with('.') && name != ".github";
        hidden || self.skip_dirs.iter().any(|skip| *skip == name)
    }
}
