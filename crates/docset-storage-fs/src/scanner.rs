//! Document discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the
//! reading phase. The Scanner only identifies files that could be documents,
//! returning lightweight references; no content is read here.

use std::fs;
use std::path::{Path, PathBuf};

use docset_storage::SourceRef;
use glob::Pattern;

use crate::source::to_source_path;

/// Discovers document sources by walking the filesystem.
///
/// Walks the directory tree depth-first, skips hidden files and directories,
/// and keeps files whose name matches any of the configured patterns.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    patterns: Vec<Pattern>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `patterns` - File-name patterns to keep (e.g., `*.md`)
    pub fn new(source_dir: PathBuf, patterns: Vec<Pattern>) -> Self {
        Self {
            source_dir,
            patterns,
        }
    }

    /// Scan filesystem and return source references sorted by path.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from reading the root directory. Errors in
    /// subdirectories are logged and the subdirectory is skipped.
    pub fn scan(&self) -> std::io::Result<Vec<SourceRef>> {
        let entries = fs::read_dir(&self.source_dir)?;
        let mut refs = Vec::new();
        self.scan_entries(entries, &mut refs);
        refs.sort();
        Ok(refs)
    }

    fn scan_directory(&self, dir_path: &Path, refs: &mut Vec<SourceRef>) {
        match fs::read_dir(dir_path) {
            Ok(entries) => self.scan_entries(entries, refs),
            Err(e) => {
                tracing::warn!(
                    path = %dir_path.display(),
                    error = %e,
                    "Failed to read directory, skipping"
                );
            }
        }
    }

    fn scan_entries(&self, entries: fs::ReadDir, refs: &mut Vec<SourceRef>) {
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name();
            let name = name.to_string_lossy();

            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.scan_directory(&path, refs);
            } else if self.matches(&name) {
                let source_path = path
                    .strip_prefix(&self.source_dir)
                    .ok()
                    .and_then(to_source_path);
                match source_path {
                    Some(source_path) => refs.push(SourceRef::new(source_path)),
                    None => {
                        tracing::warn!(
                            path = %path.display(),
                            "Skipping file with unrepresentable path"
                        );
                    }
                }
            }
        }
    }

    fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(file_name))
    }
}
