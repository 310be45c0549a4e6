//! Filesystem storage implementation for docset document collections.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](docset_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning for documentation files
//! - File-name filtering with glob patterns (default `*.md`, `*.mdx`)
//! - Path validation so reads never leave the source directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docset_storage::Storage;
//! use docset_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for source in storage.scan()? {
//!     println!("{source}");
//! }
//! ```

mod scanner;
mod source;

use std::fs;
use std::path::{Path, PathBuf};

use docset_storage::{SourceRef, Storage, StorageError, StorageErrorKind};
use glob::Pattern;

use scanner::Scanner;
use source::is_safe_source_path;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File-name patterns used when none are configured.
pub const DEFAULT_PATTERNS: &[&str] = &["*.md", "*.mdx"];

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for documentation files and reads
/// their raw text on demand.
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
    /// Scanner for document discovery.
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage with the default patterns.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing documentation files
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self::with_compiled_patterns(source_dir, patterns)
    }

    /// Create a new filesystem storage with custom file-name patterns.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing documentation files
    /// * `patterns` - Glob patterns matched against file names (e.g., `["*.md"]`)
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn with_patterns(
        source_dir: PathBuf,
        patterns: &[String],
    ) -> Result<Self, glob::PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_compiled_patterns(source_dir, patterns))
    }

    fn with_compiled_patterns(source_dir: PathBuf, patterns: Vec<Pattern>) -> Self {
        let scanner = Scanner::new(source_dir.clone(), patterns);
        Self {
            source_dir,
            scanner,
        }
    }

    /// Root directory being scanned.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a source path doesn't escape the source directory.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if !is_safe_source_path(path) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<SourceRef>, StorageError> {
        let refs = self.scanner.scan().map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            document_count = refs.len(),
            "Filesystem scan completed"
        );
        Ok(refs)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.source_dir.join(path);
        let io_error = |e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND);

        fs::read_to_string(&full_path).map_err(io_error)
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.source_dir.join(path).is_file()
    }
}
