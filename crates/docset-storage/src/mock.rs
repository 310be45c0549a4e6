//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{SourceRef, Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores documents in memory, in insertion order. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docset_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_document("testing.md", "---\nid: testing\n---\nBody");
///
/// let sources = storage.scan().unwrap();
/// let raw = storage.read("testing.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    order: RwLock<Vec<String>>,
    contents: RwLock<HashMap<String, String>>,
    unreadable: RwLock<Vec<String>>,
    fail_scan: RwLock<bool>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given source path and raw content.
    ///
    /// Re-adding a path replaces its content but keeps its original position.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let previous = self
            .contents
            .write()
            .unwrap()
            .insert(path.clone(), content.into());
        if previous.is_none() {
            self.order.write().unwrap().push(path);
        }
        self
    }

    /// List a document in scans but fail every read of it.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.order.write().unwrap().push(path.clone());
        self.unreadable.write().unwrap().push(path);
        self
    }

    /// Make `scan()` fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failing_scan(self) -> Self {
        *self.fail_scan.write().unwrap() = true;
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<SourceRef>, StorageError> {
        if *self.fail_scan.read().unwrap() {
            let err = StorageError::new(StorageErrorKind::Other);
            return Err(err.with_backend(BACKEND));
        }
        Ok(self
            .order
            .read()
            .unwrap()
            .iter()
            .map(SourceRef::new)
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        if self.unreadable.read().unwrap().iter().any(|p| p == path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.read().unwrap().contains_key(path)
    }
}
