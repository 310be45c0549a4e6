//! Storage abstraction for docset document collections.
//!
//! This crate provides a [`Storage`] trait that hides where raw documents
//! come from. The site pipeline only needs two things from a backend: the
//! list of source files, and the raw text of each one. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (filesystem today, archives or object stores later)
//! - **Clean separation** between validation logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `exists()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `docset-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use docset_storage::Storage;
//! use docset_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new("docs".into());
//! for source in storage.scan()? {
//!     let raw = storage.read(&source.path)?;
//!     println!("{}: {} bytes", source.path, raw.len());
//! }
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{SourceRef, Storage, StorageError, StorageErrorKind};
