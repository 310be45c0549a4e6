//! Document store, navigation chains and redirect table for docset.
//!
//! This crate provides:
//! - [`Site`]: loads every document from a [`Storage`](docset_storage::Storage)
//!   and validates the set as a whole
//! - [`DocumentStore`]: id and permalink lookup over unique documents
//! - [`Navigation`]: ordered reading chains built from `prev`/`next` links
//! - [`RedirectTable`]: legacy paths resolved to canonical permalinks
//! - [`Manifest`]: JSON snapshot for external site generators
//!
//! Validation never stops at the first problem: every error found is
//! returned together in [`ValidationErrors`].
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use docset_site::{Site, SiteOptions};
//! use docset_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let site = Site::load(&storage, &SiteOptions::default())?;
//!
//! let permalink = site.redirects().resolve("community/testing.html")?;
//! let next = site.navigation().next_of("testing");
//! # Ok(())
//! # }
//! ```

mod document;
mod error;
mod manifest;
mod navigation;
mod redirects;
mod site;
mod store;

pub use document::{Document, SourceLocation, normalize_path};
pub use error::{LoadError, LookupError, LookupKind, ValidationError, ValidationErrors};
pub use manifest::{Manifest, ManifestDocument};
pub use navigation::{Chain, ChainPosition, LinkOptions, Navigation, NavigationLinker};
pub use redirects::RedirectTable;
pub use site::{Site, SiteOptions};
pub use store::DocumentStore;
