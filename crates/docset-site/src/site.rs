//! Site loading pipeline.
//!
//! [`Site::load`] lists sources, reads and parses them in parallel, then
//! validates the whole set at once:
//!
//! 1. Read and parse every document (rayon, results kept in scan order)
//! 2. Check id and permalink uniqueness
//! 3. Resolve navigation links into chains
//! 4. Build the redirect table
//!
//! Steps 2 to 4 run even when earlier steps reported problems, so a single
//! run shows the author everything that is wrong. A link to a document that
//! failed to parse is not reported again as dangling when that document still
//! declares a readable `id`.

use std::collections::HashSet;
use std::time::Instant;

use docset_storage::{SourceRef, Storage};
use rayon::prelude::*;

use crate::document::{Document, SourceLocation};
use crate::error::{LoadError, ValidationError, ValidationErrors};
use crate::manifest::Manifest;
use crate::navigation::{self, LinkOptions, Navigation};
use crate::redirects::{self, RedirectTable};
use crate::store::{DocumentIndex, DocumentStore};

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Options for [`Site::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteOptions {
    /// Require all documents to form one navigation chain.
    pub single_chain: bool,
}

impl SiteOptions {
    fn link_options(self) -> LinkOptions {
        LinkOptions {
            single_chain: self.single_chain,
        }
    }
}

/// A validated document collection: store, navigation and redirects.
///
/// Immutable once loaded; share it behind an `Arc` if needed.
#[derive(Debug)]
pub struct Site {
    store: DocumentStore,
    navigation: Navigation,
    redirects: RedirectTable,
}

impl Site {
    /// Load and validate every document in `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Storage`] if sources cannot be listed, or
    /// [`LoadError::Validation`] with every problem found across all
    /// documents.
    pub fn load(storage: &dyn Storage, options: &SiteOptions) -> Result<Self, LoadError> {
        let start = Instant::now();

        let scan_start = Instant::now();
        let sources = storage.scan()?;
        let scan_ms = elapsed_ms(scan_start);

        let parse_start = Instant::now();
        let parsed: Vec<Result<Document, Rejected>> = sources
            .par_iter()
            .enumerate()
            .map(|(index, source)| read_document(storage, source, index))
            .collect();
        let parse_ms = elapsed_ms(parse_start);

        let mut errors = ValidationErrors::new();
        let mut rejected_ids = HashSet::new();
        let mut documents = Vec::with_capacity(parsed.len());
        for result in parsed {
            match result {
                Ok(doc) => documents.push(doc),
                Err(rejected) => {
                    errors.push(rejected.error);
                    rejected_ids.extend(rejected.declared_id);
                }
            }
        }

        let validate_start = Instant::now();
        let result = Self::assemble(documents, errors, &rejected_ids, *options);
        let validate_ms = elapsed_ms(validate_start);

        match &result {
            Ok(site) => tracing::info!(
                document_count = site.store.len(),
                chain_count = site.navigation.chains().len(),
                redirect_count = site.redirects.len(),
                scan_ms,
                parse_ms,
                validate_ms,
                elapsed_ms = elapsed_ms(start),
                "Site loaded"
            ),
            Err(errors) => tracing::info!(
                source_count = sources.len(),
                error_count = errors.len(),
                elapsed_ms = elapsed_ms(start),
                "Site validation failed"
            ),
        }

        result.map_err(LoadError::from)
    }

    /// Validate already-parsed documents.
    ///
    /// # Errors
    ///
    /// Returns every uniqueness, navigation and redirect problem found.
    pub fn from_documents(
        documents: Vec<Document>,
        options: &SiteOptions,
    ) -> Result<Self, ValidationErrors> {
        let errors = ValidationErrors::new();
        Self::assemble(documents, errors, &HashSet::new(), *options)
    }

    fn assemble(
        documents: Vec<Document>,
        mut errors: ValidationErrors,
        rejected_ids: &HashSet<String>,
        options: SiteOptions,
    ) -> Result<Self, ValidationErrors> {
        let index = DocumentIndex::build(&documents, &mut errors);
        let links = navigation::analyze(&documents, &index.by_id, options.link_options());
        let (redirects, redirect_errors) = redirects::analyze(&documents, &index.by_permalink);
        errors.extend(
            links
                .errors
                .into_iter()
                .filter(|e| !targets_rejected(e, rejected_ids)),
        );
        errors.extend(redirect_errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let navigation = Navigation::from_chains(&links.chains, &documents);
        let order = links.chains.into_iter().flatten().collect();
        let store = DocumentStore::from_parts(documents, index, order);
        Ok(Self {
            store,
            navigation,
            redirects,
        })
    }

    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    #[must_use]
    pub fn redirects(&self) -> &RedirectTable {
        &self.redirects
    }

    /// Serializable snapshot for external site generators.
    #[must_use]
    pub fn manifest(&self) -> Manifest<'_> {
        Manifest::new(self)
    }
}

/// A source that could not be turned into a [`Document`].
struct Rejected {
    error: ValidationError,
    declared_id: Option<String>,
}

/// Dangling links to a rejected document are covered by its own error.
fn targets_rejected(error: &ValidationError, rejected_ids: &HashSet<String>) -> bool {
    matches!(
        error,
        ValidationError::DanglingReference { target, .. } if rejected_ids.contains(target)
    )
}

fn read_document(
    storage: &dyn Storage,
    source: &SourceRef,
    index: usize,
) -> Result<Document, Rejected> {
    let location = SourceLocation::new(source.path.as_str(), index);
    let raw = match storage.read(&source.path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!(path = %source, error = %e, "Failed to read document");
            return Err(Rejected {
                error: ValidationError::Unreadable {
                    location,
                    message: e.to_string(),
                },
                declared_id: None,
            });
        }
    };
    match Document::parse(&raw, location) {
        Ok(doc) => {
            tracing::debug!(path = %source, id = doc.id(), "Parsed document");
            Ok(doc)
        }
        Err(error) => Err(Rejected {
            error,
            declared_id: docset_frontmatter::declared_id(&raw),
        }),
    }
}
