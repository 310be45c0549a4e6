//! Legacy path to permalink table.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::document::{Document, normalize_path};
use crate::error::{LookupError, LookupKind, ValidationError, ValidationErrors};
use crate::store::DocumentStore;

/// Maps every legacy path to exactly one permalink.
///
/// Keys are normalized (no leading `/`); values are permalinks as written in
/// the owning document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectTable {
    entries: BTreeMap<String, String>,
}

impl RedirectTable {
    /// Collect `redirect_from` entries of every document in the store.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError::ConflictingRedirect`] for each legacy path
    /// claimed by more than one document, or equal to an existing permalink.
    pub fn build(store: &DocumentStore) -> Result<Self, ValidationErrors> {
        let (table, errors) = analyze(store.documents(), &store.index().by_permalink);
        ValidationErrors::from(errors).into_result(table)
    }

    /// Resolve a legacy path to its permalink.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if the path is not a known redirect.
    pub fn resolve(&self, legacy_path: &str) -> Result<&str, LookupError> {
        self.entries
            .get(normalize_path(legacy_path))
            .map(String::as_str)
            .ok_or_else(|| LookupError::not_found(LookupKind::Redirect, legacy_path))
    }

    /// `(legacy path, permalink)` pairs sorted by legacy path.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

/// Build the table over `documents`; `by_permalink` holds normalized permalinks.
pub(crate) fn analyze(
    documents: &[Document],
    by_permalink: &HashMap<String, usize>,
) -> (RedirectTable, Vec<ValidationError>) {
    // Legacy path -> claiming documents, in order of first claim.
    let mut claims: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for (idx, doc) in documents.iter().enumerate() {
        let mut seen = HashSet::new();
        for raw in doc.redirect_from() {
            let path = normalize_path(raw);
            if path.is_empty() {
                continue;
            }
            if !seen.insert(path) {
                tracing::warn!(id = doc.id(), path, "Duplicate redirect_from entry ignored");
                continue;
            }
            claims
                .entry(path)
                .or_insert_with(|| {
                    order.push(path);
                    Vec::new()
                })
                .push(idx);
        }
    }

    let mut table = RedirectTable::default();
    let mut errors = Vec::new();
    for path in order {
        let claimants = &claims[path];
        let shadowed = by_permalink.get(path).copied();
        if claimants.len() > 1 || shadowed.is_some() {
            errors.push(ValidationError::ConflictingRedirect {
                path: path.to_owned(),
                claimants: claimants
                    .iter()
                    .map(|&idx| documents[idx].id().to_owned())
                    .collect(),
                shadowed: shadowed.map(|idx| documents[idx].id().to_owned()),
            });
            continue;
        }
        let permalink = documents[claimants[0]].permalink().to_owned();
        table.entries.insert(path.to_owned(), permalink);
    }

    (table, errors)
}
