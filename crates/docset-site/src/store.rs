//! Validated document set with id and permalink lookup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::document::{Document, normalize_path};
use crate::error::{LookupError, LookupKind, ValidationError, ValidationErrors};
use crate::navigation::{self, LinkOptions};

/// Id and permalink indexes over a document sequence.
///
/// When keys collide the first document in source order wins the slot and a
/// duplicate error is recorded listing every location.
#[derive(Debug, Default)]
pub(crate) struct DocumentIndex {
    pub(crate) by_id: HashMap<String, usize>,
    pub(crate) by_permalink: HashMap<String, usize>,
}

impl DocumentIndex {
    pub(crate) fn build(documents: &[Document], errors: &mut ValidationErrors) -> Self {
        let mut ids: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut permalinks: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, doc) in documents.iter().enumerate() {
            ids.entry(doc.id()).or_default().push(idx);
            permalinks
                .entry(normalize_path(doc.permalink()))
                .or_default()
                .push(idx);
        }

        // Report in order of first occurrence.
        for (idx, doc) in documents.iter().enumerate() {
            if let Some(group) = ids.get(doc.id())
                && group.len() > 1
                && group[0] == idx
            {
                errors.push(ValidationError::DuplicateId {
                    id: doc.id().to_owned(),
                    locations: group.iter().map(|&i| documents[i].source().clone()).collect(),
                });
            }
            let permalink = normalize_path(doc.permalink());
            if let Some(group) = permalinks.get(permalink)
                && group.len() > 1
                && group[0] == idx
            {
                errors.push(ValidationError::DuplicatePermalink {
                    permalink: permalink.to_owned(),
                    locations: group.iter().map(|&i| documents[i].source().clone()).collect(),
                });
            }
        }

        let mut index = Self::default();
        for (idx, doc) in documents.iter().enumerate() {
            if let Entry::Vacant(slot) = index.by_id.entry(doc.id().to_owned()) {
                slot.insert(idx);
            }
            if let Entry::Vacant(slot) = index
                .by_permalink
                .entry(normalize_path(doc.permalink()).to_owned())
            {
                slot.insert(idx);
            }
        }
        index
    }
}

/// The set of loaded documents.
///
/// Every id and every permalink is unique. Documents are immutable after load.
#[derive(Debug)]
pub struct DocumentStore {
    documents: Vec<Document>,
    index: DocumentIndex,
    /// Positions into `documents` in navigation order.
    order: Vec<usize>,
}

impl DocumentStore {
    /// Validate uniqueness and build the store.
    ///
    /// All duplicate ids and permalinks are reported together.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] with a [`ValidationError::DuplicateId`] or
    /// [`ValidationError::DuplicatePermalink`] per colliding key.
    pub fn load(documents: Vec<Document>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let index = DocumentIndex::build(&documents, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        let analysis = navigation::analyze(&documents, &index.by_id, LinkOptions::default());
        let order = if analysis.errors.is_empty() {
            analysis.chains.into_iter().flatten().collect()
        } else {
            (0..documents.len()).collect()
        };

        Ok(Self::from_parts(documents, index, order))
    }

    pub(crate) fn from_parts(
        documents: Vec<Document>,
        index: DocumentIndex,
        order: Vec<usize>,
    ) -> Self {
        Self {
            documents,
            index,
            order,
        }
    }

    /// Look up a document by id.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if no document has this id.
    pub fn get(&self, id: &str) -> Result<&Document, LookupError> {
        self.index
            .by_id
            .get(id)
            .map(|&idx| &self.documents[idx])
            .ok_or_else(|| LookupError::not_found(LookupKind::Id, id))
    }

    /// Look up a document by its canonical path.
    ///
    /// A leading `/` on either side is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if no document has this permalink.
    pub fn get_by_permalink(&self, permalink: &str) -> Result<&Document, LookupError> {
        self.index
            .by_permalink
            .get(normalize_path(permalink))
            .map(|&idx| &self.documents[idx])
            .ok_or_else(|| LookupError::not_found(LookupKind::Permalink, permalink))
    }

    /// All documents, in navigation order when the links resolve to chains,
    /// otherwise in source order.
    #[must_use]
    pub fn all(&self) -> Vec<&Document> {
        self.order.iter().map(|&idx| &self.documents[idx]).collect()
    }

    /// Documents in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub(crate) fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub(crate) fn index(&self) -> &DocumentIndex {
        &self.index
    }
}

impl<'a> IntoIterator for &'a DocumentStore {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use docset_frontmatter::Metadata;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::SourceLocation;

    /// Build a document at source position `index`.
    pub(crate) fn doc(index: usize, id: &str, prev: Option<&str>, next: Option<&str>) -> Document {
        Document::new(
            Metadata {
                id: id.to_owned(),
                title: id.to_uppercase(),
                permalink: format!("docs/{id}.html"),
                prev: prev.map(str::to_owned),
                next: next.map(str::to_owned),
                ..Default::default()
            },
            "",
            SourceLocation::new(format!("{id}.md"), index),
        )
    }

    pub(crate) fn with_permalink(doc: &Document, permalink: &str) -> Document {
        let mut metadata = doc.metadata().clone();
        metadata.permalink = permalink.to_owned();
        Document::new(metadata, doc.body(), doc.source().clone())
    }

    pub(crate) fn with_redirects(doc: &Document, paths: &[&str]) -> Document {
        let mut metadata = doc.metadata().clone();
        metadata.redirect_from = paths.iter().map(|&p| p.to_owned()).collect();
        Document::new(metadata, doc.body(), doc.source().clone())
    }

    fn ids(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.id().to_owned()).collect()
    }

    #[test]
    fn test_load_and_lookup() {
        let store = DocumentStore::load(vec![
            doc(0, "a", None, None),
            doc(1, "b", None, None),
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert_eq!(store.get("b").unwrap().title(), "B");
        assert_eq!(store.get_by_permalink("docs/a.html").unwrap().id(), "a");
    }

    #[test]
    fn test_get_unknown_id() {
        let store = DocumentStore::load(vec![doc(0, "a", None, None)]).unwrap();

        assert_eq!(
            store.get("missing").unwrap_err(),
            LookupError::NotFound {
                kind: LookupKind::Id,
                key: "missing".to_owned()
            }
        );
    }

    #[test]
    fn test_get_by_permalink_ignores_leading_slash() {
        let store = DocumentStore::load(vec![with_permalink(
            &doc(0, "a", None, None),
            "/docs/a.html",
        )])
        .unwrap();

        assert_eq!(store.get_by_permalink("docs/a.html").unwrap().id(), "a");
        assert_eq!(store.get_by_permalink("/docs/a.html").unwrap().id(), "a");
        assert!(store.get_by_permalink("docs/b.html").is_err());
    }

    #[test]
    fn test_duplicate_id_reports_both_locations() {
        let first = doc(0, "a", None, None);
        let second = with_permalink(&doc(1, "a", None, None), "docs/other.html");

        let errors = DocumentStore::load(vec![first, second]).unwrap_err();

        assert_eq!(
            errors.into_vec(),
            vec![ValidationError::DuplicateId {
                id: "a".to_owned(),
                locations: vec![
                    SourceLocation::new("a.md", 0),
                    SourceLocation::new("a.md", 1),
                ],
            }]
        );
    }

    #[test]
    fn test_duplicate_permalink_after_normalization() {
        let a = doc(0, "a", None, None);
        let b = with_permalink(&doc(1, "b", None, None), "/docs/a.html");

        let errors = DocumentStore::load(vec![a, b]).unwrap_err();

        assert_eq!(
            errors.into_vec(),
            vec![ValidationError::DuplicatePermalink {
                permalink: "docs/a.html".to_owned(),
                locations: vec![
                    SourceLocation::new("a.md", 0),
                    SourceLocation::new("b.md", 1),
                ],
            }]
        );
    }

    #[test]
    fn test_all_duplicates_reported_together() {
        let docs = vec![
            doc(0, "a", None, None),
            with_permalink(&doc(1, "a", None, None), "docs/x.html"),
            doc(2, "b", None, None),
            with_permalink(&doc(3, "c", None, None), "docs/b.html"),
        ];

        let errors = DocumentStore::load(docs).unwrap_err();

        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_all_follows_navigation_order() {
        let docs = vec![
            doc(0, "c", Some("b"), None),
            doc(1, "a", None, Some("b")),
            doc(2, "b", Some("a"), Some("c")),
        ];

        let store = DocumentStore::load(docs).unwrap();

        assert_eq!(ids(&store.all()), vec!["a", "b", "c"]);
        let source: Vec<_> = store.iter().map(Document::id).collect();
        assert_eq!(source, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_all_falls_back_to_source_order_on_bad_links() {
        let docs = vec![
            doc(0, "b", None, Some("a")),
            doc(1, "a", None, Some("missing")),
        ];

        let store = DocumentStore::load(docs).unwrap();

        assert_eq!(ids(&store.all()), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_store() {
        let store = DocumentStore::load(Vec::new()).unwrap();

        assert!(store.is_empty());
        assert!(store.all().is_empty());
    }
}
