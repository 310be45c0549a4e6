//! Documents and their source locations.

use std::collections::BTreeMap;
use std::fmt;

use docset_frontmatter::{MetaValue, Metadata};
use serde::Serialize;

use crate::error::ValidationError;

/// Where a document came from: its storage path and its position in the scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    /// Storage-relative path (e.g. `"guide/testing.md"`).
    pub path: String,
    /// Zero-based position in the source sequence.
    pub index: usize,
}

impl SourceLocation {
    /// Create a location.
    #[must_use]
    pub fn new(path: impl Into<String>, index: usize) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// A parsed document. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    metadata: Metadata,
    body: String,
    source: SourceLocation,
}

impl Document {
    /// Create a document from already-validated metadata.
    #[must_use]
    pub fn new(metadata: Metadata, body: impl Into<String>, source: SourceLocation) -> Self {
        Self {
            metadata,
            body: body.into(),
            source,
        }
    }

    /// Parse raw document text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedMetadata`] if the front-matter
    /// block is missing, invalid, or lacks a required key.
    pub fn parse(raw: &str, source: SourceLocation) -> Result<Self, ValidationError> {
        match docset_frontmatter::parse(raw) {
            Ok(parsed) => Ok(Self::new(parsed.metadata, parsed.body, source)),
            Err(reason) => Err(ValidationError::MalformedMetadata {
                location: source,
                reason,
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    #[must_use]
    pub fn permalink(&self) -> &str {
        &self.metadata.permalink
    }

    /// Legacy paths, in source order.
    #[must_use]
    pub fn redirect_from(&self) -> &[String] {
        &self.metadata.redirect_from
    }

    /// Declared previous document id.
    #[must_use]
    pub fn prev(&self) -> Option<&str> {
        self.metadata.prev.as_deref()
    }

    /// Declared next document id.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.metadata.next.as_deref()
    }

    /// Keys without a defined meaning.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, MetaValue> {
        &self.metadata.extra
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Body text after the front-matter block.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn source(&self) -> &SourceLocation {
        &self.source
    }
}

/// Normalize a permalink or legacy path for comparison.
///
/// Surrounding whitespace and a single leading `/` are ignored, so
/// `"/docs/a.html"` and `"docs/a.html"` name the same path.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim();
    trimmed.strip_prefix('/').unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use docset_frontmatter::{FrontMatterError, MetaKey};

    use super::*;

    #[test]
    fn test_parse_document() {
        let raw = "---\nid: testing\ntitle: Testing\npermalink: docs/testing.html\n\
                   next: recipes\n---\nBody";

        let doc = Document::parse(raw, SourceLocation::new("testing.md", 0)).unwrap();

        assert_eq!(doc.id(), "testing");
        assert_eq!(doc.title(), "Testing");
        assert_eq!(doc.permalink(), "docs/testing.html");
        assert_eq!(doc.next(), Some("recipes"));
        assert_eq!(doc.prev(), None);
        assert_eq!(doc.body(), "Body");
        assert_eq!(doc.source().path, "testing.md");
    }

    #[test]
    fn test_parse_document_missing_id() {
        let raw = "---\ntitle: Testing\npermalink: docs/testing.html\n---\n";

        let err = Document::parse(raw, SourceLocation::new("testing.md", 3)).unwrap_err();

        assert_eq!(
            err,
            ValidationError::MalformedMetadata {
                location: SourceLocation::new("testing.md", 3),
                reason: FrontMatterError::MissingKeys(vec![MetaKey::Id]),
            }
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/docs/a.html"), "docs/a.html");
        assert_eq!(normalize_path("docs/a.html"), "docs/a.html");
        assert_eq!(normalize_path("  /docs/a.html "), "docs/a.html");
        assert_eq!(normalize_path("//docs"), "/docs");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_source_location_display() {
        assert_eq!(SourceLocation::new("a/b.md", 1).to_string(), "a/b.md");
    }
}
