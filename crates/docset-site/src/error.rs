//! Validation, lookup and load errors.

use std::fmt;

use docset_frontmatter::{FrontMatterError, MetaKey};
use docset_storage::StorageError;

use crate::document::SourceLocation;

/// One problem found while validating a document set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Front-matter block is missing, invalid, or lacks a required key.
    #[error("{location}: malformed metadata: {reason}")]
    MalformedMetadata {
        location: SourceLocation,
        reason: FrontMatterError,
    },
    /// Document could not be read from storage.
    #[error("{location}: unreadable: {message}")]
    Unreadable {
        location: SourceLocation,
        message: String,
    },
    /// Two or more documents share an id.
    #[error("duplicate id `{id}` in {}", join_locations(.locations))]
    DuplicateId {
        id: String,
        locations: Vec<SourceLocation>,
    },
    /// Two or more documents share a permalink.
    #[error("duplicate permalink `{permalink}` in {}", join_locations(.locations))]
    DuplicatePermalink {
        permalink: String,
        locations: Vec<SourceLocation>,
    },
    /// `prev` or `next` names a document that does not exist.
    #[error("{location}: `{key}` of `{id}` refers to unknown document `{target}`")]
    DanglingReference {
        id: String,
        key: MetaKey,
        target: String,
        location: SourceLocation,
    },
    /// `from.next` is `to`, but `to.prev` is not `from`.
    #[error("`{from}` declares next `{to}`, but `{to}` declares prev {}", describe_prev(.found.as_deref()))]
    InconsistentLink {
        from: String,
        to: String,
        found: Option<String>,
    },
    /// Following navigation links revisits a document.
    #[error("navigation cycle: {}", .ids.join(" -> "))]
    CycleDetected { ids: Vec<String> },
    /// A legacy path is claimed twice, or collides with a permalink.
    #[error("{}", conflict_message(.path, .claimants, .shadowed.as_deref()))]
    ConflictingRedirect {
        path: String,
        claimants: Vec<String>,
        shadowed: Option<String>,
    },
    /// More than one chain exists while a single chain is required.
    #[error("expected a single navigation chain, found {} starting at {}", .heads.len(), join_ids(.heads))]
    MultipleChains { heads: Vec<String> },
}

fn join_locations(locations: &[SourceLocation]) -> String {
    locations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_prev(found: Option<&str>) -> String {
    found.map_or_else(|| "nothing".to_owned(), |p| format!("`{p}`"))
}

fn join_ids(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn conflict_message(path: &str, claimants: &[String], shadowed: Option<&str>) -> String {
    match shadowed {
        Some(owner) => format!(
            "redirect `{path}` from {} shadows the permalink of `{owner}`",
            join_ids(claimants)
        ),
        None => format!(
            "redirect `{path}` is claimed by {}",
            join_ids(claimants)
        ),
    }
}

/// Every validation problem found in one pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// `Ok(value)` when nothing was reported, `Err(self)` otherwise.
    pub(crate) fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.len() == 1 { "error" } else { "errors" };
        write!(f, "{} validation {noun}", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// What a failed lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Id,
    Permalink,
    Redirect,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "document id",
            Self::Permalink => "permalink",
            Self::Redirect => "redirect",
        })
    }
}

/// Error returned by store and redirect lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: LookupKind, key: String },
}

impl LookupError {
    pub(crate) fn not_found(kind: LookupKind, key: &str) -> Self {
        Self::NotFound {
            kind,
            key: key.to_owned(),
        }
    }
}

/// Error returned by [`Site::load`](crate::Site::load).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source listing failed; nothing was validated.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The document set is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
