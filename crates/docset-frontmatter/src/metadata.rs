//! Typed front-matter metadata.
//!
//! # Known Keys
//!
//! - `id`: unique document identifier (required)
//! - `title`: display title (required)
//! - `permalink`: canonical path (required)
//! - `redirect_from`: legacy paths (list, or a single string)
//! - `prev` / `next`: ids of the neighbouring documents in navigation
//!
//! Anything else lands in [`Metadata::extra`] untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Keys with a defined meaning in front-matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaKey {
    /// `id`
    Id,
    /// `title`
    Title,
    /// `permalink`
    Permalink,
    /// `redirect_from`
    RedirectFrom,
    /// `prev`
    Prev,
    /// `next`
    Next,
}

impl MetaKey {
    /// Keys every document must set.
    pub const REQUIRED: [MetaKey; 3] = [MetaKey::Id, MetaKey::Title, MetaKey::Permalink];

    /// Look up a known key by its front-matter name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "permalink" => Some(Self::Permalink),
            "redirect_from" => Some(Self::RedirectFrom),
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            _ => None,
        }
    }

    /// Front-matter name of the key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Permalink => "permalink",
            Self::RedirectFrom => "redirect_from",
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A front-matter value: one scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Single value (strings, numbers and booleans keep their text).
    Scalar(String),
    /// Ordered list of values.
    List(Vec<String>),
}

impl MetaValue {
    /// The scalar text, if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The value as a list; a scalar becomes a one-element list.
    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Scalar(s) => vec![s],
            Self::List(items) => items,
        }
    }
}

/// Validated front-matter of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Unique document identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Canonical path of the document.
    pub permalink: String,
    /// Legacy paths that should resolve to `permalink`, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirect_from: Vec<String>,
    /// Id of the previous document in navigation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Id of the next document in navigation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Keys without a defined meaning, preserved for downstream tools.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Look up an unknown key.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&MetaValue> {
        self.extra.get(key)
    }
}
