//! Front-matter parsing for docset documents.
//!
//! Every document starts with a YAML block fenced by `---` lines, followed by
//! its Markdown/MDX body:
//!
//! ```text
//! ---
//! id: testing
//! title: Testing Overview
//! permalink: docs/testing.html
//! redirect_from:
//!   - "community/testing.html"
//! next: testing-recipes
//! ---
//!
//! Body text...
//! ```
//!
//! [`split`] separates the block from the body; [`parse`] also validates the
//! block into [`Metadata`]. Known keys are typed fields, unknown keys are kept
//! in [`Metadata::extra`].
//!
//! # Value Model
//!
//! The block is a flat mapping. Each value is either a scalar (strings,
//! numbers and booleans are kept as their text) or a list of scalars.
//! Nested mappings and nested lists are rejected.

mod error;
mod metadata;
mod parser;

pub use error::FrontMatterError;
pub use metadata::{MetaKey, MetaValue, Metadata};
pub use parser::{ParsedDocument, declared_id, parse, split};
