//! Front-matter splitting and validation.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::error::FrontMatterError;
use crate::metadata::{MetaKey, MetaValue, Metadata};

/// Opening and closing fence.
const FENCE: &str = "---";
/// YAML document-end marker, accepted as a closing fence.
const DOCUMENT_END: &str = "...";

/// A document split into validated metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Validated front-matter.
    pub metadata: Metadata,
    /// Everything after the closing fence.
    pub body: String,
}

/// Split raw document text into its front-matter block and body.
///
/// The first line must be `---` (a leading byte-order mark and trailing
/// whitespace are tolerated). The block ends at the next line that is `---`
/// or `...`. The returned block excludes both fences; the body starts right
/// after the closing fence line.
///
/// # Errors
///
/// Returns [`FrontMatterError::MissingOpening`] or
/// [`FrontMatterError::Unterminated`].
pub fn split(raw: &str) -> Result<(&str, &str), FrontMatterError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = text.split_inclusive('\n');

    let first = lines.next().ok_or(FrontMatterError::MissingOpening)?;
    if first.trim_end() != FENCE {
        return Err(FrontMatterError::MissingOpening);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == FENCE || trimmed == DOCUMENT_END {
            return Ok((&text[block_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Split raw document text and validate its front-matter.
///
/// # Errors
///
/// Returns a [`FrontMatterError`] when the block is missing, unterminated,
/// not a flat YAML mapping, or lacks a required key. All missing required
/// keys are reported together.
pub fn parse(raw: &str) -> Result<ParsedDocument, FrontMatterError> {
    let (block, body) = split(raw)?;
    let metadata = parse_block(block)?;
    Ok(ParsedDocument {
        metadata,
        body: body.to_owned(),
    })
}

/// The `id` a document declares, even when the rest of its front-matter is
/// invalid.
///
/// Returns `None` unless the block splits, parses as a YAML mapping and holds
/// a non-empty scalar `id`.
#[must_use]
pub fn declared_id(raw: &str) -> Option<String> {
    let (block, _) = split(raw).ok()?;
    let value: Value = serde_yaml::from_str(block).ok()?;
    let id = scalar_text(value.get(MetaKey::Id.as_str())?.clone())?;
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_owned())
}

/// Validate a front-matter block (without fences) into [`Metadata`].
fn parse_block(block: &str) -> Result<Metadata, FrontMatterError> {
    let value: Value = if block.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(block).map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?
    };

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => serde_yaml::Mapping::new(),
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut known: BTreeMap<MetaKey, MetaValue> = BTreeMap::new();
    let mut extra = BTreeMap::new();

    for (key, value) in mapping {
        let Value::String(name) = key else {
            return Err(FrontMatterError::NonStringKey);
        };
        let value = convert_value(&name, value)?;
        match MetaKey::from_name(&name) {
            Some(meta_key) => {
                known.insert(meta_key, trimmed(value));
            }
            None => {
                extra.insert(name, value);
            }
        }
    }

    let missing: Vec<MetaKey> = MetaKey::REQUIRED
        .into_iter()
        .filter(|key| match known.get(key) {
            // A list in a required slot is a type error, reported below.
            Some(MetaValue::List(_)) => false,
            Some(MetaValue::Scalar(s)) => s.is_empty(),
            None => true,
        })
        .collect();
    if !missing.is_empty() {
        return Err(FrontMatterError::MissingKeys(missing));
    }

    let mut take_scalar = |key: MetaKey| -> Result<Option<String>, FrontMatterError> {
        match known.remove(&key) {
            None => Ok(None),
            Some(MetaValue::Scalar(s)) if s.is_empty() => Ok(None),
            Some(MetaValue::Scalar(s)) => Ok(Some(s)),
            Some(MetaValue::List(_)) => Err(FrontMatterError::ExpectedScalar(key)),
        }
    };

    let id = take_scalar(MetaKey::Id)?.unwrap_or_default();
    let title = take_scalar(MetaKey::Title)?.unwrap_or_default();
    let permalink = take_scalar(MetaKey::Permalink)?.unwrap_or_default();
    let prev = take_scalar(MetaKey::Prev)?;
    let next = take_scalar(MetaKey::Next)?;

    let redirect_from = known
        .remove(&MetaKey::RedirectFrom)
        .map(MetaValue::into_list)
        .unwrap_or_default()
        .into_iter()
        .filter(|path| !path.is_empty())
        .collect();

    Ok(Metadata {
        id,
        title,
        permalink,
        redirect_from,
        prev,
        next,
        extra,
    })
}

/// Convert a YAML value into the flat value model.
fn convert_value(key: &str, value: Value) -> Result<MetaValue, FrontMatterError> {
    match value {
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| scalar_text(item).ok_or_else(|| unsupported(key)))
            .collect::<Result<Vec<_>, _>>()
            .map(MetaValue::List),
        other => scalar_text(other)
            .map(MetaValue::Scalar)
            .ok_or_else(|| unsupported(key)),
    }
}

/// Text of a scalar YAML value; `None` for mappings, sequences and tags.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Known keys are compared and indexed without surrounding whitespace.
fn trimmed(value: MetaValue) -> MetaValue {
    match value {
        MetaValue::Scalar(s) => MetaValue::Scalar(s.trim().to_owned()),
        MetaValue::List(items) => {
            MetaValue::List(items.iter().map(|s| s.trim().to_owned()).collect())
        }
    }
}

fn unsupported(key: &str) -> FrontMatterError {
    FrontMatterError::UnsupportedValue(key.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TESTING: &str = "---
id: testing
title: Testing Overview
permalink: docs/testing.html
redirect_from:
  - \"community/testing.html\"
next: testing-recipes
---

You can test React components similar to testing other JavaScript code.
";

    // ========================================================================
    // split
    // ========================================================================

    #[test]
    fn test_split_separates_block_and_body() {
        let (block, body) = split("---\nid: a\n---\nBody\n").unwrap();

        assert_eq!(block, "id: a\n");
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_split_tolerates_crlf_and_trailing_spaces() {
        let (block, body) = split("---  \r\nid: a\r\n---\r\nBody").unwrap();

        assert_eq!(block, "id: a\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_strips_bom() {
        let (block, _) = split("\u{feff}---\nid: a\n---\n").unwrap();

        assert_eq!(block, "id: a\n");
    }

    #[test]
    fn test_split_accepts_document_end_marker() {
        let (block, body) = split("---\nid: a\n...\nBody").unwrap();

        assert_eq!(block, "id: a\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_empty_block() {
        let (block, body) = split("---\n---\nBody").unwrap();

        assert_eq!(block, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_closing_fence_at_end_of_file() {
        let (block, body) = split("---\nid: a\n---").unwrap();

        assert_eq!(block, "id: a\n");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_body_keeps_later_fences() {
        let (_, body) = split("---\nid: a\n---\nintro\n---\nmore").unwrap();

        assert_eq!(body, "intro\n---\nmore");
    }

    #[test]
    fn test_split_missing_opening() {
        assert_eq!(
            split("# Testing\n---\nid: a\n---\n"),
            Err(FrontMatterError::MissingOpening)
        );
        assert_eq!(split(""), Err(FrontMatterError::MissingOpening));
        assert_eq!(split("----\n---\n"), Err(FrontMatterError::MissingOpening));
    }

    #[test]
    fn test_split_unterminated() {
        assert_eq!(
            split("---\nid: a\ntitle: b\n"),
            Err(FrontMatterError::Unterminated)
        );
    }

    // ========================================================================
    // parse
    // ========================================================================

    #[test]
    fn test_parse_full_document() {
        let doc = parse(TESTING).unwrap();

        assert_eq!(
            doc.metadata,
            Metadata {
                id: "testing".to_owned(),
                title: "Testing Overview".to_owned(),
                permalink: "docs/testing.html".to_owned(),
                redirect_from: vec!["community/testing.html".to_owned()],
                prev: None,
                next: Some("testing-recipes".to_owned()),
                extra: BTreeMap::new(),
            }
        );
        assert!(doc.body.starts_with("\nYou can test React components"));
    }

    #[test]
    fn test_parse_preserves_unknown_keys() {
        let raw = "---
id: testing-environments
title: Testing Environments
permalink: docs/testing-environments.html
layout: docs
category: Testing
sidebar_position: 3
draft: false
tags: [jest, jsdom]
---
";
        let meta = parse(raw).unwrap().metadata;

        assert_eq!(
            meta.extra("layout"),
            Some(&MetaValue::Scalar("docs".to_owned()))
        );
        assert_eq!(
            meta.extra("sidebar_position"),
            Some(&MetaValue::Scalar("3".to_owned()))
        );
        assert_eq!(
            meta.extra("draft"),
            Some(&MetaValue::Scalar("false".to_owned()))
        );
        assert_eq!(
            meta.extra("tags"),
            Some(&MetaValue::List(vec!["jest".to_owned(), "jsdom".to_owned()]))
        );
        assert_eq!(meta.extra.len(), 5);
    }

    #[test]
    fn test_parse_keeps_unknown_values_verbatim() {
        let raw = "---
id: \" a \"
title: A
permalink: a.html
note: \"  padded  \"
---
";

        let meta = parse(raw).unwrap().metadata;

        assert_eq!(meta.id, "a");
        assert_eq!(
            meta.extra("note"),
            Some(&MetaValue::Scalar("  padded  ".to_owned()))
        );
    }

    #[test]
    fn test_parse_redirect_from_scalar_becomes_list() {
        let raw = "---\nid: a\ntitle: A\npermalink: a.html\nredirect_from: old/a.html\n---\n";

        let meta = parse(raw).unwrap().metadata;

        assert_eq!(meta.redirect_from, vec!["old/a.html".to_owned()]);
    }

    #[test]
    fn test_parse_quoted_title_with_colon() {
        let raw = "---\nid: a\ntitle: \"Testing: Recipes\"\npermalink: a.html\n---\n";

        let meta = parse(raw).unwrap().metadata;

        assert_eq!(meta.title, "Testing: Recipes");
    }

    #[test]
    fn test_parse_empty_prev_next_are_absent() {
        let raw = "---\nid: a\ntitle: A\npermalink: a.html\nprev:\nnext: \"\"\n---\n";

        let meta = parse(raw).unwrap().metadata;

        assert_eq!(meta.prev, None);
        assert_eq!(meta.next, None);
    }

    #[test]
    fn test_parse_reports_all_missing_keys() {
        let raw = "---\nid: a\n---\n";

        assert_eq!(
            parse(raw),
            Err(FrontMatterError::MissingKeys(vec![
                MetaKey::Title,
                MetaKey::Permalink
            ]))
        );
    }

    #[test]
    fn test_parse_empty_block_reports_every_required_key() {
        assert_eq!(
            parse("---\n---\n"),
            Err(FrontMatterError::MissingKeys(MetaKey::REQUIRED.to_vec()))
        );
    }

    #[test]
    fn test_parse_empty_required_value_is_missing() {
        let raw = "---\nid: a\ntitle: \"  \"\npermalink: a.html\n---\n";

        assert_eq!(
            parse(raw),
            Err(FrontMatterError::MissingKeys(vec![MetaKey::Title]))
        );
    }

    #[test]
    fn test_parse_list_in_scalar_key() {
        let raw = "---\nid: [a, b]\ntitle: A\npermalink: a.html\n---\n";

        assert_eq!(parse(raw), Err(FrontMatterError::ExpectedScalar(MetaKey::Id)));
    }

    #[test]
    fn test_parse_list_in_scalar_key_still_reports_missing_keys() {
        let raw = "---\nid: [a, b]\n---\n";

        assert_eq!(
            parse(raw),
            Err(FrontMatterError::MissingKeys(vec![
                MetaKey::Title,
                MetaKey::Permalink
            ]))
        );
    }

    #[test]
    fn test_parse_list_in_next() {
        let raw = "---\nid: a\ntitle: A\npermalink: a.html\nnext: [b, c]\n---\n";

        assert_eq!(
            parse(raw),
            Err(FrontMatterError::ExpectedScalar(MetaKey::Next))
        );
    }

    #[test]
    fn test_parse_rejects_nested_mapping() {
        let raw = "---\nid: a\ntitle: A\npermalink: a.html\nauthor:\n  name: Dan\n---\n";

        assert_eq!(
            parse(raw),
            Err(FrontMatterError::UnsupportedValue("author".to_owned()))
        );
    }

    #[test]
    fn test_parse_rejects_nested_list() {
        let raw = "---\nid: a\ntitle: A\npermalink: a.html\nredirect_from:\n  - [x, y]\n---\n";

        assert_eq!(
            parse(raw),
            Err(FrontMatterError::UnsupportedValue("redirect_from".to_owned()))
        );
    }

    #[test]
    fn test_parse_rejects_non_mapping_block() {
        assert_eq!(
            parse("---\n- id\n- title\n---\n"),
            Err(FrontMatterError::NotAMapping)
        );
    }

    #[test]
    fn test_parse_rejects_non_string_key() {
        let raw = "---\nid: a\ntitle: A\npermalink: a.html\n42: answer\n---\n";

        assert_eq!(parse(raw), Err(FrontMatterError::NonStringKey));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let raw = "---\nid: [unclosed\n---\n";

        assert!(matches!(parse(raw), Err(FrontMatterError::InvalidYaml(_))));
    }

    #[test]
    fn test_parse_duplicate_key_is_invalid_yaml() {
        let raw = "---\nid: a\nid: b\ntitle: A\npermalink: a.html\n---\n";

        assert!(matches!(parse(raw), Err(FrontMatterError::InvalidYaml(_))));
    }

    #[test]
    fn test_declared_id_survives_missing_keys() {
        assert_eq!(declared_id("---\nid: \" a \"\nnext: b\n---\n"), Some("a".to_owned()));
        assert_eq!(declared_id("---\ntitle: A\n---\n"), None);
        assert_eq!(declared_id("---\nid: [a, b]\n---\n"), None);
        assert_eq!(declared_id("no front matter"), None);
    }

    #[test]
    fn test_parse_unterminated_block() {
        assert_eq!(
            parse("---\nid: a\ntitle: A\npermalink: a.html\n"),
            Err(FrontMatterError::Unterminated)
        );
    }
}
