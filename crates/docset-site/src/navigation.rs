//! Navigation chains built from `prev`/`next` links.
//!
//! # Linking Rules
//!
//! - A `prev` or `next` naming an unknown id is a dangling reference and is
//!   ignored when building chains.
//! - Only `next` edges are checked for consistency: if `a.next == b` then
//!   `b.prev` must be `a`. A document with `prev` set and no matching `next`
//!   on the other side is accepted.
//! - The successor of `a` is `a.next`, or when that is unset, the first
//!   document in source order whose `prev` is `a`.
//! - Chain heads are documents that are nobody's successor. Chains are walked
//!   from each head in source order.
//! - Revisiting a document is a cycle, reported once per cycle.

use std::collections::HashMap;

use docset_frontmatter::MetaKey;
use serde::Serialize;

use crate::document::Document;
use crate::error::{ValidationError, ValidationErrors};
use crate::store::DocumentStore;

/// Linking options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Fail with [`ValidationError::MultipleChains`] if more than one chain exists.
    pub single_chain: bool,
}

/// Ordered ids of one navigation chain. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chain(Vec<String>);

impl Chain {
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    /// Id of the first document.
    #[must_use]
    pub fn head(&self) -> &str {
        self.0.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Where a document sits in the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainPosition {
    /// Index into [`Navigation::chains`].
    pub chain: usize,
    /// Index within the chain.
    pub index: usize,
}

/// Resolved navigation: every document belongs to exactly one chain.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    chains: Vec<Chain>,
    positions: HashMap<String, ChainPosition>,
}

impl Navigation {
    pub(crate) fn from_chains(chains: &[Vec<usize>], documents: &[Document]) -> Self {
        let mut positions = HashMap::new();
        let chains = chains
            .iter()
            .enumerate()
            .map(|(chain, members)| {
                let ids: Vec<String> = members
                    .iter()
                    .map(|&idx| documents[idx].id().to_owned())
                    .collect();
                for (index, id) in ids.iter().enumerate() {
                    positions.insert(id.clone(), ChainPosition { chain, index });
                }
                Chain(ids)
            })
            .collect();
        Self { chains, positions }
    }

    /// Chains ordered by the source position of their heads.
    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<ChainPosition> {
        self.positions.get(id).copied()
    }

    /// The chain containing `id`.
    #[must_use]
    pub fn chain_of(&self, id: &str) -> Option<&Chain> {
        self.position(id).map(|pos| &self.chains[pos.chain])
    }

    /// The document before `id` in its chain.
    #[must_use]
    pub fn prev_of(&self, id: &str) -> Option<&str> {
        let pos = self.position(id)?;
        let index = pos.index.checked_sub(1)?;
        self.chains[pos.chain].0.get(index).map(String::as_str)
    }

    /// The document after `id` in its chain.
    #[must_use]
    pub fn next_of(&self, id: &str) -> Option<&str> {
        let pos = self.position(id)?;
        self.chains[pos.chain].0.get(pos.index + 1).map(String::as_str)
    }

    /// Number of documents across all chains.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.positions.len()
    }
}

/// Builds [`Navigation`] from a [`DocumentStore`].
#[derive(Debug, Clone, Default)]
pub struct NavigationLinker {
    options: LinkOptions,
}

impl NavigationLinker {
    #[must_use]
    pub fn new(options: LinkOptions) -> Self {
        Self { options }
    }

    /// Check link consistency and build the chains.
    ///
    /// # Errors
    ///
    /// Returns every dangling reference, inconsistent link and cycle found,
    /// plus [`ValidationError::MultipleChains`] when a single chain is
    /// required.
    pub fn link(&self, store: &DocumentStore) -> Result<Navigation, ValidationErrors> {
        let analysis = analyze(store.documents(), &store.index().by_id, self.options);
        let errors = ValidationErrors::from(analysis.errors);
        let navigation = Navigation::from_chains(&analysis.chains, store.documents());
        tracing::debug!(chain_count = navigation.chains().len(), "Navigation linked");
        errors.into_result(navigation)
    }
}

/// Chains (as positions into the document slice) and the problems found.
pub(crate) struct LinkAnalysis {
    pub(crate) chains: Vec<Vec<usize>>,
    pub(crate) errors: Vec<ValidationError>,
}

/// Resolve links over `documents`, using `by_id` to find targets.
pub(crate) fn analyze(
    documents: &[Document],
    by_id: &HashMap<String, usize>,
    options: LinkOptions,
) -> LinkAnalysis {
    let mut errors = Vec::new();
    let count = documents.len();

    let mut prev = vec![None; count];
    let mut next = vec![None; count];
    for (idx, doc) in documents.iter().enumerate() {
        prev[idx] = resolve(doc, MetaKey::Prev, doc.prev(), by_id, &mut errors);
        next[idx] = resolve(doc, MetaKey::Next, doc.next(), by_id, &mut errors);
    }

    for (idx, doc) in documents.iter().enumerate() {
        if let Some(to) = next[idx] {
            let target = &documents[to];
            if target.prev() != Some(doc.id()) {
                errors.push(ValidationError::InconsistentLink {
                    from: doc.id().to_owned(),
                    to: target.id().to_owned(),
                    found: target.prev().map(str::to_owned),
                });
            }
        }
    }

    let mut successor = next;
    for (idx, pred) in prev.iter().enumerate() {
        if let Some(pred) = *pred
            && successor[pred].is_none()
        {
            successor[pred] = Some(idx);
        }
    }

    let mut has_predecessor = vec![false; count];
    for &succ in successor.iter().flatten() {
        has_predecessor[succ] = true;
    }

    let mut visited = vec![false; count];
    let mut chains = Vec::new();
    for head in (0..count).filter(|&idx| !has_predecessor[idx]) {
        chains.push(walk(head, &successor, &mut visited, documents, &mut errors));
    }

    // Anything not reached from a head sits on a cycle with no way in.
    while let Some(start) = visited.iter().position(|&seen| !seen) {
        walk(start, &successor, &mut visited, documents, &mut errors);
    }

    if options.single_chain && chains.len() > 1 {
        errors.push(ValidationError::MultipleChains {
            heads: chains
                .iter()
                .map(|chain| documents[chain[0]].id().to_owned())
                .collect(),
        });
    }

    LinkAnalysis { chains, errors }
}

fn resolve(
    doc: &Document,
    key: MetaKey,
    target: Option<&str>,
    by_id: &HashMap<String, usize>,
    errors: &mut Vec<ValidationError>,
) -> Option<usize> {
    let target = target?;
    let found = by_id.get(target).copied();
    if found.is_none() {
        errors.push(ValidationError::DanglingReference {
            id: doc.id().to_owned(),
            key,
            target: target.to_owned(),
            location: doc.source().clone(),
        });
    }
    found
}

/// Follow successors from `start` until the end or an already visited
/// document. Reports a cycle if the walk runs into itself.
fn walk(
    start: usize,
    successor: &[Option<usize>],
    visited: &mut [bool],
    documents: &[Document],
    errors: &mut Vec<ValidationError>,
) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut current = Some(start);
    while let Some(idx) = current {
        if visited[idx] {
            if let Some(pos) = chain.iter().position(|&member| member == idx) {
                errors.push(cycle_error(&chain[pos..], documents));
            }
            break;
        }
        visited[idx] = true;
        chain.push(idx);
        current = successor[idx];
    }
    chain
}

/// Cycle members are listed starting from the earliest in source order.
fn cycle_error(members: &[usize], documents: &[Document]) -> ValidationError {
    let start = members
        .iter()
        .enumerate()
        .min_by_key(|&(_, &idx)| idx)
        .map_or(0, |(pos, _)| pos);
    let ids = members[start..]
        .iter()
        .chain(&members[..start])
        .map(|&idx| documents[idx].id().to_owned())
        .collect();
    ValidationError::CycleDetected { ids }
}
