//! JSON manifest for external site generators.

use std::collections::BTreeMap;

use docset_frontmatter::Metadata;
use serde::Serialize;

use crate::navigation::Chain;
use crate::site::Site;

/// Snapshot of a loaded site without document bodies.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    /// Documents in navigation order.
    pub documents: Vec<ManifestDocument<'a>>,
    pub chains: &'a [Chain],
    /// Legacy path to permalink, sorted by legacy path.
    pub redirects: &'a BTreeMap<String, String>,
}

/// One document entry: its metadata plus the source path.
#[derive(Debug, Serialize)]
pub struct ManifestDocument<'a> {
    #[serde(flatten)]
    pub metadata: &'a Metadata,
    pub source: &'a str,
}

impl<'a> Manifest<'a> {
    pub(crate) fn new(site: &'a Site) -> Self {
        let documents = site
            .store()
            .all()
            .into_iter()
            .map(|doc| ManifestDocument {
                metadata: doc.metadata(),
                source: &doc.source().path,
            })
            .collect();
        Self {
            documents,
            chains: site.navigation().chains(),
            redirects: site.redirects().as_map(),
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to `writer`.
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}
