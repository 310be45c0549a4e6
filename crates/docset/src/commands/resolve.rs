//! `docset resolve` command implementation.

use std::io::{self, Write};

use clap::Args;
use docset_site::{LookupError, Site};

use super::GlobalArgs;
use crate::error::CliError;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Legacy path to resolve (e.g. `community/testing.html`).
    path: String,
}

impl ResolveArgs {
    /// Print the canonical permalink for a legacy path.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.load_site()?;
        let permalink = resolve(&site, &self.path)?;
        writeln!(io::stdout(), "{permalink}")?;
        Ok(())
    }
}

/// Resolve a legacy path; a path that already is a permalink resolves to itself.
fn resolve<'a>(site: &'a Site, path: &str) -> Result<&'a str, LookupError> {
    match site.redirects().resolve(path) {
        Ok(permalink) => Ok(permalink),
        Err(err) => site
            .store()
            .get_by_permalink(path)
            .map(docset_site::Document::permalink)
            .map_err(|_| err),
    }
}

#[cfg(test)]
mod tests {
    use docset_site::{Document, SiteOptions, SourceLocation};

    use super::*;

    fn site() -> Site {
        let raw = "---\nid: testing\ntitle: Testing\npermalink: docs/testing.html\n\
                   redirect_from:\n  - community/testing.html\n---\n";
        let doc = Document::parse(raw, SourceLocation::new("testing.md", 0)).unwrap();
        Site::from_documents(vec![doc], &SiteOptions::default()).unwrap()
    }

    #[test]
    fn test_resolve_legacy_path() {
        let site = site();

        assert_eq!(
            resolve(&site, "/community/testing.html").unwrap(),
            "docs/testing.html"
        );
    }

    #[test]
    fn test_resolve_permalink_to_itself() {
        let site = site();

        assert_eq!(resolve(&site, "docs/testing.html").unwrap(), "docs/testing.html");
    }

    #[test]
    fn test_resolve_unknown_path_reports_redirect_lookup() {
        let site = site();

        let err = resolve(&site, "nowhere.html").unwrap_err();

        assert_eq!(err.to_string(), "redirect not found: nowhere.html");
    }
}
