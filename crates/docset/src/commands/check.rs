//! `docset check` command implementation.

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Load and validate every document, reporting a summary on success.
pub(crate) fn execute(global: &GlobalArgs) -> Result<(), CliError> {
    let output = Output::new();
    let config = global.load_config()?;

    output.info(&format!(
        "Source directory: {}",
        config.docs_resolved.source_dir.display()
    ));

    let site = super::load_site(&config)?;

    output.success(&format!(
        "OK: {} documents, {} chains, {} redirects",
        site.store().len(),
        site.navigation().chains().len(),
        site.redirects().len()
    ));
    Ok(())
}
