//! CLI command implementations.

pub(crate) mod check;
mod export;
mod nav;
mod resolve;

use std::path::PathBuf;

use clap::Args;
use docset_config::{CliSettings, Config};
use docset_site::{Site, SiteOptions};
use docset_storage_fs::FsStorage;

use crate::error::CliError;

pub(crate) use export::ExportArgs;
pub(crate) use nav::NavArgs;
pub(crate) use resolve::ResolveArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover docset.toml).
    #[arg(short, long, global = true, env = "DOCSET_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, global = true)]
    source_dir: Option<PathBuf>,

    /// Require all documents to form a single navigation chain.
    #[arg(long, global = true)]
    single_chain: bool,

    /// Enable verbose output (timing and count logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            single_chain: self.single_chain.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load and validate the documents named by the configuration.
    pub(crate) fn load_site(&self) -> Result<Site, CliError> {
        let config = self.load_config()?;
        load_site(&config)
    }
}

pub(crate) fn load_site(config: &Config) -> Result<Site, CliError> {
    let docs = &config.docs_resolved;
    tracing::info!(source_dir = %docs.source_dir.display(), "Loading documents");

    let storage = FsStorage::with_patterns(docs.source_dir.clone(), &docs.patterns)
        .map_err(|e| CliError::Usage(format!("invalid document pattern: {e}")))?;
    let options = SiteOptions {
        single_chain: config.navigation.single_chain,
    };
    Ok(Site::load(&storage, &options)?)
}
