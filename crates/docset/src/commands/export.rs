//! `docset export` command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Write the manifest to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    /// Write the JSON manifest.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.load_site()?;
        let manifest = site.manifest();

        if let Some(path) = self.output {
            let mut writer = BufWriter::new(File::create(&path)?);
            manifest.write_json(&mut writer)?;
            writeln!(writer)?;
            writer.flush()?;
            Output::new().success(&format!(
                "Manifest with {} documents written to {}",
                manifest.documents.len(),
                path.display()
            ));
        } else {
            let mut stdout = io::stdout().lock();
            manifest.write_json(&mut stdout)?;
            writeln!(stdout)?;
        }
        Ok(())
    }
}
