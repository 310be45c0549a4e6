//! `docset nav` command implementation.

use std::io::{self, Write};

use clap::Args;
use docset_site::Site;

use super::GlobalArgs;
use crate::error::CliError;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Print chains as a JSON array of id arrays.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Print the navigation chains to stdout.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let site = global.load_site()?;
        let mut stdout = io::stdout().lock();

        if self.json {
            serde_json::to_writer_pretty(&mut stdout, site.navigation().chains())?;
            writeln!(stdout)?;
        } else {
            write_chains(&mut stdout, &site)?;
        }
        Ok(())
    }
}

/// One block per chain: a header, then `position. id  title  permalink`.
fn write_chains(out: &mut impl Write, site: &Site) -> io::Result<()> {
    for (n, chain) in site.navigation().chains().iter().enumerate() {
        if n > 0 {
            writeln!(out)?;
        }
        writeln!(out, "chain {} ({} documents)", n + 1, chain.len())?;
        for (pos, id) in chain.iter().enumerate() {
            match site.store().get(id) {
                Ok(doc) => writeln!(
                    out,
                    "{:>4}. {id}  {}  {}",
                    pos + 1,
                    doc.title(),
                    doc.permalink()
                )?,
                Err(_) => writeln!(out, "{:>4}. {id}", pos + 1)?,
            }
        }
    }
    Ok(())
}
