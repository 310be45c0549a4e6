//! docset CLI - documentation collection manager.
//!
//! Provides commands for:
//! - `check`: Validate front-matter, ids, permalinks, links and redirects
//! - `nav`: Print the navigation chains
//! - `resolve`: Map a legacy path to its canonical permalink
//! - `export`: Write the JSON manifest for external site generators

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, GlobalArgs, NavArgs, ResolveArgs};
use error::CliError;
use output::Output;

/// docset - documentation collection manager.
#[derive(Parser)]
#[command(name = "docset", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every document and report all problems.
    Check,
    /// Print the navigation chains.
    Nav(NavArgs),
    /// Print the canonical permalink for a legacy path.
    Resolve(ResolveArgs),
    /// Write the JSON manifest.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG (errors only when unset)
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check => commands::check::execute(&cli.global),
        Commands::Nav(args) => args.execute(&cli.global),
        Commands::Resolve(args) => args.execute(&cli.global),
        Commands::Export(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        report(&output, &err);
        std::process::exit(1);
    }
}

fn report(output: &Output, err: &CliError) {
    let (lines, summary) = error_report(err);
    for line in &lines {
        output.error(line);
    }
    if let Some(summary) = summary {
        output.detail(&summary);
    }
}

/// Error lines for a failed command, plus a problem count for validation
/// failures.
fn error_report(err: &CliError) -> (Vec<String>, Option<String>) {
    match err {
        CliError::Validation(errors) => {
            let lines = errors.iter().map(|e| format!("error: {e}")).collect();
            let noun = if errors.len() == 1 {
                "problem"
            } else {
                "problems"
            };
            (lines, Some(format!("{} {noun} found", errors.len())))
        }
        _ => (vec![format!("Error: {err}")], None),
    }
}

#[cfg(test)]
mod tests {
    use docset_site::{ValidationError, ValidationErrors};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_error_report_lists_each_validation_error() {
        let errors = ValidationErrors::from(vec![
            ValidationError::CycleDetected {
                ids: vec!["a".to_owned(), "b".to_owned()],
            },
            ValidationError::MultipleChains {
                heads: vec!["a".to_owned(), "c".to_owned()],
            },
        ]);
        let expected: Vec<String> = errors.iter().map(|e| format!("error: {e}")).collect();

        let (lines, summary) = error_report(&CliError::Validation(errors));

        assert_eq!(lines, expected);
        assert_eq!(summary.as_deref(), Some("2 problems found"));
    }

    #[test]
    fn test_error_report_single_problem() {
        let errors = ValidationErrors::from(vec![ValidationError::MultipleChains {
            heads: vec!["a".to_owned(), "c".to_owned()],
        }]);

        let (lines, summary) = error_report(&CliError::Validation(errors));

        assert_eq!(lines.len(), 1);
        assert_eq!(summary.as_deref(), Some("1 problem found"));
    }

    #[test]
    fn test_error_report_other_errors() {
        let err = CliError::Usage("invalid document pattern".to_owned());

        let (lines, summary) = error_report(&err);

        assert_eq!(lines, vec!["Error: invalid document pattern".to_owned()]);
        assert_eq!(summary, None);
    }
}
