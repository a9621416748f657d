// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is written as Rust structs and
// enums, and clap generates the parsing, `--help` and error messages.
//
// Global flags (--root, --config, --verbose) live on `Cli` with
// `global = true`, so they can be written before or after the subcommand.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-guardian",
    version,
    about = "Validate a documentation site's source tree: links, code examples and UX heuristics",
    long_about = "site-guardian scans the sources of a documentation website and checks that internal \
                  links resolve, external links answer, embedded Python examples match the client API, \
                  and the pages follow basic UX conventions. Each command writes a JSON report and \
                  exits non-zero when validation fails, so it slots into CI pipelines."
)]
pub struct Cli {
    /// Root directory of the site sources
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to .site-guardian.toml in the root or any parent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every validation command
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Print the JSON report to stdout instead of the human-readable log
    #[arg(long)]
    pub json: bool,

    /// Where to write the JSON report (relative paths are under --root)
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check internal routes and probe external links
    ///
    /// Example: site-guardian links --root ./frontend
    Links {
        #[command(flatten)]
        output: ReportArgs,

        /// Skip the HTTP probes for external links
        #[arg(long)]
        offline: bool,
    },

    /// Check required files and the Python code examples embedded in pages
    ///
    /// Example: site-guardian content --json
    Content {
        #[command(flatten)]
        output: ReportArgs,
    },

    /// Score learning paths, optimization, responsiveness, accessibility and budgets
    ///
    /// Example: site-guardian ux --report ux.json
    Ux {
        #[command(flatten)]
        output: ReportArgs,
    },

    /// Print the default configuration as TOML
    ///
    /// Example: site-guardian init > .site-guardian.toml
    Init,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `global = true` do?
//    - The flag is accepted on every subcommand, not only before it
//    - `site-guardian links --root web` and `site-guardian --root web links`
//      both work
//
// 2. What is #[command(flatten)]?
//    - It splices the fields of another `Args` struct into this command
//    - ReportArgs is declared once and shared by links, content and ux
//
// 3. Why Option<PathBuf>?
//    - None means "the flag was not given", which is different from any path
//    - The handler then falls back to the configured default
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["site-guardian", "links", "--offline", "--root", "web", "--json"]);
        assert_eq!(cli.root, PathBuf::from("web"));
        match cli.command {
            Commands::Links { output, offline } => {
                assert!(offline);
                assert!(output.json);
                assert!(output.report.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["site-guardian", "ux"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
