// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up debug logging and load the configuration
// 3. Dispatch to the pipeline for the chosen subcommand
// 4. Print the summary, write the JSON report
// 5. Exit with proper code (0 = passed, 1 = validation failed, 2 = error)
//
// Rust concepts used:
// - async/await: the external link probes run on the tokio runtime
// - Result<T, E>: every fatal problem bubbles up here through `?`
// - generics: one `finish` function writes the report for every command
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker;    // src/checker/ - resolves facts against ground truth
mod classify;   // src/classify.rs - pure fact classification
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - .site-guardian.toml
mod facts;      // src/facts.rs - the data flowing through a pipeline
mod heuristics; // src/heuristics.rs - keyword checks behind `ux`
mod pipeline;   // src/pipeline/ - one pipeline per subcommand
mod report;     // src/report/ - diagnostics, tallies and the JSON report
mod scan;       // src/scan/ - file discovery and fact extraction

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ReportArgs};
use config::Config;
use pipeline::PipelineOutcome;
use report::{RunContext, RunReport, Verdict};

const LOG_ENV: &str = "SITE_GUARDIAN_LOG";

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected errors (missing root, bad explicit config, unwritable
            // report) exit with code 2
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Init = cli.command {
        return handle_init();
    }

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&cli.root),
    };
    tracing::debug!(root = %cli.root.display(), "starting run");

    match cli.command {
        Commands::Links { output, offline } => handle_links(&cli.root, &config, &output, offline).await,
        Commands::Content { output } => handle_content(&cli.root, &config, &output),
        Commands::Ux { output } => handle_ux(&cli.root, &config, &output),
        Commands::Init => handle_init(),
    }
}

// Debug logs go to stderr so stdout stays clean for --json
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// Handles the 'links' subcommand
async fn handle_links(root: &Path, config: &Config, output: &ReportArgs, offline: bool) -> Result<i32> {
    let mut ctx = RunContext::new(output.json);
    let outcome = pipeline::links::run(root, config, &mut ctx, offline).await?;

    ctx.print_summary("LINK VALIDATION SUMMARY");
    print_recommendations(&ctx, &outcome.recommendations);
    if outcome.passed {
        ctx.say("✅ All link validations passed!");
    } else {
        ctx.say("❌ Some link validations failed. Please review the errors above.");
    }

    let path = report_path(root, output, &config.report.links);
    let verdict = Verdict::OverallValid(outcome.passed);
    finish(&ctx, outcome, verdict, &path, output.json)
}

// Handles the 'content' subcommand
fn handle_content(root: &Path, config: &Config, output: &ReportArgs) -> Result<i32> {
    let mut ctx = RunContext::new(output.json);
    let outcome = pipeline::content::run(root, config, &mut ctx)?;

    ctx.print_summary("CONTENT VALIDATION SUMMARY");
    print_recommendations(&ctx, &outcome.recommendations);
    if outcome.passed {
        ctx.say("✅ All validations passed!");
    } else {
        ctx.say("❌ Some validations failed. Please review the errors above.");
    }

    let path = report_path(root, output, &config.report.content);
    let verdict = Verdict::OverallValid(outcome.passed);
    finish(&ctx, outcome, verdict, &path, output.json)
}

// Handles the 'ux' subcommand
fn handle_ux(root: &Path, config: &Config, output: &ReportArgs) -> Result<i32> {
    let mut ctx = RunContext::new(output.json);
    let ux = pipeline::ux::run(root, config, &mut ctx)?;

    ctx.print_summary("UX TESTING SUMMARY");
    for (name, passed) in &ux.outcome.test_results {
        let status = if *passed { "✅ PASS" } else { "⚠️  NEEDS IMPROVEMENT" };
        ctx.say(format!("{name}: {status}"));
    }
    print_recommendations(&ctx, &ux.outcome.recommendations);

    let (glyph, label) = pipeline::ux::score_label(ux.score, config.ux.pass_threshold, config.ux.excellent_threshold);
    ctx.say(format!("\n{glyph} UX Score: {:.1}% - {label}", ux.score * 100.0));

    let path = report_path(root, output, &config.report.ux);
    finish(&ctx, ux.outcome, Verdict::OverallScore(ux.score), &path, output.json)
}

// Handles the 'init' subcommand
fn handle_init() -> Result<i32> {
    print!("{}", Config::default_toml()?);
    Ok(0)
}

fn print_recommendations(ctx: &RunContext, recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    ctx.say("\n💡 RECOMMENDATIONS:");
    for (i, recommendation) in recommendations.iter().enumerate() {
        ctx.say(format!("   {}. {recommendation}", i + 1));
    }
}

// --report wins; otherwise the configured name. Relative paths live under the root.
fn report_path(root: &Path, output: &ReportArgs, configured: &str) -> PathBuf {
    let path = output.report.clone().unwrap_or_else(|| PathBuf::from(configured));
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

// Writes the report, prints it in --json mode, and turns the verdict into an exit code
fn finish<R: Serialize>(
    ctx: &RunContext,
    outcome: PipelineOutcome<R>,
    verdict: Verdict,
    path: &Path,
    json: bool,
) -> Result<i32> {
    let report = RunReport::new(outcome.results, outcome.test_results, verdict, ctx)
        .with_recommendations(outcome.recommendations);
    report.write(path)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        ctx.say(format!("\n📄 Detailed report saved to: {}", path.display()));
    }

    Ok(if outcome.passed { 0 } else { 1 })
}
