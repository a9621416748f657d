// src/pipeline/mod.rs
// =============================================================================
// One pipeline per subcommand: scan -> classify -> check -> aggregate.
//
// Submodules:
// - links: `site-guardian links`
// - content: `site-guardian content`
// - ux: `site-guardian ux`
//
// A pipeline prints its diagnostics through the RunContext and returns what
// the command handler needs to write the report and pick an exit code. None
// of them reads another pipeline's output.
// =============================================================================

pub mod content;
pub mod links;
pub mod ux;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::report::{RunContext, Tally};

/// What a pipeline hands back to its command handler.
#[derive(Debug)]
pub struct PipelineOutcome<R: Serialize> {
    pub results: R,
    pub test_results: BTreeMap<String, bool>,
    pub recommendations: Vec<String>,
    pub passed: bool,
}

/// `path` relative to `root` when possible, for filters and messages.
pub fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/")
}

/// One line with the ok/warning/error totals of a run.
pub fn say_totals(ctx: &RunContext, tally: &Tally) {
    let totals = tally.totals();
    ctx.say(format!(
        "\n🧮 {} checks: {} ok, {} warnings, {} errors",
        totals.total(),
        totals.ok,
        totals.warning,
        totals.error
    ));
}
