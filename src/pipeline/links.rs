// src/pipeline/links.rs
// =============================================================================
// `site-guardian links`
//
// 1. Harvest link facts from the site sources (regex table) and from markdown
//    pages (pulldown-cmark)
// 2. Classify them: internal, external, or discarded
// 3. Report common smells on every occurrence
// 4. Resolve each distinct internal link against the route table
// 5. Probe each distinct external link, one at a time
//
// The run passes when neither link group has an error and nothing else
// logged an error.
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{say_totals, PipelineOutcome};
use crate::checker::{common_issues, dedupe_by_text, ExternalChecker, RouteResolver};
use crate::classify::classify_link;
use crate::config::Config;
use crate::facts::{CheckResult, ClassifiedFact, ExtractedFact, FactCategory};
use crate::report::{RunContext, Tally};
use crate::scan::{Extractor, FileSet, PatternTable, Scanner};

#[derive(Debug, Clone, Serialize)]
pub struct LinkResults {
    pub files_scanned: usize,
    pub total_links: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub external_checked: bool,
    pub tally: Tally,
    pub checks: Vec<CheckResult>,
}

pub async fn run(root: &Path, config: &Config, ctx: &mut RunContext, offline: bool) -> Result<PipelineOutcome<LinkResults>> {
    ctx.say("🔗 Starting link validation...");
    ctx.say("=".repeat(60));

    let sources = FileSet::new(&config.scan.source_globs, &config.scan.skip_dirs)?.collect(root)?;
    let pages = FileSet::new(&config.scan.markdown_globs, &config.scan.skip_dirs)?.collect(root)?;
    let files_scanned = sources.len() + pages.len();
    ctx.say(format!("\n📁 Scanning {files_scanned} files for links..."));

    let scanners = [
        Scanner::new(sources, Extractor::Patterns(PatternTable::links()?)),
        Scanner::new(pages, Extractor::Markdown),
    ];
    let extracted = harvest(&scanners, ctx);
    ctx.say(format!("🔍 Found {} total links", extracted.len()));

    let classified: Vec<ClassifiedFact> = extracted.into_iter().filter_map(classify_link).collect();
    let (internal, external): (Vec<_>, Vec<_>) = classified
        .iter()
        .cloned()
        .partition(|fact| fact.category == FactCategory::InternalLink);
    let internal = dedupe_by_text(&internal);
    let external = dedupe_by_text(&external);
    ctx.say(format!("📍 Internal links: {}", internal.len()));
    ctx.say(format!("🌐 External links: {}", external.len()));

    for issue in common_issues(&classified, &config.links.site_domains) {
        ctx.warning(issue);
    }

    let mut checks = Vec::new();

    ctx.section("🔗", "Validating internal links");
    let resolver = RouteResolver::new(root, &config.links);
    for fact in internal.iter().cloned() {
        if let Some(result) = resolver.check(fact) {
            ctx.record(&result);
            checks.push(result);
        }
    }

    let external_checked = !offline;
    if offline {
        ctx.say("\n⏭️  Skipping external links (offline)");
    } else {
        ctx.section("🌐", "Validating external links");
        let mut checker = ExternalChecker::from_config(&config.http)?;
        for result in checker.check_all(external.clone()).await {
            ctx.record(&result);
            checks.push(result);
        }
        tracing::debug!(probed = checker.probed(), "external probing finished");
    }

    let mut tally = Tally::new();
    tally.extend(&checks);
    say_totals(ctx, &tally);

    let mut test_results = BTreeMap::new();
    test_results.insert("Internal Links".to_string(), tally.get(FactCategory::InternalLink).passed());
    test_results.insert("External Links".to_string(), tally.get(FactCategory::ExternalLink).passed());

    let passed = test_results.values().all(|&ok| ok) && !ctx.has_errors();
    let recommendations = recommendations(&tally);

    Ok(PipelineOutcome {
        results: LinkResults {
            files_scanned,
            total_links: classified.len(),
            internal_links: internal.len(),
            external_links: external.len(),
            external_checked,
            tally,
            checks,
        },
        test_results,
        recommendations,
        passed,
    })
}

fn harvest(scanners: &[Scanner], ctx: &mut RunContext) -> Vec<ExtractedFact> {
    let mut facts = Vec::new();
    for scanner in scanners {
        for item in scanner.facts() {
            match item {
                Ok(fact) => facts.push(fact),
                Err(e) => ctx.warning(e.to_string()),
            }
        }
    }
    facts
}

fn recommendations(tally: &Tally) -> Vec<String> {
    let mut out = Vec::new();
    let internal = tally.get(FactCategory::InternalLink);
    let external = tally.get(FactCategory::ExternalLink);

    if internal.error > 0 {
        out.push(format!("Fix {} internal link(s) pointing to missing pages", internal.error));
    }
    if internal.warning > 0 {
        out.push(format!("Add {} unknown internal route(s) to the route table or remove them", internal.warning));
    }
    if external.error > 0 {
        out.push(format!("Update or remove {} broken external link(s)", external.error));
    }
    out
}
