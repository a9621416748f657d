// src/pipeline/content.rs
// =============================================================================
// `site-guardian content`
//
// 1. Required files: every configured group (backend examples, doc pages,
//    demo components) must exist
// 2. Code examples: Python snippets embedded in docs/interactive components
//    are extracted, unescaped and validated with tree-sitter
//
// Snippet findings are printed one by one; each snippet is then tallied once
// at its worst severity.
// =============================================================================

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{relative_to, say_totals, PipelineOutcome};
use crate::checker::{check_required, SnippetChecker};
use crate::classify::classify_code_block;
use crate::config::{Config, ContentConfig};
use crate::facts::{CheckResult, ExtractedFact, FactCategory, Status};
use crate::report::{RunContext, Tally};
use crate::scan::{Extractor, FileSet, PatternTable, Scanner};

const CODE_EXAMPLES: &str = "code examples";

#[derive(Debug, Clone, Serialize)]
pub struct ContentResults {
    pub required_files: usize,
    pub snippet_files: usize,
    pub snippets_checked: usize,
    pub tally: Tally,
    pub checks: Vec<CheckResult>,
}

pub fn run(root: &Path, config: &Config, ctx: &mut RunContext) -> Result<PipelineOutcome<ContentResults>> {
    if !root.is_dir() {
        anyhow::bail!("site root '{}' is not a readable directory", root.display());
    }

    ctx.say("🔍 Starting content validation...");
    ctx.say("=".repeat(60));

    let mut checks = Vec::new();
    let mut test_results = BTreeMap::new();

    for group in &config.content.required {
        ctx.section("📁", &format!("Checking {}s", group.name));
        let results = check_required(group, root);
        for result in &results {
            ctx.record(result);
        }
        test_results.insert(group.name.clone(), results.iter().all(|r| !r.is_error()));
        checks.extend(results);
    }
    let required_files = checks.len();

    ctx.section("🐍", "Validating Python code examples");
    let files = snippet_files(root, config)?;
    let snippet_files = files.len();
    let snippets = snippet_checks(files, config, ctx)?;
    let snippets_checked = snippets.len();
    test_results.insert(
        CODE_EXAMPLES.to_string(),
        snippets.iter().all(|r| r.status != Status::Error),
    );
    checks.extend(snippets);

    let mut tally = Tally::new();
    tally.extend(&checks);
    say_totals(ctx, &tally);

    let passed = test_results.values().all(|&ok| ok) && !ctx.has_errors();
    let recommendations = recommendations(&tally);

    Ok(PipelineOutcome {
        results: ContentResults {
            required_files,
            snippet_files,
            snippets_checked,
            tally,
            checks,
        },
        test_results,
        recommendations,
        passed,
    })
}

// Snippet files are the snippet globs narrowed to paths mentioning a filter
fn snippet_files(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let files = FileSet::new(&config.content.snippet_globs, &config.scan.skip_dirs)?.collect(root)?;
    Ok(files
        .into_iter()
        .filter(|file| passes_path_filters(&relative_to(root, file), &config.content))
        .collect())
}

fn passes_path_filters(relative: &str, content: &ContentConfig) -> bool {
    content.path_filters.is_empty() || content.path_filters.iter().any(|f| relative.contains(f.as_str()))
}

fn snippet_checks(files: Vec<PathBuf>, config: &Config, ctx: &mut RunContext) -> Result<Vec<CheckResult>> {
    let content = &config.content;
    let scanner = Scanner::new(files, Extractor::Patterns(PatternTable::snippets(&content.marker)?));
    let checker = SnippetChecker::new(&config.snippet).context("failed to set up the Python snippet parser")?;

    let mut results = Vec::new();
    for item in scanner.facts() {
        let fact = match item {
            Ok(fact) => unescape(fact),
            Err(e) => {
                ctx.warning(format!("Failed to extract code: {e}"));
                continue;
            }
        };
        let Some(block) = classify_code_block(fact, &content.marker, content.min_snippet_len) else {
            continue;
        };

        let source = block.fact.location();
        let verdict = checker.check(block.text(), &source)?;
        for finding in &verdict.findings {
            match finding.status {
                Status::Error => ctx.error(finding.message.clone()),
                Status::Warning => ctx.warning(finding.message.clone()),
                Status::Ok => ctx.success(&finding.message),
            }
        }

        let result = verdict.into_result(block);
        if result.status == Status::Ok {
            ctx.success(&result.detail);
        }
        results.push(result);
    }

    Ok(results)
}

// Snippets live inside JS string literals, so `\n` and `\"` are still escaped
fn unescape(fact: ExtractedFact) -> ExtractedFact {
    let code = fact.raw_text.replace("\\n", "\n").replace("\\\"", "\"");
    ExtractedFact::new(code, fact.source_file, fact.source_line)
}

fn recommendations(tally: &Tally) -> Vec<String> {
    let mut out = Vec::new();
    let required = tally.get(FactCategory::RequiredFile);
    let snippets = tally.get(FactCategory::CodeBlock);

    if required.error > 0 {
        out.push(format!("Create or update references to {} missing file(s)", required.error));
    }
    if snippets.error > 0 {
        out.push(format!("Fix {} code example(s) with syntax errors or impossible metric values", snippets.error));
    }
    if snippets.warning > 0 {
        out.push(format!("Align {} code example(s) with the published client API", snippets.warning));
    }
    out
}
