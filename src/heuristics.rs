// src/heuristics.rs
// =============================================================================
// Keyword heuristics behind `site-guardian ux`.
//
// None of these understand the page. They count substrings and compare the
// counts against configured thresholds:
//
// - learning paths: are the expected step titles mentioned in the component?
// - page optimization: do lazy-loading / bundling keywords appear?
// - responsive design: how many breakpoint-ish classes are there?
// - accessibility: how many ARIA / semantic / keyboard keywords are there?
// - performance budgets: do build configs mention budgets or lighthouse?
//
// Each check prints its own diagnostics through the RunContext and returns
// whether it passed plus a serializable result for the report.
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classify::classify_keyword;
use crate::config::{AccessibilityConfig, KeywordCategory, LearningPath, OptimizationCheck, PerformanceConfig, ResponsiveConfig};
use crate::report::{RunContext, Tier};
use crate::scan::{read_text, Extractor, FileSet, PatternTable, Scanner};

#[derive(Debug, Clone, Serialize)]
pub struct LearningPathResult {
    pub component_exists: bool,
    pub missing_steps: Vec<String>,
    pub interactive_elements: Vec<String>,
    pub step_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub optimizations_found: Vec<String>,
    pub optimization_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponsiveResult {
    pub total_responsive_classes: usize,
    pub responsive_score: Tier,
    pub files_with_responsive: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessibilityResult {
    pub total_features: usize,
    pub score: Tier,
    pub category_scores: BTreeMap<String, usize>,
    pub a11y_libraries: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceBudgetResult {
    pub configured: bool,
    pub configurations: Vec<String>,
}

/// Keyword hits per category and per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    pub by_category: BTreeMap<String, usize>,
    pub by_file: BTreeMap<PathBuf, usize>,
}

impl KeywordCounts {
    pub fn total(&self) -> usize {
        self.by_category.values().sum()
    }
}

// Counts every keyword occurrence in `files`
//
// One literal pattern per distinct keyword is scanned; each hit is then
// classified into every category that lists the keyword, so a keyword shared
// by two categories counts once in each.
pub fn count_keywords(files: Vec<PathBuf>, categories: &[KeywordCategory], ctx: &mut RunContext) -> Result<KeywordCounts> {
    let keywords: Vec<&str> = categories
        .iter()
        .flat_map(|c| c.patterns.iter().map(String::as_str))
        .collect();
    let table = PatternTable::keywords(&keywords)?;

    let mut counts = KeywordCounts::default();
    for category in categories {
        counts.by_category.entry(category.name.clone()).or_insert(0);
    }
    if table.is_empty() {
        return Ok(counts);
    }

    tracing::debug!(keywords = table.len(), files = files.len(), "counting keywords");
    let scanner = Scanner::new(files, Extractor::Patterns(table));

    for item in scanner.facts() {
        match item {
            Ok(fact) => {
                let file = fact.source_file.clone();
                for classified in classify_keyword(fact, categories) {
                    if let Some(name) = classified.sub_category {
                        *counts.by_category.entry(name).or_insert(0) += 1;
                        *counts.by_file.entry(file.clone()).or_insert(0) += 1;
                    }
                }
            }
            Err(e) => ctx.warning(format!("Failed to check keywords: {e}")),
        }
    }

    Ok(counts)
}

pub fn check_learning_paths(
    root: &Path,
    paths: &[LearningPath],
    interactive_elements: &[String],
    ctx: &mut RunContext,
) -> (bool, BTreeMap<String, LearningPathResult>) {
    let mut all_valid = true;
    let mut results = BTreeMap::new();

    for path in paths {
        let component = root.join(&path.component);
        if !component.exists() {
            ctx.error(format!("Learning path component missing: {}", path.component));
            all_valid = false;
            continue;
        }

        let content = match read_text(&component) {
            Ok(content) => content,
            Err(e) => {
                ctx.error(format!("Failed to analyze {} learning path: {e}", path.name));
                all_valid = false;
                continue;
            }
        };

        let lowered = content.to_lowercase();
        let missing_steps: Vec<String> = path
            .expected_steps
            .iter()
            .filter(|step| !lowered.contains(&step.to_lowercase()))
            .cloned()
            .collect();

        if missing_steps.is_empty() {
            ctx.success(format!("{} learning path structure complete", path.name));
        } else {
            ctx.warning(format!("{} path missing steps: {:?}", path.name, missing_steps));
        }

        let found_elements: Vec<String> = interactive_elements
            .iter()
            .filter(|element| content.contains(element.as_str()))
            .cloned()
            .collect();

        results.insert(
            path.name.clone(),
            LearningPathResult {
                component_exists: true,
                step_count: path.expected_steps.len() - missing_steps.len(),
                missing_steps,
                interactive_elements: found_elements,
            },
        );
    }

    (all_valid, results)
}

/// Which of `patterns` appear in any of `files`, in pattern order.
fn patterns_present(files: &[PathBuf], patterns: &[String], ctx: &mut RunContext) -> Vec<String> {
    let mut found = vec![false; patterns.len()];
    for file in files {
        match read_text(file) {
            Ok(content) => {
                for (i, pattern) in patterns.iter().enumerate() {
                    found[i] |= content.contains(pattern.as_str());
                }
            }
            Err(e) => ctx.warning(format!("Failed to check {}: {e}", file.display())),
        }
    }
    patterns
        .iter()
        .zip(found)
        .filter(|(_, hit)| *hit)
        .map(|(pattern, _)| pattern.clone())
        .collect()
}

pub fn check_page_optimization(
    root: &Path,
    checks: &[OptimizationCheck],
    skip_dirs: &[String],
    ctx: &mut RunContext,
) -> Result<(bool, BTreeMap<String, OptimizationResult>)> {
    let mut all_optimized = true;
    let mut results = BTreeMap::new();

    for check in checks {
        let files = FileSet::new(&check.files, skip_dirs)?.collect(root)?;
        let found = patterns_present(&files, &check.patterns, ctx);

        if found.is_empty() {
            ctx.warning(format!("No {} optimizations detected", check.name));
            all_optimized = false;
        } else {
            ctx.success(format!("{} optimizations found: {:?}", check.name, found));
        }

        results.insert(
            check.name.clone(),
            OptimizationResult {
                optimization_count: found.len(),
                optimizations_found: found,
            },
        );
    }

    Ok((all_optimized, results))
}

pub fn check_responsive_design(
    root: &Path,
    config: &ResponsiveConfig,
    skip_dirs: &[String],
    ctx: &mut RunContext,
) -> Result<(bool, ResponsiveResult)> {
    let files = FileSet::new(&config.globs, skip_dirs)?.collect(root)?;
    let category = KeywordCategory {
        name: "responsive".to_string(),
        patterns: config.patterns.clone(),
    };
    let counts = count_keywords(files, std::slice::from_ref(&category), ctx)?;
    let total = counts.total();
    let tier = Tier::from_count(total, config.good, config.moderate);

    let message = format!(
        "{} responsive design usage: {total} responsive classes found",
        tier.label()
    );
    match tier {
        Tier::Good => ctx.success(message),
        _ => ctx.warning(message),
    }

    Ok((
        tier.passes(),
        ResponsiveResult {
            total_responsive_classes: total,
            responsive_score: tier,
            files_with_responsive: counts.by_file.len(),
        },
    ))
}

pub fn check_accessibility(
    root: &Path,
    config: &AccessibilityConfig,
    skip_dirs: &[String],
    ctx: &mut RunContext,
) -> Result<(bool, AccessibilityResult)> {
    let files = FileSet::new(&config.globs, skip_dirs)?.collect(root)?;
    let counts = count_keywords(files, &config.categories, ctx)?;
    let total = counts.total();
    let tier = Tier::from_count(total, config.good, config.moderate);

    let message = format!(
        "{} accessibility implementation: {total} a11y features found",
        tier.label()
    );
    match tier {
        Tier::Good => ctx.success(message),
        _ => ctx.warning(message),
    }

    let libraries = accessibility_libraries(&root.join(&config.manifest), &config.library_markers, ctx);

    Ok((
        tier.passes(),
        AccessibilityResult {
            total_features: total,
            score: tier,
            category_scores: counts.by_category,
            a11y_libraries: libraries,
        },
    ))
}

// Dependency names in a package.json that look like accessibility tooling
fn accessibility_libraries(manifest: &Path, markers: &[String], ctx: &mut RunContext) -> Vec<String> {
    if !manifest.exists() {
        return Vec::new();
    }

    let parsed = read_text(manifest)
        .map_err(anyhow::Error::from)
        .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).map_err(anyhow::Error::from));
    let manifest_json = match parsed {
        Ok(value) => value,
        Err(e) => {
            ctx.warning(format!("Failed to check {} for a11y libraries: {e}", manifest.display()));
            return Vec::new();
        }
    };

    let mut libraries = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        let Some(deps) = manifest_json.get(section).and_then(|d| d.as_object()) else {
            continue;
        };
        for name in deps.keys() {
            let lowered = name.to_lowercase();
            if markers.iter().any(|m| lowered.contains(m.as_str())) && !libraries.contains(name) {
                libraries.push(name.clone());
            }
        }
    }
    libraries
}

pub fn check_performance_budgets(
    root: &Path,
    config: &PerformanceConfig,
    skip_dirs: &[String],
    ctx: &mut RunContext,
) -> Result<(bool, PerformanceBudgetResult)> {
    let files = FileSet::new(&config.files, skip_dirs)?.collect(root)?;
    let found = patterns_present(&files, &config.patterns, ctx);
    let configured = !found.is_empty();

    if configured {
        ctx.success(format!("Performance configurations found: {:?}", found));
    } else {
        ctx.warning("No performance budgets or monitoring configured");
    }

    Ok((
        configured,
        PerformanceBudgetResult {
            configured,
            configurations: found,
        },
    ))
}
