// src/pipeline/ux.rs
// =============================================================================
// `site-guardian ux`
//
// Runs the five keyword heuristics, turns each into a pass/fail entry, and
// scores the run as the share of passing entries. The run passes at or above
// the configured threshold (0.6 by default).
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::PipelineOutcome;
use crate::config::Config;
use crate::heuristics::{
    check_accessibility, check_learning_paths, check_page_optimization, check_performance_budgets,
    check_responsive_design, AccessibilityResult, LearningPathResult, OptimizationResult, PerformanceBudgetResult,
    ResponsiveResult,
};
use crate::report::{pass_ratio, RunContext, Tier};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageOptimization {
    #[serde(flatten)]
    pub checks: BTreeMap<String, OptimizationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_budgets: Option<PerformanceBudgetResult>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowserCompatibility {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityResult>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UxResults {
    pub learning_paths: BTreeMap<String, LearningPathResult>,
    pub page_optimization: PageOptimization,
    pub browser_compatibility: BrowserCompatibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_responsiveness: Option<ResponsiveResult>,
}

/// What `site-guardian ux` returns: the outcome plus the ratio it was judged on.
#[derive(Debug)]
pub struct UxOutcome {
    pub outcome: PipelineOutcome<UxResults>,
    pub score: f64,
}

pub fn run(root: &Path, config: &Config, ctx: &mut RunContext) -> Result<UxOutcome> {
    if !root.is_dir() {
        anyhow::bail!("site root '{}' is not a readable directory", root.display());
    }

    ctx.say("🎨 Starting UX testing...");
    ctx.say("=".repeat(60));

    let ux = &config.ux;
    let skip = &config.scan.skip_dirs;
    let mut results = UxResults::default();
    let mut test_results = BTreeMap::new();

    ctx.section("🎯", "Testing learning path structure");
    let (learning_ok, paths) = check_learning_paths(root, &ux.learning_paths, &ux.interactive_elements, ctx);
    results.learning_paths = paths;
    test_results.insert("Learning Paths".to_string(), learning_ok);

    ctx.section("⚡", "Testing page load optimization");
    let (optimized, checks) = check_page_optimization(root, &ux.optimizations, skip, ctx)?;
    results.page_optimization.checks = checks;
    test_results.insert("Page Optimization".to_string(), optimized);

    ctx.section("📱", "Testing responsive design");
    let (responsive_ok, responsive) = check_responsive_design(root, &ux.responsive, skip, ctx)?;
    results.mobile_responsiveness = Some(responsive);
    test_results.insert("Responsive Design".to_string(), responsive_ok);

    ctx.section("♿", "Testing accessibility compliance");
    let (a11y_ok, a11y) = check_accessibility(root, &ux.accessibility, skip, ctx)?;
    results.browser_compatibility.accessibility = Some(a11y);
    test_results.insert("Accessibility".to_string(), a11y_ok);

    ctx.section("📊", "Testing performance budgets");
    let (budgets_ok, budgets) = check_performance_budgets(root, &ux.performance, skip, ctx)?;
    results.page_optimization.performance_budgets = Some(budgets);
    test_results.insert("Performance Budgets".to_string(), budgets_ok);

    let recommendations = recommendations(&results);
    let score = pass_ratio(&test_results);

    Ok(UxOutcome {
        outcome: PipelineOutcome {
            results,
            test_results,
            recommendations,
            passed: score >= ux.pass_threshold,
        },
        score,
    })
}

pub fn recommendations(results: &UxResults) -> Vec<String> {
    let mut out = Vec::new();

    for (name, path) in &results.learning_paths {
        if !path.missing_steps.is_empty() {
            out.push(format!("Complete missing steps in {name} learning path: {:?}", path.missing_steps));
        }
    }

    let budgets_configured = results
        .page_optimization
        .performance_budgets
        .as_ref()
        .is_some_and(|b| b.configured);
    if !budgets_configured {
        out.push("Configure performance budgets and monitoring".to_string());
    }

    if results
        .mobile_responsiveness
        .as_ref()
        .is_some_and(|r| r.responsive_score == Tier::Limited)
    {
        out.push("Improve responsive design with more breakpoint-specific styling".to_string());
    }

    if results
        .browser_compatibility
        .accessibility
        .as_ref()
        .is_some_and(|a| a.score == Tier::Limited)
    {
        out.push("Improve accessibility with more ARIA labels and semantic HTML".to_string());
    }

    out
}

/// Glyph and wording for a score, given the pass and excellent thresholds.
pub fn score_label(score: f64, pass: f64, excellent: f64) -> (&'static str, &'static str) {
    if score >= excellent {
        ("✅", "Excellent user experience!")
    } else if score >= pass {
        ("⚠️ ", "Good, with room for improvement")
    } else {
        ("❌", "Needs significant UX improvements")
    }
}
