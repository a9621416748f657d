// src/report/mod.rs
// =============================================================================
// The Score Aggregator.
//
// Submodules:
// - console: RunContext, which prints diagnostics and collects them
//
// This file holds the pieces every command aggregates with:
// - Tally: ok/warning/error counts per category
// - Tier: "good" / "moderate" / "limited" from a count and two cut points
// - RunReport: the JSON artifact written at the end of a run
// =============================================================================

mod console;

pub use console::RunContext;

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::facts::{CheckResult, FactCategory, Status};

/// ok/warning/error counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
}

impl Counts {
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Ok => self.ok += 1,
            Status::Warning => self.warning += 1,
            Status::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.warning + self.error
    }

    /// A category passes when nothing in it errored
    pub fn passed(&self) -> bool {
        self.error == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    by_category: BTreeMap<FactCategory, Counts>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: &CheckResult) {
        self.by_category.entry(result.fact.category).or_default().add(result.status);
    }

    pub fn extend<'a>(&mut self, results: impl IntoIterator<Item = &'a CheckResult>) {
        for result in results {
            self.add(result);
        }
    }

    pub fn get(&self, category: FactCategory) -> Counts {
        self.by_category.get(&category).copied().unwrap_or_default()
    }

    pub fn totals(&self) -> Counts {
        self.by_category.values().fold(Counts::default(), |acc, c| Counts {
            ok: acc.ok + c.ok,
            warning: acc.warning + c.warning,
            error: acc.error + c.error,
        })
    }
}

/// Coarse qualitative bucket for a heuristic count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Moderate,
    Limited,
}

impl Tier {
    /// `count > good` is Good, `count > moderate` is Moderate, else Limited.
    pub fn from_count(count: usize, good: usize, moderate: usize) -> Self {
        if count > good {
            Tier::Good
        } else if count > moderate {
            Tier::Moderate
        } else {
            Tier::Limited
        }
    }

    pub fn passes(self) -> bool {
        matches!(self, Tier::Good | Tier::Moderate)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Good => "Good",
            Tier::Moderate => "Moderate",
            Tier::Limited => "Limited",
        }
    }
}

/// Share of passing entries, 0.0 for an empty map.
pub fn pass_ratio(test_results: &BTreeMap<String, bool>) -> f64 {
    if test_results.is_empty() {
        return 0.0;
    }
    let passed = test_results.values().filter(|&&ok| ok).count();
    passed as f64 / test_results.len() as f64
}

/// How a run is judged: a ratio (ux) or a plain boolean (links, content).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    OverallScore(f64),
    OverallValid(bool),
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<R: Serialize> {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub results: R,
    pub test_results: BTreeMap<String, bool>,
    pub recommendations: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl<R: Serialize> RunReport<R> {
    pub fn new(results: R, test_results: BTreeMap<String, bool>, verdict: Verdict, ctx: &RunContext) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            results,
            test_results,
            recommendations: Vec::new(),
            errors: ctx.errors.clone(),
            warnings: ctx.warnings.clone(),
            verdict,
        }
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Write the report, replacing any previous file at `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("failed to write report to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ClassifiedFact, ExtractedFact};

    fn result(category: FactCategory, status: Status) -> CheckResult {
        let fact = ClassifiedFact::new(ExtractedFact::new("x", "a.tsx", 1), category);
        match status {
            Status::Ok => CheckResult::ok(fact, ""),
            Status::Warning => CheckResult::warning(fact, ""),
            Status::Error => CheckResult::error(fact, ""),
        }
    }

    #[test]
    fn test_tally_counts_per_category() {
        let results = vec![
            result(FactCategory::InternalLink, Status::Ok),
            result(FactCategory::InternalLink, Status::Warning),
            result(FactCategory::ExternalLink, Status::Error),
        ];
        let mut tally = Tally::new();
        tally.extend(&results);

        assert_eq!(tally.get(FactCategory::InternalLink), Counts { ok: 1, warning: 1, error: 0 });
        assert!(!tally.get(FactCategory::ExternalLink).passed());
        assert_eq!(tally.get(FactCategory::CodeBlock).total(), 0);
        assert_eq!(tally.totals().total(), 3);
    }

    #[test]
    fn test_tier_boundaries_are_strict() {
        assert_eq!(Tier::from_count(51, 50, 20), Tier::Good);
        assert_eq!(Tier::from_count(50, 50, 20), Tier::Moderate);
        assert_eq!(Tier::from_count(21, 50, 20), Tier::Moderate);
        assert_eq!(Tier::from_count(20, 50, 20), Tier::Limited);
        assert!(!Tier::Limited.passes());
    }

    #[test]
    fn test_pass_ratio() {
        let mut tests = BTreeMap::new();
        assert_eq!(pass_ratio(&tests), 0.0);
        tests.insert("a".to_string(), true);
        tests.insert("b".to_string(), true);
        tests.insert("c".to_string(), false);
        tests.insert("d".to_string(), false);
        tests.insert("e".to_string(), true);
        assert!((pass_ratio(&tests) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_shape() {
        let mut ctx = RunContext::new(true);
        ctx.warning("slow");
        let report = RunReport::new(
            serde_json::json!({ "links": 3 }),
            BTreeMap::from([("Links".to_string(), true)]),
            Verdict::OverallScore(0.8),
            &ctx,
        )
        .with_recommendations(vec!["do better".to_string()]);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["overall_score"], 0.8);
        assert_eq!(value["warnings"][0], "slow");
        assert_eq!(value["test_results"]["Links"], true);
        assert_eq!(value["recommendations"][0], "do better");
        assert!(value["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "stale").unwrap();

        let ctx = RunContext::new(true);
        RunReport::new(Vec::<u8>::new(), BTreeMap::new(), Verdict::OverallValid(true), &ctx)
            .write(&path)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["overall_valid"], true);
    }
}
