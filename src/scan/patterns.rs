// src/scan/patterns.rs
// =============================================================================
// Pattern tables: ordered lists of regex rules.
//
// The extraction rules are data, not code. A rule only harvests text; the
// category of a fact is decided by the classifier, since an href can hold an
// internal route as well as an external URL. A table is applied to the full
// text of a file; every match of every pattern becomes one ExtractedFact whose
// text is capture group 1 (or the whole match when the pattern has no group).
//
// Patterns overlap on purpose. `href="https://x"` is matched by both the href
// rule and the quoted-URL rule, and both facts are kept. Deduplication happens
// later and only where a checker needs it.
//
// Regex extraction does not understand JSX or TypeScript. A URL built at
// runtime, or an attribute written with braces, is invisible to these rules.
// =============================================================================

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::path::Path;

use crate::facts::ExtractedFact;

#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    patterns: Vec<Regex>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules are applied in insertion order.
    pub fn push(&mut self, pattern: &str) -> Result<&mut Self> {
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .build()
            .with_context(|| format!("invalid extraction pattern '{pattern}'"))?;
        self.patterns.push(regex);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The link harvesting rules used by `site-guardian links`.
    pub fn links() -> Result<Self> {
        let mut table = Self::new();
        table
            // href attributes
            .push(r#"href=["'](.*?)["']"#)?
            // to attributes (React Router)
            .push(r#"to=["'](.*?)["']"#)?
            // src attributes for images
            .push(r#"src=["'](.*?)["']"#)?
            // markdown-like [text](url) inside strings
            .push(r"\[.*?\]\((.*?)\)")?
            // template literal URLs
            .push(r"`(https?://[^`]*)`")?
            // quoted URLs
            .push(r#""(https?://[^"]*)""#)?
            .push(r"'(https?://[^']*)'")?;
        Ok(table)
    }

    /// The snippet rules used by `site-guardian content`.
    ///
    /// Each rule captures a template or string literal containing `marker`.
    pub fn snippets(marker: &str) -> Result<Self> {
        let marker = regex::escape(marker);
        let mut table = Self::new();
        table
            .push(&format!(r"const\s+\w+\s*=\s*`([^`]*{marker}[^`]*)`"))?
            .push(&format!(r"code=\{{`([^`]*{marker}[^`]*)`\}}"))?
            .push(&format!(r#"code=\{{"([^"]*{marker}[^"]*)""#))?;
        Ok(table)
    }

    /// One literal rule per distinct keyword.
    ///
    /// A literal counted by `find_iter` gives the same count as a
    /// non-overlapping substring count.
    pub fn keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let mut table = Self::new();
        let mut seen = std::collections::HashSet::new();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if keyword.is_empty() || !seen.insert(keyword) {
                continue;
            }
            table.push(&regex::escape(keyword))?;
        }
        Ok(table)
    }

    /// Apply every rule to `content`, in table order.
    pub fn extract(&self, content: &str, source_file: &Path) -> Vec<ExtractedFact> {
        let mut facts = Vec::new();
        for regex in &self.patterns {
            for captures in regex.captures_iter(content) {
                let Some(whole) = captures.get(0) else {
                    continue;
                };
                let text = captures.get(1).unwrap_or(whole).as_str();
                facts.push(ExtractedFact::new(
                    text,
                    source_file,
                    line_of(content, whole.start()),
                ));
            }
        }
        facts
    }
}

/// 1-indexed line containing byte `offset`.
pub fn line_of(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(facts: &[ExtractedFact]) -> Vec<&str> {
        facts.iter().map(|f| f.raw_text.as_str()).collect()
    }

    #[test]
    fn test_line_of() {
        let content = "a\nb\nc";
        assert_eq!(line_of(content, 0), 1);
        assert_eq!(line_of(content, 2), 2);
        assert_eq!(line_of(content, 4), 3);
        assert_eq!(line_of(content, 999), 3);
    }

    #[test]
    fn test_no_matches_yields_nothing() {
        let table = PatternTable::links().unwrap();
        let facts = table.extract("export const x = 1;\n", Path::new("a.tsx"));
        assert!(facts.is_empty());
    }

    #[test]
    fn test_link_rules_keep_overlapping_matches() {
        let table = PatternTable::links().unwrap();
        let content = "<Link to=\"/docs\">Docs</Link>\n<a href=\"https://example.com\">x</a>";
        let facts = table.extract(content, Path::new("A.tsx"));
        // href rule + double-quoted URL rule both see the external link
        assert_eq!(texts(&facts), vec!["https://example.com", "/docs", "https://example.com"]);
        assert_eq!(facts[0].source_line, 2);
        assert_eq!(facts[1].source_line, 1);
    }

    #[test]
    fn test_href_rule_harvests_both_link_kinds() {
        use crate::classify::classify_link;
        use crate::facts::FactCategory;

        let mut table = PatternTable::new();
        table.push(r#"href=["'](.*?)["']"#).unwrap();
        let content = "<a href=\"/docs\">a</a><a href=\"https://example.com\">b</a>";
        let categories: Vec<_> = table
            .extract(content, Path::new("A.tsx"))
            .into_iter()
            .filter_map(classify_link)
            .map(|c| c.category)
            .collect();
        assert_eq!(categories, vec![FactCategory::InternalLink, FactCategory::ExternalLink]);
    }

    #[test]
    fn test_snippet_rules() {
        let table = PatternTable::snippets("from blazemetrics").unwrap();
        let content = "const example = `from blazemetrics import BlazeMetricsClient\nclient = BlazeMetricsClient()`;\n<CodeBlock code={`print(1)`} />\n<CodeBlock code={\"from blazemetrics import X\"} />";
        let facts = table.extract(content, Path::new("docs/Page.tsx"));
        assert_eq!(facts.len(), 2);
        assert!(facts[0].raw_text.starts_with("from blazemetrics import BlazeMetricsClient"));
        assert_eq!(facts[1].raw_text, "from blazemetrics import X");
        assert_eq!(facts[1].source_line, 4);
    }

    #[test]
    fn test_keyword_rules_are_literal_and_deduplicated() {
        let table = PatternTable::keywords(&["sm:", "import(", "sm:"]).unwrap();
        assert_eq!(table.len(), 2);
        let facts = table.extract("sm:flex sm:grid import('x')", Path::new("a.tsx"));
        assert_eq!(texts(&facts), vec!["sm:", "sm:", "import("]);
    }
}
