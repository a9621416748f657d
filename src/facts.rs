// src/facts.rs
// =============================================================================
// The records that flow through every pipeline:
//
//   ExtractedFact   -> what a regex (or the markdown parser) found, and where
//   ClassifiedFact  -> the same fact, bucketed into a category
//   CheckResult     -> the verdict for one classified fact
//
// All three are plain values. Nothing mutates them after construction; a
// pipeline only ever builds new ones from old ones.
// =============================================================================

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A single unit of interest pulled out of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFact {
    /// The captured text (a URL, a code snippet, a keyword)
    pub raw_text: String,
    /// File the text was found in
    pub source_file: PathBuf,
    /// 1-indexed line of the match start
    pub source_line: usize,
}

impl ExtractedFact {
    pub fn new(raw_text: impl Into<String>, source_file: impl Into<PathBuf>, source_line: usize) -> Self {
        Self {
            raw_text: raw_text.into(),
            source_file: source_file.into(),
            source_line: source_line.max(1),
        }
    }

    /// `file:line`, the form every diagnostic uses to point at a fact
    pub fn location(&self) -> String {
        format!("{}:{}", self.source_file.display(), self.source_line)
    }
}

// What kind of fact this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FactCategory {
    InternalLink,
    ExternalLink,
    CodeBlock,
    KeywordHit,
    /// Expected files on disk (doc pages, demo components, backend examples)
    RequiredFile,
}

impl fmt::Display for FactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FactCategory::InternalLink => "internal-link",
            FactCategory::ExternalLink => "external-link",
            FactCategory::CodeBlock => "code-block",
            FactCategory::KeywordHit => "keyword-hit",
            FactCategory::RequiredFile => "required-file",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedFact {
    #[serde(flatten)]
    pub fact: ExtractedFact,
    pub category: FactCategory,
    /// e.g. the keyword category name, or the required-file group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl ClassifiedFact {
    pub fn new(fact: ExtractedFact, category: FactCategory) -> Self {
        Self {
            fact,
            category,
            sub_category: None,
        }
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.fact.raw_text
    }
}

/// Severity of a single check. There is no fourth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub fact: ClassifiedFact,
    pub status: Status,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(fact: ClassifiedFact, detail: impl Into<String>) -> Self {
        Self::new(fact, Status::Ok, detail)
    }

    pub fn warning(fact: ClassifiedFact, detail: impl Into<String>) -> Self {
        Self::new(fact, Status::Warning, detail)
    }

    pub fn error(fact: ClassifiedFact, detail: impl Into<String>) -> Self {
        Self::new(fact, Status::Error, detail)
    }

    fn new(fact: ClassifiedFact, status: Status, detail: impl Into<String>) -> Self {
        Self {
            fact,
            status,
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_formats_file_and_line() {
        let fact = ExtractedFact::new("/docs", "src/pages/Home.tsx", 12);
        assert_eq!(fact.location(), "src/pages/Home.tsx:12");
    }

    #[test]
    fn test_line_is_at_least_one() {
        let fact = ExtractedFact::new("x", "a.tsx", 0);
        assert_eq!(fact.source_line, 1);
    }

    #[test]
    fn test_check_result_constructors() {
        let fact = ClassifiedFact::new(ExtractedFact::new("/", "a.tsx", 1), FactCategory::InternalLink);
        assert!(CheckResult::error(fact.clone(), "missing").is_error());
        assert_eq!(CheckResult::warning(fact, "odd").status, Status::Warning);
    }
}
