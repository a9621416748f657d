// src/checker/mod.rs
// =============================================================================
// The Resolution Checker: confirms classified facts against ground truth.
//
// Submodules:
// - internal: route table + filesystem lookups for internal links
// - http: sequential HEAD/GET probes for external links
// - common: link smells (localhost, hardcoded domain, empty fragment)
// - snippet: tree-sitter validation of embedded Python snippets
// - files: existence checks for required files
// =============================================================================

mod common;
mod files;
mod http;
mod internal;
mod snippet;

pub use common::common_issues;
pub use files::check_required;
pub use http::ExternalChecker;
pub use internal::RouteResolver;
pub use snippet::SnippetChecker;

use std::collections::HashSet;

use crate::facts::ClassifiedFact;

/// Keep the first occurrence of each distinct link text, in order.
pub fn dedupe_by_text(facts: &[ClassifiedFact]) -> Vec<ClassifiedFact> {
    let mut seen = HashSet::new();
    facts
        .iter()
        .filter(|fact| seen.insert(fact.text().trim().to_string()))
        .cloned()
        .collect()
}
