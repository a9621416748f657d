// src/classify.rs
// =============================================================================
// The Fact Classifier: pure functions from ExtractedFact to ClassifiedFact.
//
// Links:
//   http:// or https://                    -> external
//   javascript:, mailto:, tel:, #..., ""   -> discarded (None)
//   anything else                          -> internal
//
// Code blocks must contain the import marker and be longer than the minimum
// length once trimmed.
//
// Keywords are looked up in a table of named categories. Categories overlap:
// a keyword listed under two categories is classified into both.
// =============================================================================

use crate::config::KeywordCategory;
use crate::facts::{ClassifiedFact, ExtractedFact, FactCategory};

const EXTERNAL_SCHEMES: [&str; 2] = ["http://", "https://"];
const DISCARDED_PREFIXES: [&str; 4] = ["javascript:", "mailto:", "tel:", "#"];

// Classifies a harvested link
//
// Returns None for links that are never checked (scripts, email, phone,
// in-page anchors, empty attributes).
pub fn classify_link(fact: ExtractedFact) -> Option<ClassifiedFact> {
    let url = fact.raw_text.trim();

    if url.is_empty() || DISCARDED_PREFIXES.iter().any(|p| url.starts_with(p)) {
        return None;
    }

    let category = if EXTERNAL_SCHEMES.iter().any(|s| url.starts_with(s)) {
        FactCategory::ExternalLink
    } else {
        FactCategory::InternalLink
    };

    Some(ClassifiedFact::new(fact, category))
}

// Accepts a snippet only if it carries the marker and has real content
pub fn classify_code_block(fact: ExtractedFact, marker: &str, min_len: usize) -> Option<ClassifiedFact> {
    let trimmed = fact.raw_text.trim();
    if !trimmed.contains(marker) || trimmed.chars().count() <= min_len {
        return None;
    }
    Some(ClassifiedFact::new(fact, FactCategory::CodeBlock))
}

/// Every category whose pattern list contains `keyword`.
pub fn keyword_categories<'a>(keyword: &str, categories: &'a [KeywordCategory]) -> Vec<&'a str> {
    categories
        .iter()
        .filter(|category| category.patterns.iter().any(|p| p == keyword))
        .map(|category| category.name.as_str())
        .collect()
}

/// One ClassifiedFact per category the keyword belongs to.
pub fn classify_keyword(fact: ExtractedFact, categories: &[KeywordCategory]) -> Vec<ClassifiedFact> {
    keyword_categories(&fact.raw_text, categories)
        .into_iter()
        .map(|name| ClassifiedFact::new(fact.clone(), FactCategory::KeywordHit).with_sub_category(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(text: &str) -> ExtractedFact {
        ExtractedFact::new(text, "src/A.tsx", 1)
    }

    fn category_of(text: &str) -> Option<FactCategory> {
        classify_link(fact(text)).map(|c| c.category)
    }

    #[test]
    fn test_external_links() {
        assert_eq!(category_of("https://example.com"), Some(FactCategory::ExternalLink));
        assert_eq!(category_of("http://example.com/a?b=c"), Some(FactCategory::ExternalLink));
    }

    #[test]
    fn test_internal_links() {
        assert_eq!(category_of("/docs/metrics"), Some(FactCategory::InternalLink));
        assert_eq!(category_of("docs/metrics"), Some(FactCategory::InternalLink));
        assert_eq!(category_of("/images/logo.png#top"), Some(FactCategory::InternalLink));
        assert_eq!(category_of("ftp://files.example.com"), Some(FactCategory::InternalLink));
    }

    #[test]
    fn test_discarded_links() {
        for url in ["javascript:void(0)", "mailto:a@b.c", "tel:+123", "#", "#section", "", "   "] {
            assert_eq!(category_of(url), None, "{url:?} should be discarded");
        }
    }

    #[test]
    fn test_code_block_length_and_marker() {
        let marker = "from blazemetrics";
        assert!(classify_code_block(fact("  from blazemetrics import X  "), marker, 10).is_some());
        assert!(classify_code_block(fact("import os; print(os.name)"), marker, 10).is_none());
        // "from blazemetrics" is 17 characters; a limit of 17 rejects it
        assert!(classify_code_block(fact("from blazemetrics"), marker, 17).is_none());
        assert!(classify_code_block(fact("from blazemetrics"), marker, 16).is_some());
    }

    #[test]
    fn test_keyword_categories_overlap() {
        let categories = vec![
            KeywordCategory {
                name: "aria_labels".to_string(),
                patterns: vec!["aria-label".to_string(), "aria-describedby".to_string()],
            },
            KeywordCategory {
                name: "alt_text".to_string(),
                patterns: vec!["alt=".to_string(), "aria-label".to_string()],
            },
        ];

        let classified = classify_keyword(fact("aria-label"), &categories);
        let names: Vec<_> = classified.iter().filter_map(|c| c.sub_category.as_deref()).collect();
        assert_eq!(names, vec!["aria_labels", "alt_text"]);

        assert_eq!(keyword_categories("alt=", &categories), vec!["alt_text"]);
        assert!(keyword_categories("tabIndex", &categories).is_empty());
    }
}
