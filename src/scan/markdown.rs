// src/scan/markdown.rs
// =============================================================================
// This module extracts link destinations from Markdown pages.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Can report the byte range each event came from (`into_offset_iter`)
//
// Unlike the regex tables used for TSX sources, this understands the markup,
// so `[text](url)` inside a code span is not mistaken for a link.
//
// Every destination is kept here, including `mailto:` and fragments. The
// classifier decides what to drop.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;

use super::patterns::line_of;
use crate::facts::ExtractedFact;

// Extracts all link and image destinations from Markdown text
//
// Example input:
//   "Check out [Rust](https://www.rust-lang.org)!"
//
// Example output:
//   one fact with raw_text "https://www.rust-lang.org" on line 1
pub fn extract_markdown_links(markdown: &str, source_file: &Path) -> Vec<ExtractedFact> {
    let mut links = Vec::new();

    // into_offset_iter pairs each event with the byte range it covers
    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::Link(_link_type, dest_url, _title))
            | Event::Start(Tag::Image(_link_type, dest_url, _title)) => {
                let url = dest_url.to_string();
                if !url.is_empty() {
                    links.push(ExtractedFact::new(url, source_file, line_of(markdown, range.start)));
                }
            }
            // We don't care about other events (text, headings, etc.)
            _ => {}
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(markdown: &str) -> Vec<String> {
        extract_markdown_links(markdown, Path::new("README.md"))
            .into_iter()
            .map(|f| f.raw_text)
            .collect()
    }

    #[test]
    fn test_extract_simple_link() {
        assert_eq!(urls("Check out [Rust](https://www.rust-lang.org)!"), vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_extract_multiple_links_with_lines() {
        let markdown = r#"# Resources

- [Docs](/docs/getting-started)
- [Cargo](https://doc.rust-lang.org/cargo/)
- ![logo](/images/logo.png)
"#;
        let facts = extract_markdown_links(markdown, Path::new("README.md"));
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[0].raw_text, "/docs/getting-started");
        assert_eq!(facts[0].source_line, 3);
        assert_eq!(facts[2].raw_text, "/images/logo.png");
        assert_eq!(facts[2].source_line, 5);
    }

    #[test]
    fn test_code_spans_are_not_links() {
        assert!(urls("Write `[text](url)` to link.").is_empty());
    }

    #[test]
    fn test_mailto_is_kept_for_the_classifier() {
        assert_eq!(urls("Email me at [email](mailto:test@example.com)"), vec!["mailto:test@example.com"]);
    }
}
