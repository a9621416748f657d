// src/checker/common.rs
// =============================================================================
// Link smells that are not about whether a link resolves:
// - links to localhost (left over from development)
// - absolute links to the site's own domain (should be relative)
// - an empty fragment on an internal link ("/docs/metrics#")
//
// These run over every harvested link occurrence, not the deduplicated set,
// so each offending line is reported.
// =============================================================================

use url::Url;

use crate::facts::ClassifiedFact;

const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];

pub fn common_issues(links: &[ClassifiedFact], site_domains: &[String]) -> Vec<String> {
    let mut issues = Vec::new();

    for link in links {
        let url = link.text().trim();
        let source = link.fact.location();

        if is_local(url) {
            issues.push(format!("Localhost link found in {source}: {url}"));
        }

        if site_domains.iter().any(|domain| url.starts_with(domain.as_str())) {
            issues.push(format!("Hardcoded domain link in {source}: {url}"));
        }

        if !url.starts_with("http") {
            if let Some((_, fragment)) = url.split_once('#') {
                if fragment.is_empty() {
                    issues.push(format!("Empty fragment in {source}: {url}"));
                }
            }
        }
    }

    issues
}

fn is_local(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| LOCAL_HOSTS.contains(&host))
            .unwrap_or(false),
        // relative references have no host; fall back to a plain substring test
        Err(_) => url.contains("localhost"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ExtractedFact, FactCategory};

    fn links(urls: &[&str]) -> Vec<ClassifiedFact> {
        urls.iter()
            .map(|u| ClassifiedFact::new(ExtractedFact::new(*u, "src/A.tsx", 7), FactCategory::InternalLink))
            .collect()
    }

    #[test]
    fn test_detects_each_smell() {
        let domains = vec!["https://blazemetrics.".to_string()];
        let issues = common_issues(
            &links(&[
                "http://localhost:8080/docs",
                "https://blazemetrics.dev/docs",
                "/docs/metrics#",
                "/docs/metrics#bleu",
                "https://example.com/#",
            ]),
            &domains,
        );
        assert_eq!(
            issues,
            vec![
                "Localhost link found in src/A.tsx:7: http://localhost:8080/docs",
                "Hardcoded domain link in src/A.tsx:7: https://blazemetrics.dev/docs",
                "Empty fragment in src/A.tsx:7: /docs/metrics#",
            ]
        );
    }

    #[test]
    fn test_localhost_lookalikes_are_fine() {
        assert!(!is_local("https://notlocalhost.example.com"));
        assert!(is_local("http://127.0.0.1:3000"));
    }
}
