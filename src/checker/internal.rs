// src/checker/internal.rs
// =============================================================================
// Resolves internal links against the route table and the filesystem.
//
// Decision order for a link (after stripping ?query and #fragment):
//
//   1. In the route table       -> ok if the mapped file exists, else error
//   2. Under a docs namespace   -> warning "unknown docs route"
//   3. Under an asset namespace -> ok if present under the asset root,
//                                  else warning (never an error)
//   4. Any other "/..." path    -> warning "unknown internal route"
//   5. Relative reference       -> not resolved (None)
// =============================================================================

use std::path::{Path, PathBuf};

use crate::config::LinksConfig;
use crate::facts::{CheckResult, ClassifiedFact};

pub struct RouteResolver<'a> {
    site_root: &'a Path,
    config: &'a LinksConfig,
}

impl<'a> RouteResolver<'a> {
    pub fn new(site_root: &'a Path, config: &'a LinksConfig) -> Self {
        Self { site_root, config }
    }

    pub fn check(&self, fact: ClassifiedFact) -> Option<CheckResult> {
        let link = fact.text().trim().to_string();
        let clean = strip_query_and_fragment(&link);

        if let Some(file) = self.config.routes.get(clean) {
            let path = self.site_root.join(file);
            return Some(if path.exists() {
                CheckResult::ok(fact, format!("Internal link valid: {link}"))
            } else {
                CheckResult::error(
                    fact,
                    format!("Internal link points to missing file: {link} -> {}", path.display()),
                )
            });
        }

        if starts_with_any(clean, &self.config.docs_namespaces) {
            return Some(CheckResult::warning(fact, format!("Unknown docs route: {link}")));
        }

        if !clean.starts_with('/') {
            tracing::debug!(link = %link, "relative reference left unresolved");
            return None;
        }

        if starts_with_any(clean, &self.config.asset_namespaces) {
            let asset = self.asset_path(clean);
            return Some(if asset.exists() {
                CheckResult::ok(fact, format!("Static asset found: {link}"))
            } else {
                CheckResult::warning(fact, format!("Static asset not found: {link}"))
            });
        }

        Some(CheckResult::warning(fact, format!("Unknown internal route: {link}")))
    }

    fn asset_path(&self, clean: &str) -> PathBuf {
        self.site_root
            .join(&self.config.asset_root)
            .join(clean.trim_start_matches('/'))
    }
}

/// `/docs/a?x=1#top` -> `/docs/a`
pub fn strip_query_and_fragment(link: &str) -> &str {
    let without_query = link.split('?').next().unwrap_or(link);
    without_query.split('#').next().unwrap_or(without_query)
}

fn starts_with_any(link: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| link.starts_with(prefix.as_str()))
}
