// src/config.rs
// =============================================================================
// Configuration for all three pipelines, read from `.site-guardian.toml`.
//
// Every route table, allow-list and threshold the checks use lives here, so a
// site can describe its own API surface instead of inheriting ours. Each field
// has a serde default, which means a config file only needs the keys it wants
// to change. `site-guardian init` prints the full default file.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".site-guardian.toml";

/// Top-level configuration from `.site-guardian.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub snippet: SnippetConfig,
    #[serde(default)]
    pub ux: UxConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

// -----------------------------------------------------------------------------
// Scanning
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Globs (relative to the site root) of source files harvested for links
    #[serde(default = "default_source_globs")]
    pub source_globs: Vec<String>,
    /// Globs of markdown pages harvested for links
    #[serde(default = "default_markdown_globs")]
    pub markdown_globs: Vec<String>,
    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

fn default_source_globs() -> Vec<String> {
    strings(&["src/**/*.tsx", "src/**/*.ts"])
}

fn default_markdown_globs() -> Vec<String> {
    strings(&["*.md", "docs/**/*.md"])
}

fn default_skip_dirs() -> Vec<String> {
    strings(&["node_modules", "dist", "build"])
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_globs: default_source_globs(),
            markdown_globs: default_markdown_globs(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

// -----------------------------------------------------------------------------
// Links
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Prefixes whose unknown routes are downgraded to "unknown docs route"
    #[serde(default = "default_docs_namespaces")]
    pub docs_namespaces: Vec<String>,
    /// Prefixes served as static files from `asset_root`
    #[serde(default = "default_asset_namespaces")]
    pub asset_namespaces: Vec<String>,
    #[serde(default = "default_asset_root")]
    pub asset_root: String,
    /// Link prefixes that hardcode the site's own domain
    #[serde(default = "default_site_domains")]
    pub site_domains: Vec<String>,
    /// URL path -> file (relative to the site root) that implements it
    #[serde(default = "default_routes")]
    pub routes: BTreeMap<String, String>,
}

fn default_routes() -> BTreeMap<String, String> {
    [
        ("/", "src/pages/Home.tsx"),
        ("/docs/getting-started", "src/pages/docs/GettingStarted.tsx"),
        ("/docs/metrics", "src/pages/docs/MetricsGuide.tsx"),
        ("/docs/llm-integration", "src/pages/docs/LLMIntegrationGuide.tsx"),
        ("/docs/llm-use-cases", "src/pages/docs/LLMUseCases.tsx"),
        ("/docs/llm-safety", "src/pages/docs/LLMSafetyGuardrails.tsx"),
        ("/docs/advanced-evaluators", "src/pages/docs/AdvancedEvaluators.tsx"),
        ("/docs/api-reference", "src/pages/docs/APIReference.tsx"),
        ("/docs/architecture", "src/pages/docs/ArchitectureGuide.tsx"),
        ("/docs/analytics", "src/pages/docs/AnalyticsGuide.tsx"),
        ("/docs/production", "src/pages/docs/ProductionGuide.tsx"),
        ("/docs/guardrails", "src/pages/docs/GuardrailsGuide.tsx"),
        ("/use-cases", "src/pages/UseCases.tsx"),
        ("/benchmarks", "src/pages/Benchmarks.tsx"),
        ("/learning-paths", "src/pages/LearningPaths.tsx"),
        ("/about", "src/pages/About.tsx"),
        ("/blog", "src/pages/Blog.tsx"),
    ]
    .into_iter()
    .map(|(route, file)| (route.to_string(), file.to_string()))
    .collect()
}

fn default_docs_namespaces() -> Vec<String> {
    strings(&["/docs/"])
}

fn default_asset_namespaces() -> Vec<String> {
    strings(&["/images/", "/public/"])
}

fn default_asset_root() -> String {
    "public".to_string()
}

fn default_site_domains() -> Vec<String> {
    strings(&["https://blazemetrics.", "http://blazemetrics."])
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            routes: default_routes(),
            docs_namespaces: default_docs_namespaces(),
            asset_namespaces: default_asset_namespaces(),
            asset_root: default_asset_root(),
            site_domains: default_site_domains(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause before every external request
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_delay_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "BlazeMetrics-LinkValidator/1.0".to_string()
}

fn default_max_redirects() -> usize {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

// -----------------------------------------------------------------------------
// Content
// -----------------------------------------------------------------------------

/// A named group of files that must exist under at least one of `roots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredFiles {
    pub name: String,
    #[serde(default = "default_required_roots")]
    pub roots: Vec<String>,
    pub files: Vec<String>,
}

fn default_required_roots() -> Vec<String> {
    strings(&["."])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Globs of files searched for embedded snippets
    #[serde(default = "default_snippet_globs")]
    pub snippet_globs: Vec<String>,
    /// Only files whose path contains one of these substrings are searched
    #[serde(default = "default_path_filters")]
    pub path_filters: Vec<String>,
    /// Substring that marks a string literal as a snippet worth checking
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Snippets of this many trimmed characters or fewer are ignored
    #[serde(default = "default_min_snippet_len")]
    pub min_snippet_len: usize,
    #[serde(default = "default_required")]
    pub required: Vec<RequiredFiles>,
}

fn default_snippet_globs() -> Vec<String> {
    strings(&["src/**/*.tsx"])
}

fn default_path_filters() -> Vec<String> {
    strings(&["docs", "interactive"])
}

fn default_marker() -> String {
    "from blazemetrics".to_string()
}

fn default_min_snippet_len() -> usize {
    10
}

fn default_required() -> Vec<RequiredFiles> {
    vec![
        RequiredFiles {
            name: "backend example".to_string(),
            roots: strings(&["../blazemetrics-core/examples", "../blazemetrics-core/use_cases"]),
            files: strings(&[
                "01_basic_text_metrics.py",
                "10_complete_llm_workflow.py",
                "15_rag_semantic_search.py",
                "02_rag_search_and_provenance.py",
                "07_agent_eval.py",
            ]),
        },
        RequiredFiles {
            name: "documentation page".to_string(),
            roots: default_required_roots(),
            files: strings(&[
                "src/pages/docs/GettingStarted.tsx",
                "src/pages/docs/MetricsGuide.tsx",
                "src/pages/docs/LLMIntegrationGuide.tsx",
                "src/pages/docs/LLMUseCases.tsx",
                "src/pages/docs/AdvancedEvaluators.tsx",
            ]),
        },
        RequiredFiles {
            name: "interactive demo component".to_string(),
            roots: default_required_roots(),
            files: strings(&[
                "src/components/interactive/code-playground.tsx",
                "src/components/interactive/metric-comparison-tool.tsx",
                "src/components/interactive/hallucination-detective.tsx",
                "src/components/interactive/rag-quality-inspector.tsx",
                "src/components/interactive/agent-performance-monitor.tsx",
                "src/components/interactive/speed-demon-showcase.tsx",
            ]),
        },
    ]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            snippet_globs: default_snippet_globs(),
            path_filters: default_path_filters(),
            marker: default_marker(),
            min_snippet_len: default_min_snippet_len(),
            required: default_required(),
        }
    }
}

/// The API surface embedded snippets are allowed to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// Root package; only `from <package>...` imports are validated
    #[serde(default = "default_package")]
    pub package: String,
    /// Variable name calls are validated on (`client.method(...)`)
    #[serde(default = "default_client_object")]
    pub client_object: String,
    #[serde(default = "default_client_methods")]
    pub client_methods: Vec<String>,
    /// Constructor whose keyword arguments are validated
    #[serde(default = "default_client_class")]
    pub client_class: String,
    #[serde(default = "default_config_params")]
    pub config_params: Vec<String>,
    /// Markers of a metrics literal: once one shows up as `name:` in a
    /// snippet, every decimal field above `metric_limit` is an error
    #[serde(default = "default_metric_names")]
    pub metric_names: Vec<String>,
    #[serde(default = "default_metric_limit")]
    pub metric_limit: f64,
    /// module -> importable names
    #[serde(default = "default_imports")]
    pub imports: BTreeMap<String, Vec<String>>,
}

fn default_package() -> String {
    "blazemetrics".to_string()
}

fn default_imports() -> BTreeMap<String, Vec<String>> {
    [
        ("blazemetrics", "BlazeMetricsClient"),
        ("blazemetrics.llm_judge", "LLMJudge"),
        ("blazemetrics.agent_eval", "AgentEvaluator"),
        ("blazemetrics.code_evaluator", "CodeEvaluator"),
        ("blazemetrics.factuality_evaluator", "FactualityEvaluator"),
    ]
    .into_iter()
    .map(|(module, name)| (module.to_string(), vec![name.to_string()]))
    .collect()
}

fn default_client_object() -> String {
    "client".to_string()
}

fn default_client_methods() -> Vec<String> {
    strings(&[
        "compute_metrics",
        "aggregate_metrics",
        "check_safety",
        "add_metrics",
        "get_analytics_summary",
        "evaluate_agent",
        "evaluate_code",
        "set_factuality_scorer",
        "evaluate_factuality",
        "generate_model_card",
        "generate_data_card",
    ])
}

fn default_client_class() -> String {
    "BlazeMetricsClient".to_string()
}

fn default_config_params() -> Vec<String> {
    strings(&[
        "blocklist",
        "redact_pii",
        "regexes",
        "case_insensitive",
        "enable_analytics",
        "analytics_window",
        "analytics_alerts",
        "metrics_include",
        "metrics_lowercase",
    ])
}

fn default_metric_names() -> Vec<String> {
    strings(&[
        "rouge1_f1",
        "rouge2_f1",
        "rougeL_f1",
        "rouge1",
        "rouge2",
        "rougeL",
        "rouge",
        "bleu",
        "chrf",
        "meteor",
        "bert_score",
        "token_f1",
        "jaccard",
        "faithfulness",
        "accuracy",
        "precision",
        "recall",
    ])
}

fn default_metric_limit() -> f64 {
    1.0
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            imports: default_imports(),
            client_object: default_client_object(),
            client_methods: default_client_methods(),
            client_class: default_client_class(),
            config_params: default_config_params(),
            metric_names: default_metric_names(),
            metric_limit: default_metric_limit(),
        }
    }
}

// -----------------------------------------------------------------------------
// UX heuristics
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub name: String,
    pub component: String,
    pub expected_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationCheck {
    pub name: String,
    pub files: Vec<String>,
    pub patterns: Vec<String>,
}

/// A named list of substrings counted together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsiveConfig {
    #[serde(default = "default_responsive_globs")]
    pub globs: Vec<String>,
    #[serde(default = "default_responsive_patterns")]
    pub patterns: Vec<String>,
    /// Counts strictly above this are "good"
    #[serde(default = "default_responsive_good")]
    pub good: usize,
    /// Counts strictly above this are "moderate"
    #[serde(default = "default_responsive_moderate")]
    pub moderate: usize,
}

fn default_responsive_globs() -> Vec<String> {
    strings(&["src/**/*.tsx", "src/**/*.css"])
}

fn default_responsive_patterns() -> Vec<String> {
    strings(&[
        "sm:", "md:", "lg:", "xl:", "2xl:", "@media", "min-width", "max-width", "grid-cols-",
        "flex-col", "hidden",
    ])
}

fn default_responsive_good() -> usize {
    50
}

fn default_responsive_moderate() -> usize {
    20
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            globs: default_responsive_globs(),
            patterns: default_responsive_patterns(),
            good: default_responsive_good(),
            moderate: default_responsive_moderate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    #[serde(default = "default_a11y_globs")]
    pub globs: Vec<String>,
    #[serde(default = "default_a11y_good")]
    pub good: usize,
    #[serde(default = "default_a11y_moderate")]
    pub moderate: usize,
    /// Dependency manifest inspected for accessibility libraries
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_library_markers")]
    pub library_markers: Vec<String>,
    #[serde(default = "default_a11y_categories")]
    pub categories: Vec<KeywordCategory>,
}

fn default_a11y_globs() -> Vec<String> {
    strings(&["src/**/*.tsx"])
}

fn default_a11y_categories() -> Vec<KeywordCategory> {
    [
        ("aria_labels", &["aria-label", "aria-labelledby", "aria-describedby"][..]),
        (
            "semantic_html",
            &["<main", "<nav", "<header", "<footer", "<section", "<article"][..],
        ),
        ("keyboard_navigation", &["tabIndex", "onKeyDown", "onKeyPress"][..]),
        ("alt_text", &["alt=", "aria-label"][..]),
        ("focus_management", &["focus", "blur", "autoFocus"][..]),
    ]
    .into_iter()
    .map(|(name, patterns)| KeywordCategory {
        name: name.to_string(),
        patterns: strings(patterns),
    })
    .collect()
}

fn default_a11y_good() -> usize {
    100
}

fn default_a11y_moderate() -> usize {
    50
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_library_markers() -> Vec<String> {
    strings(&["a11y", "accessibility", "aria", "axe"])
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            globs: default_a11y_globs(),
            categories: default_a11y_categories(),
            good: default_a11y_good(),
            moderate: default_a11y_moderate(),
            manifest: default_manifest(),
            library_markers: default_library_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_performance_files")]
    pub files: Vec<String>,
    #[serde(default = "default_performance_patterns")]
    pub patterns: Vec<String>,
}

fn default_performance_files() -> Vec<String> {
    strings(&["vite.config.ts", "package.json", ".github/workflows/*.yml"])
}

fn default_performance_patterns() -> Vec<String> {
    strings(&[
        "chunkSizeWarningLimit",
        "build.rollupOptions",
        "lighthouse",
        "bundle-analyzer",
        "performance",
    ])
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            files: default_performance_files(),
            patterns: default_performance_patterns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UxConfig {
    #[serde(default = "default_interactive_elements")]
    pub interactive_elements: Vec<String>,
    /// Share of passing checks required for exit status 0
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    #[serde(default = "default_excellent_threshold")]
    pub excellent_threshold: f64,
    #[serde(default = "default_learning_paths")]
    pub learning_paths: Vec<LearningPath>,
    #[serde(default = "default_optimizations")]
    pub optimizations: Vec<OptimizationCheck>,
    #[serde(default)]
    pub responsive: ResponsiveConfig,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

fn default_learning_paths() -> Vec<LearningPath> {
    [
        (
            "beginner",
            "src/components/learning/beginner-path.tsx",
            &["Installation", "First Evaluation", "Understanding Results", "Next Steps"],
        ),
        (
            "intermediate",
            "src/components/learning/intermediate-guide.tsx",
            &["Advanced Configuration", "Multiple Metrics", "Guardrails Setup", "Production Usage"],
        ),
        (
            "advanced",
            "src/components/learning/advanced-technical.tsx",
            &[
                "Custom Evaluators",
                "Architecture Deep-dive",
                "Performance Optimization",
                "Extensibility",
            ],
        ),
    ]
    .into_iter()
    .map(|(name, component, steps)| LearningPath {
        name: name.to_string(),
        component: component.to_string(),
        expected_steps: strings(steps),
    })
    .collect()
}

fn default_interactive_elements() -> Vec<String> {
    strings(&["CodeBlock", "Button", "Card", "Tabs"])
}

fn default_optimizations() -> Vec<OptimizationCheck> {
    vec![
        OptimizationCheck {
            name: "code_splitting".to_string(),
            files: strings(&["src/main.tsx", "src/App.tsx"]),
            patterns: strings(&["lazy", "Suspense", "import("]),
        },
        OptimizationCheck {
            name: "image_optimization".to_string(),
            files: strings(&["src/**/*.tsx"]),
            patterns: strings(&["loading=\"lazy\"", "placeholder", "srcSet"]),
        },
        OptimizationCheck {
            name: "bundle_optimization".to_string(),
            files: strings(&["vite.config.ts", "package.json"]),
            patterns: strings(&["build.rollupOptions", "build.chunkSizeWarningLimit"]),
        },
    ]
}

fn default_pass_threshold() -> f64 {
    0.6
}

fn default_excellent_threshold() -> f64 {
    0.8
}

impl Default for UxConfig {
    fn default() -> Self {
        Self {
            learning_paths: default_learning_paths(),
            interactive_elements: default_interactive_elements(),
            optimizations: default_optimizations(),
            responsive: ResponsiveConfig::default(),
            accessibility: AccessibilityConfig::default(),
            performance: PerformanceConfig::default(),
            pass_threshold: default_pass_threshold(),
            excellent_threshold: default_excellent_threshold(),
        }
    }
}

// -----------------------------------------------------------------------------
// Reports
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_links_report")]
    pub links: String,
    #[serde(default = "default_content_report")]
    pub content: String,
    #[serde(default = "default_ux_report")]
    pub ux: String,
}

fn default_links_report() -> String {
    "link-validation-report.json".to_string()
}

fn default_content_report() -> String {
    "content-validation-report.json".to_string()
}

fn default_ux_report() -> String {
    "ux-test-report.json".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            links: default_links_report(),
            content: default_content_report(),
            ux: default_ux_report(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from a `.site-guardian.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `site-guardian init` to print a valid config file",
                path.display()
            )
        })?;
        Ok(config)
    }

    /// Find `.site-guardian.toml` in `dir` or any ancestor.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        start
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the discovered config, or return defaults.
    ///
    /// A discovered file that fails to parse is reported on stderr and the
    /// defaults are used instead.
    pub fn load_or_default(dir: &Path) -> Self {
        match Self::discover(dir) {
            Some(path) => match Self::load(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    eprintln!("⚠️  Warning: {e:#}. Using defaults.");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("failed to render default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.links.routes.get("/docs/metrics").map(String::as_str), Some("src/pages/docs/MetricsGuide.tsx"));
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.ux.responsive.good, 50);
        assert_eq!(config.ux.responsive.moderate, 20);
        assert_eq!(config.content.min_snippet_len, 10);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_str = r#"
[links]
docs_namespaces = ["/guide/"]

[links.routes]
"/guide/intro" = "src/pages/Intro.tsx"

[ux.responsive]
good = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.links.routes.len(), 1);
        assert_eq!(config.links.docs_namespaces, vec!["/guide/"]);
        assert_eq!(config.links.asset_root, "public");
        assert_eq!(config.ux.responsive.good, 5);
        assert_eq!(config.ux.responsive.moderate, 20);
        assert_eq!(config.snippet.client_object, "client");
    }

    #[test]
    fn test_default_toml_is_valid() {
        let toml_str = Config::default_toml().unwrap();
        let config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.ux.learning_paths.len(), 3);
        assert_eq!(config.ux.accessibility.categories.len(), 5);
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site/src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[http]\ndelay_ms = 0\n").unwrap();

        let found = Config::discover(&nested).unwrap();
        assert!(found.ends_with(CONFIG_FILE_NAME));
        assert_eq!(Config::load_or_default(&nested).http.delay_ms, 0);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[http\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
