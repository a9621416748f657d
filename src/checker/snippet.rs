// src/checker/snippet.rs
// =============================================================================
// Validates Python snippets embedded in documentation pages.
//
// Each snippet goes through:
//
//   1. syntax        tree-sitter parse; any ERROR/MISSING node is an error,
//                    and so is what the grammar accepts but Python 3 rejects
//                    (`print "x"`, `exec code`, `f(a=1, a=2)`). On error the
//                    API checks below are skipped
//   2. imports       `from <package>... import X` must name an allowed module
//                    and an allowed name (unknown -> warning)
//   3. client calls  `client.method(...)` must use an allowed method
//                    (unknown -> warning)
//   4. constructor   keyword arguments of the client class constructor must be
//                    known config parameters (unknown -> warning)
//   5. metrics       once a metric name appears as `name:`, every decimal
//                    `field: 1.5` above the limit is an error, whatever the
//                    field name and whatever the syntax verdict was
//
// The allow-lists come from SnippetConfig.
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator};

use crate::config::SnippetConfig;
use crate::facts::{CheckResult, ClassifiedFact, Status};

#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("failed to load the Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("failed to compile snippet query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("invalid metric pattern: {0}")]
    Pattern(#[from] regex::Error),
}

const IMPORT_QUERY_SRC: &str = r#"
(import_from_statement
  module_name: (dotted_name) @module) @import
"#;

const METHOD_QUERY_SRC: &str = r#"
(call
  function: (attribute
    object: (identifier) @object
    attribute: (identifier) @method))
"#;

const CONSTRUCTOR_QUERY_SRC: &str = r#"
(call
  function: (identifier) @callee
  arguments: (argument_list) @args)
"#;

// `rouge1_f1: 0.42`, `"bleu": 1.5`; integers are counts, not scores
const METRIC_PATTERN: &str = r#"(\w+)["']?\s*:\s*(\d+\.\d+)"#;

/// One problem found in a snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub status: Status,
    pub message: String,
}

impl Finding {
    fn warning(message: String) -> Self {
        Self {
            status: Status::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: Status::Error,
            message,
        }
    }
}

/// Everything found in one snippet, folded into a single CheckResult.
#[derive(Debug, Clone)]
pub struct SnippetVerdict {
    pub syntax_ok: bool,
    pub findings: Vec<Finding>,
}

impl SnippetVerdict {
    pub fn status(&self) -> Status {
        if self.findings.iter().any(|f| f.status == Status::Error) {
            Status::Error
        } else if self.findings.iter().any(|f| f.status == Status::Warning) {
            Status::Warning
        } else {
            Status::Ok
        }
    }

    pub fn into_result(self, fact: ClassifiedFact) -> CheckResult {
        let source = fact.fact.location();
        let status = self.status();
        match status {
            Status::Ok => CheckResult::ok(fact, format!("Code example valid: {source}")),
            Status::Warning => CheckResult::warning(
                fact,
                format!("{} issue(s) in code example at {source}", self.findings.len()),
            ),
            Status::Error => CheckResult::error(
                fact,
                format!("{} issue(s) in code example at {source}", self.findings.len()),
            ),
        }
    }
}

pub struct SnippetChecker<'a> {
    config: &'a SnippetConfig,
    language: Language,
    import_query: Query,
    method_query: Query,
    constructor_query: Query,
    metric_regex: Regex,
    metric_marker: Option<Regex>,
}

impl<'a> SnippetChecker<'a> {
    pub fn new(config: &'a SnippetConfig) -> Result<Self, SnippetError> {
        let language: Language = tree_sitter_python::LANGUAGE.into();
        Ok(Self {
            config,
            import_query: Query::new(&language, IMPORT_QUERY_SRC)?,
            method_query: Query::new(&language, METHOD_QUERY_SRC)?,
            constructor_query: Query::new(&language, CONSTRUCTOR_QUERY_SRC)?,
            metric_regex: Regex::new(METRIC_PATTERN)?,
            metric_marker: metric_marker(&config.metric_names)?,
            language,
        })
    }

    /// Run every check on one snippet. `source` is `file:line` for messages.
    pub fn check(&self, code: &str, source: &str) -> Result<SnippetVerdict, SnippetError> {
        let mut findings = Vec::new();

        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser.parse(code, None);

        let syntax_ok = match &tree {
            Some(tree) => match first_syntax_error(tree.root_node(), code) {
                Some((node, reason)) => {
                    let pos = node.start_position();
                    findings.push(Finding::error(format!(
                        "Syntax error in {source}: {reason} at snippet line {}, column {}",
                        pos.row + 1,
                        pos.column + 1
                    )));
                    false
                }
                None => true,
            },
            None => {
                findings.push(Finding::error(format!("Syntax error in {source}: snippet could not be parsed")));
                false
            }
        };

        if let (true, Some(tree)) = (syntax_ok, &tree) {
            let root = tree.root_node();
            self.check_imports(root, code, source, &mut findings);
            self.check_client_methods(root, code, source, &mut findings);
            self.check_constructor_params(root, code, source, &mut findings);
        }

        self.check_metric_values(code, source, &mut findings);

        Ok(SnippetVerdict { syntax_ok, findings })
    }

    fn check_imports(&self, root: Node<'_>, code: &str, source: &str, findings: &mut Vec<Finding>) {
        let package = self.config.package.as_str();
        let module_idx = self.import_query.capture_index_for_name("module");
        let import_idx = self.import_query.capture_index_for_name("import");

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.import_query, root, code.as_bytes());

        while let Some(m) = matches.next() {
            let mut module = None;
            let mut statement = None;
            for capture in m.captures {
                if Some(capture.index) == module_idx {
                    module = Some(node_text(capture.node, code));
                } else if Some(capture.index) == import_idx {
                    statement = Some(capture.node);
                }
            }
            let (Some(module), Some(statement)) = (module, statement) else {
                continue;
            };

            let in_package = module == package || module.starts_with(&format!("{package}."));
            if !in_package {
                continue;
            }

            let Some(allowed) = self.config.imports.get(module) else {
                findings.push(Finding::warning(format!("Unknown module import in {source}: {module}")));
                continue;
            };

            for name in imported_names(statement, code) {
                if !allowed.iter().any(|a| *a == name) {
                    findings.push(Finding::warning(format!(
                        "Unknown import in {source}: {name} from {module}"
                    )));
                }
            }
        }
    }

    fn check_client_methods(&self, root: Node<'_>, code: &str, source: &str, findings: &mut Vec<Finding>) {
        let object_idx = self.method_query.capture_index_for_name("object");
        let method_idx = self.method_query.capture_index_for_name("method");
        let allowed: HashSet<&str> = self.config.client_methods.iter().map(String::as_str).collect();

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.method_query, root, code.as_bytes());

        while let Some(m) = matches.next() {
            let mut object = "";
            let mut method = "";
            for capture in m.captures {
                if Some(capture.index) == object_idx {
                    object = node_text(capture.node, code);
                } else if Some(capture.index) == method_idx {
                    method = node_text(capture.node, code);
                }
            }
            if object == self.config.client_object && !allowed.contains(method) {
                findings.push(Finding::warning(format!("Unknown client method in {source}: {method}")));
            }
        }
    }

    fn check_constructor_params(&self, root: Node<'_>, code: &str, source: &str, findings: &mut Vec<Finding>) {
        let callee_idx = self.constructor_query.capture_index_for_name("callee");
        let args_idx = self.constructor_query.capture_index_for_name("args");

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.constructor_query, root, code.as_bytes());

        while let Some(m) = matches.next() {
            let mut callee = "";
            let mut args = None;
            for capture in m.captures {
                if Some(capture.index) == callee_idx {
                    callee = node_text(capture.node, code);
                } else if Some(capture.index) == args_idx {
                    args = Some(capture.node);
                }
            }
            let Some(args) = args else {
                continue;
            };
            if callee != self.config.client_class {
                continue;
            }

            let mut walker = args.walk();
            for arg in args.named_children(&mut walker) {
                if arg.kind() != "keyword_argument" {
                    continue;
                }
                let Some(name) = arg.child_by_field_name("name") else {
                    continue;
                };
                let name = node_text(name, code);
                if !self.config.config_params.iter().any(|p| p == name) {
                    findings.push(Finding::warning(format!("Unknown config parameter in {source}: {name}")));
                }
            }
        }
    }

    // Without a metric marker, decimals are latencies, prices and the like
    fn check_metric_values(&self, code: &str, source: &str, findings: &mut Vec<Finding>) {
        let Some(marker) = &self.metric_marker else {
            return;
        };
        if !marker.is_match(code) {
            return;
        }

        for captures in self.metric_regex.captures_iter(code) {
            let (name, literal) = (&captures[1], &captures[2]);
            let Ok(value) = literal.parse::<f64>() else {
                continue;
            };
            if value > self.config.metric_limit {
                findings.push(Finding::error(format!(
                    "Metric value > {:.1} in {source}: {name}: {literal}",
                    self.config.metric_limit
                )));
            }
        }
    }
}

/// Names imported by a `from ... import ...` statement.
///
/// `from m import a as b` yields `a`; `from m import *` yields `*`.
fn imported_names(statement: Node<'_>, code: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut walker = statement.walk();
    for name in statement.children_by_field_name("name", &mut walker) {
        let target = match name.kind() {
            "aliased_import" => name.child_by_field_name("name").unwrap_or(name),
            _ => name,
        };
        names.push(node_text(target, code).to_string());
    }

    let mut walker = statement.walk();
    if statement
        .named_children(&mut walker)
        .any(|child| child.kind() == "wildcard_import")
    {
        names.push("*".to_string());
    }
    names
}

/// `name:` for any configured metric name, quoted or not.
fn metric_marker(names: &[String]) -> Result<Option<Regex>, regex::Error> {
    if names.is_empty() {
        return Ok(None);
    }
    let names: Vec<String> = names.iter().map(|n| regex::escape(n)).collect();
    Regex::new(&format!(r#"\b(?:{})\b["']?\s*:"#, names.join("|"))).map(Some)
}

/// First node Python 3 would refuse to compile, in document order.
fn first_syntax_error<'t>(node: Node<'t>, code: &str) -> Option<(Node<'t>, String)> {
    if node.is_error() || node.is_missing() {
        return Some((node, "invalid syntax".to_string()));
    }
    match node.kind() {
        kind @ ("print_statement" | "exec_statement") => {
            let keyword = kind.trim_end_matches("_statement");
            if !is_call_form(node_text(node, code), keyword) {
                return Some((node, format!("Python 2 {keyword} statement")));
            }
        }
        "argument_list" => {
            if let Some((arg, name)) = repeated_keyword(node, code) {
                return Some((arg, format!("keyword argument repeated: {name}")));
            }
        }
        _ => {}
    }

    let mut walker = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut walker).collect();
    children.into_iter().find_map(|child| first_syntax_error(child, code))
}

// `print ("x")` and `print >> f, x` still compile under Python 3
fn is_call_form(statement: &str, keyword: &str) -> bool {
    let rest = statement.strip_prefix(keyword).unwrap_or(statement).trim_start();
    rest.starts_with('(') || rest.starts_with(">>")
}

fn repeated_keyword<'t>(args: Node<'t>, code: &str) -> Option<(Node<'t>, String)> {
    let mut seen = HashSet::new();
    let mut walker = args.walk();
    for arg in args.named_children(&mut walker) {
        if arg.kind() != "keyword_argument" {
            continue;
        }
        let Some(name) = arg.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(name, code);
        if !seen.insert(name) {
            return Some((arg, name.to_string()));
        }
    }
    None
}

fn node_text<'c>(node: Node<'_>, code: &'c str) -> &'c str {
    code.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(code: &str) -> SnippetVerdict {
        let config = SnippetConfig::default();
        let checker = SnippetChecker::new(&config).unwrap();
        checker.check(code, "docs/Page.tsx:1").unwrap()
    }

    fn messages(v: &SnippetVerdict) -> Vec<&str> {
        v.findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_valid_snippet_is_ok() {
        let v = verdict(
            "from blazemetrics import BlazeMetricsClient\n\nclient = BlazeMetricsClient(redact_pii=True)\nresults = client.compute_metrics(candidates, references)\n",
        );
        assert!(v.syntax_ok);
        assert!(v.findings.is_empty(), "{:?}", messages(&v));
        assert_eq!(v.status(), Status::Ok);
    }

    #[test]
    fn test_syntax_error_is_error() {
        let v = verdict("from blazemetrics import BlazeMetricsClient\nclient = BlazeMetricsClient(\n");
        assert!(!v.syntax_ok);
        assert_eq!(v.status(), Status::Error);
        assert!(messages(&v)[0].starts_with("Syntax error in docs/Page.tsx:1"));
    }

    #[test]
    fn test_python2_print_is_syntax_error() {
        let v = verdict("from blazemetrics import BlazeMetricsClient\nprint \"hello\"\n");
        assert!(!v.syntax_ok);
        assert_eq!(v.status(), Status::Error);
        assert_eq!(
            messages(&v),
            vec!["Syntax error in docs/Page.tsx:1: Python 2 print statement at snippet line 2, column 1"]
        );
    }

    #[test]
    fn test_python2_exec_is_syntax_error() {
        let v = verdict("exec \"x = 1\"\n");
        assert!(!v.syntax_ok);
        assert!(messages(&v)[0].contains("Python 2 exec statement"));
    }

    #[test]
    fn test_print_call_is_fine() {
        let v = verdict("from blazemetrics import BlazeMetricsClient\nprint(\"hello\")\nprint (\"spaced\")\n");
        assert!(v.syntax_ok);
        assert!(v.findings.is_empty(), "{:?}", messages(&v));
    }

    #[test]
    fn test_repeated_keyword_argument_is_syntax_error() {
        let v = verdict("f(a=1, a=2)\n");
        assert!(!v.syntax_ok);
        assert_eq!(
            messages(&v),
            vec!["Syntax error in docs/Page.tsx:1: keyword argument repeated: a at snippet line 1, column 8"]
        );

        let v = verdict("f(a=1, b=2)\n");
        assert!(v.syntax_ok);
    }

    #[test]
    fn test_unknown_import_is_warning_not_error() {
        let v = verdict("from blazemetrics import Unknown\n");
        assert!(v.syntax_ok);
        assert_eq!(v.status(), Status::Warning);
        assert_eq!(messages(&v), vec!["Unknown import in docs/Page.tsx:1: Unknown from blazemetrics"]);
    }

    #[test]
    fn test_unknown_module_and_aliases() {
        let v = verdict(
            "from blazemetrics.secret import Thing\nfrom blazemetrics.llm_judge import LLMJudge as Judge\nfrom os import path\n",
        );
        assert_eq!(messages(&v), vec!["Unknown module import in docs/Page.tsx:1: blazemetrics.secret"]);
    }

    #[test]
    fn test_unknown_client_method_is_warning() {
        let v = verdict(
            "from blazemetrics import BlazeMetricsClient\nclient = BlazeMetricsClient()\nclient.compute_metrics(a, b)\nclient.teleport()\nother.teleport()\n",
        );
        assert_eq!(messages(&v), vec!["Unknown client method in docs/Page.tsx:1: teleport"]);
        assert_eq!(v.status(), Status::Warning);
    }

    #[test]
    fn test_unknown_constructor_parameter_is_warning() {
        let v = verdict(
            "from blazemetrics import BlazeMetricsClient\nclient = BlazeMetricsClient(blocklist=['x'], turbo=True)\nclient.compute_metrics(a, b, include=['bleu'])\n",
        );
        assert_eq!(messages(&v), vec!["Unknown config parameter in docs/Page.tsx:1: turbo"]);
    }

    #[test]
    fn test_metric_above_one_is_error() {
        let v = verdict("from blazemetrics import BlazeMetricsClient\n# rouge1_f1: 1.5\n");
        assert_eq!(v.status(), Status::Error);
        assert!(messages(&v)[0].contains("rouge1_f1: 1.5"));
    }

    #[test]
    fn test_metric_in_unit_interval_is_fine() {
        let v = verdict("from blazemetrics import BlazeMetricsClient\nexpected = {'bleu': 0.42, 'rouge1_f1': 1.0}\n");
        assert!(v.findings.is_empty(), "{:?}", messages(&v));
    }

    #[test]
    fn test_non_metric_numbers_are_ignored() {
        let v = verdict("from blazemetrics import BlazeMetricsClient\nconfig = {'analytics_window': 100}\n");
        assert!(v.findings.is_empty());
    }

    #[test]
    fn test_rouge_and_faithfulness_scores_are_checked() {
        let v = verdict("# rouge1: 1.5\n");
        assert_eq!(messages(&v), vec!["Metric value > 1.0 in docs/Page.tsx:1: rouge1: 1.5"]);

        let v = verdict("# rougeL: 1.7, faithfulness: 1.2\n");
        assert_eq!(v.findings.len(), 2, "{:?}", messages(&v));
        assert!(v.findings.iter().all(|f| f.status == Status::Error));
    }

    #[test]
    fn test_marker_flags_fields_outside_the_name_list() {
        let v = verdict("expected = {\"bleu\": 0.4, \"quality_score\": 1.3}\n");
        assert_eq!(messages(&v), vec!["Metric value > 1.0 in docs/Page.tsx:1: quality_score: 1.3"]);
    }

    #[test]
    fn test_decimals_without_a_marker_are_ignored() {
        let v = verdict("timings = {'latency': 2.5, 'cost': 3.75}\n");
        assert!(v.findings.is_empty(), "{:?}", messages(&v));
    }

    #[test]
    fn test_empty_metric_list_disables_the_check() {
        let config = SnippetConfig {
            metric_names: Vec::new(),
            ..SnippetConfig::default()
        };
        let checker = SnippetChecker::new(&config).unwrap();
        let v = checker.check("# rouge1_f1: 1.5\n", "docs/Page.tsx:1").unwrap();
        assert!(v.findings.is_empty());
    }

    #[test]
    fn test_into_result_takes_worst_status() {
        use crate::facts::{ExtractedFact, FactCategory};
        let fact = ClassifiedFact::new(ExtractedFact::new("code", "docs/Page.tsx", 4), FactCategory::CodeBlock);
        let v = SnippetVerdict {
            syntax_ok: true,
            findings: vec![
                Finding::warning("w".to_string()),
                Finding::error("e".to_string()),
            ],
        };
        let result = v.into_result(fact);
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.detail, "2 issue(s) in code example at docs/Page.tsx:4");
    }
}
