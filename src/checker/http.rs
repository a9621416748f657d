// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Retries once with GET when the server answers 405 Method Not Allowed
// - Classifies: status < 400 is ok, status >= 400 is an error
// - Timeouts and connection failures are warnings: the link may be fine,
//   we just could not reach it
// - Each unique URL is requested at most once per run (seen-set)
// - Requests are strictly sequential, with a fixed pause before each one
//
// Rust concepts:
// - async/await: reqwest is async, so the whole checker is too
// - HashSet: remembers which URLs were already probed
// - Enums: to represent the different probe outcomes
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::collections::HashSet;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::facts::{CheckResult, ClassifiedFact};

// What happened when we probed a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered (any status code)
    Status(u16),
    /// Request timed out
    Timeout,
    /// Could not connect (DNS failure, refused, reset)
    Connect(String),
    /// Anything else reqwest reported (TLS, redirect loop, ...)
    Other(String),
}

// Probes external links one after another
//
// The checker owns the seen-set, so handing it the same URL twice (from two
// different files, say) results in a single request.
pub struct ExternalChecker {
    client: Client,
    delay: Duration,
    seen: HashSet<String>,
}

impl ExternalChecker {
    pub fn new(timeout: Duration, delay: Duration, user_agent: &str, max_redirects: usize) -> Result<Self> {
        // We'll reuse this client for all requests (connection pooling)
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            delay,
            seen: HashSet::new(),
        })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            Duration::from_millis(config.delay_ms),
            &config.user_agent,
            config.max_redirects,
        )
    }

    /// Number of distinct URLs probed so far
    pub fn probed(&self) -> usize {
        self.seen.len()
    }

    // Checks one external link
    //
    // Returns None when this exact URL was already checked in this run.
    pub async fn check(&mut self, fact: ClassifiedFact) -> Option<CheckResult> {
        let url = fact.text().trim().to_string();
        if !self.seen.insert(url.clone()) {
            return None;
        }

        // Polite probing: pause before every request
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let outcome = self.probe(&url).await;
        tracing::debug!(url = %url, outcome = ?outcome, "probed external link");
        Some(classify_outcome(fact, &url, outcome))
    }

    // Checks a list of links in order, skipping repeats
    pub async fn check_all(&mut self, facts: Vec<ClassifiedFact>) -> Vec<CheckResult> {
        let mut results = Vec::new();
        for fact in facts {
            if let Some(result) = self.check(fact).await {
                results.push(result);
            }
        }
        results
    }

    // HEAD first; a 405 means the server wants a GET instead
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.head(url).send().await {
            Ok(response) if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
                match self.client.get(url).send().await {
                    Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
                    Err(e) => categorize_error(e),
                }
            }
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => categorize_error(e),
        }
    }
}

// Categorizes different error types from reqwest
fn categorize_error(error: reqwest::Error) -> ProbeOutcome {
    if error.is_timeout() {
        ProbeOutcome::Timeout
    } else if error.is_connect() {
        ProbeOutcome::Connect(error.to_string())
    } else {
        ProbeOutcome::Other(error.to_string())
    }
}

// Turns a probe outcome into a verdict
//
// Only a real HTTP answer of 400 or above counts as broken. Not being able
// to reach the host is reported, but does not fail the run.
pub fn classify_outcome(fact: ClassifiedFact, url: &str, outcome: ProbeOutcome) -> CheckResult {
    match outcome {
        ProbeOutcome::Status(code) if code < 400 => {
            CheckResult::ok(fact, format!("External link valid: {url}"))
        }
        ProbeOutcome::Status(code) => {
            CheckResult::error(fact, format!("External link returned {code}: {url}"))
        }
        ProbeOutcome::Timeout => CheckResult::warning(fact, format!("External link timeout: {url}")),
        ProbeOutcome::Connect(_) => {
            CheckResult::warning(fact, format!("External link connection error: {url}"))
        }
        ProbeOutcome::Other(message) => {
            CheckResult::warning(fact, format!("External link error: {url} - {message}"))
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does HashSet::insert return?
//    - true if the value was not in the set yet, false if it was
//    - `if !self.seen.insert(url)` reads as "if we have seen this URL before"
//
// 2. What is a match guard?
//    - `Ok(response) if response.status() == ...` only matches when the
//      condition after `if` holds
//    - Arms are tried top to bottom, so the plain `Ok(response)` arm catches
//      every other response
//
// 3. What is Duration::is_zero?
//    - A zero delay skips the sleep entirely (tests use this)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ExtractedFact, FactCategory, Status};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn external(url: &str) -> ClassifiedFact {
        ClassifiedFact::new(ExtractedFact::new(url, "src/A.tsx", 1), FactCategory::ExternalLink)
    }

    fn checker(timeout: Duration) -> ExternalChecker {
        ExternalChecker::new(timeout, Duration::ZERO, "site-guardian-test", 5).unwrap()
    }

    // A tiny HTTP/1.1 server:
    //   /ok       -> 200
    //   /missing  -> 404
    //   /no-head  -> 405 for HEAD, 200 for GET
    //   /silent   -> accepts and never answers
    async fn spawn_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let counter = counter.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();
                    let mut parts = request.split_whitespace();
                    let method = parts.next().unwrap_or("").to_string();
                    let path = parts.next().unwrap_or("").to_string();
                    counter.fetch_add(1, Ordering::SeqCst);

                    let status = match (method.as_str(), path.as_str()) {
                        (_, "/ok") => "200 OK",
                        (_, "/missing") => "404 Not Found",
                        ("HEAD", "/no-head") => "405 Method Not Allowed",
                        (_, "/no-head") => "200 OK",
                        (_, "/silent") => {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                            return;
                        }
                        _ => "500 Internal Server Error",
                    };
                    let response = format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), hits)
    }

    #[tokio::test]
    async fn test_ok_and_broken_links() {
        let (base, _) = spawn_server().await;
        let mut checker = checker(Duration::from_secs(5));

        let ok = checker.check(external(&format!("{base}/ok"))).await.unwrap();
        assert_eq!(ok.status, Status::Ok);

        let broken = checker.check(external(&format!("{base}/missing"))).await.unwrap();
        assert_eq!(broken.status, Status::Error);
        assert!(broken.detail.contains("404"));
    }

    #[tokio::test]
    async fn test_head_405_retries_with_get() {
        let (base, hits) = spawn_server().await;
        let mut checker = checker(Duration::from_secs(5));

        let result = checker.check(external(&format!("{base}/no-head"))).await.unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_each_url_is_probed_once() {
        let (base, hits) = spawn_server().await;
        let mut checker = checker(Duration::from_secs(5));
        let url = format!("{base}/ok");

        let results = checker
            .check_all(vec![external(&url), external(&url), external(&format!("{base}/missing")), external(&url)])
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(checker.probed(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_is_a_warning() {
        let (base, _) = spawn_server().await;
        let mut checker = checker(Duration::from_millis(300));

        let result = checker.check(external(&format!("{base}/silent"))).await.unwrap();
        assert_eq!(result.status, Status::Warning);
        assert!(result.detail.contains("timeout"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_warning() {
        // Bind and immediately drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut checker = checker(Duration::from_secs(5));
        let result = checker.check(external(&format!("http://{addr}/"))).await.unwrap();
        assert_eq!(result.status, Status::Warning);
    }

    #[test]
    fn test_classify_outcome() {
        let fact = external("https://example.com");
        assert_eq!(classify_outcome(fact.clone(), "u", ProbeOutcome::Status(301)).status, Status::Ok);
        assert_eq!(classify_outcome(fact.clone(), "u", ProbeOutcome::Status(400)).status, Status::Error);
        assert_eq!(classify_outcome(fact.clone(), "u", ProbeOutcome::Status(503)).status, Status::Error);
        assert_eq!(classify_outcome(fact, "u", ProbeOutcome::Other("tls".into())).status, Status::Warning);
    }
}
