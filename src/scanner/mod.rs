// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scan orchestration
//!
//! Runs every probe concurrently against one target, waits for all of them,
//! then assembles the categorized [`ScanResult`]. A missing
//! `X-Frame-Options` header is moved out of the header issues and reported
//! as a clickjacking finding with a proof-of-concept link instead.
//!
//! ```rust,no_run
//! use vartija::{ScanConfig, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = Scanner::new(ScanConfig::default())?;
//!     let result = scanner.scan("https://example.com").await;
//!
//!     for (category, findings) in result.iter() {
//!         for finding in findings {
//!             println!("{}: {}", category, finding);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod request;

pub use config::{ScanConfig, DEFAULT_POC_BASE};
pub use request::ScanRequest;

use std::sync::Arc;
use std::time::Instant;

use url::form_urlencoded;

use crate::error::{Error, Result};
use crate::finding::{Category, Finding, FindingKind, Severity, ScanResult};
use crate::http::{CookieJar, HttpClient};
use crate::probe::{
    ErrorPageProbe, HeaderProbe, MethodProbe, Probe, RobotsProbe, SitemapProbe, Target,
    UnauthorizedProbe,
};

/// Header whose absence is reported as clickjacking
const FRAMING_HEADER: &str = "X-Frame-Options";

/// Passive reconnaissance scanner
pub struct Scanner {
    config: ScanConfig,
    client: HttpClient,
    probes: Vec<Arc<dyn Probe>>,
}

impl Scanner {
    /// Create a scanner with the standard probe set
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let jar = CookieJar::from_headers(&config.cookies);
        tracing::debug!(cookies = jar.len(), "Ambient cookie jar ready");

        let client = HttpClient::with_config(config.http_config())?.with_cookie_jar(jar);
        Ok(Self::with_client(config, client))
    }

    /// Create a scanner around an existing client
    pub fn with_client(config: ScanConfig, client: HttpClient) -> Self {
        let probes = default_probes(&config);
        Self {
            config,
            client,
            probes,
        }
    }

    /// Replace the probe set
    pub fn with_probes(mut self, probes: Vec<Arc<dyn Probe>>) -> Self {
        self.probes = probes;
        self
    }

    /// Names of the probes that will run, in result order
    pub fn probe_names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Handle a typed request
    pub async fn handle(&self, request: ScanRequest) -> ScanResult {
        match request {
            ScanRequest::Detect { url } => self.scan(&url).await,
        }
    }

    /// Scan a URL.
    ///
    /// Returns either a fully populated result or, if the scan aborts
    /// (invalid URL, a probe task dying), a result holding only the
    /// general error.
    pub async fn scan(&self, url: &str) -> ScanResult {
        match self.try_scan(url).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(url, error = %e, "Scan aborted");
                ScanResult::failed(e.to_string())
            }
        }
    }

    async fn try_scan(&self, url: &str) -> Result<ScanResult> {
        let target = Target::parse(url)?;
        let start = Instant::now();
        tracing::info!(url = %target, probes = ?self.probe_names(), "Starting scan");

        let handles: Vec<_> = self
            .probes
            .iter()
            .map(|probe| {
                let probe = Arc::clone(probe);
                let client = self.client.clone();
                let target = target.clone();
                tokio::spawn(async move { probe.run(&client, &target).await })
            })
            .collect();

        let outcomes = futures::future::join_all(handles).await;

        let mut result = ScanResult::empty();
        for (probe, outcome) in self.probes.iter().zip(outcomes) {
            let findings = outcome.map_err(|e| Error::probe(probe.name(), e.to_string()))?;
            debug_assert!(findings.iter().all(|f| f.category == probe.category()));

            if probe.category() == Category::HeaderIssues {
                self.place_header_findings(&target, findings, &mut result);
            } else {
                result.extend(probe.category(), findings);
            }
        }

        tracing::info!(
            url = %target,
            findings = result.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Scan finished"
        );

        Ok(result)
    }

    fn place_header_findings(&self, target: &Target, findings: Vec<Finding>, result: &mut ScanResult) {
        let (framing, rest): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.is_missing_header(FRAMING_HEADER));

        result.extend(Category::HeaderIssues, rest);

        if !framing.is_empty() {
            result.extend(
                Category::ClickjackingIssues,
                Some(clickjacking_finding(target, &self.config.poc_base)),
            );
        }
    }
}

fn default_probes(config: &ScanConfig) -> Vec<Arc<dyn Probe>> {
    vec![
        Arc::new(HeaderProbe::new(config.user_agent.clone())),
        Arc::new(MethodProbe::new(config.method_strategy)),
        Arc::new(ErrorPageProbe::new(config.error_probe_suffix.clone())),
        Arc::new(RobotsProbe),
        Arc::new(SitemapProbe),
        Arc::new(UnauthorizedProbe::new(config.user_agent.clone())),
    ]
}

/// Link to the PoC page with the scanned URL percent-encoded in `url`
pub fn poc_link(poc_base: &str, target: &Target) -> String {
    let encoded: String = form_urlencoded::byte_serialize(target.url().as_str().as_bytes()).collect();
    let separator = if poc_base.contains('?') { '&' } else { '?' };
    format!("{}{}url={}", poc_base, separator, encoded)
}

fn clickjacking_finding(target: &Target, poc_base: &str) -> Finding {
    Finding::new(
        Category::ClickjackingIssues,
        FindingKind::Clickjacking,
        Severity::Medium,
        format!(
            "{} can be framed by other sites ({} missing)",
            target, FRAMING_HEADER
        ),
    )
    .with_subject(target.to_string())
    .with_poc(poc_link(poc_base, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poc_link_encodes_target() {
        let target = Target::parse("https://example.com/a b?x=1&y=2").unwrap();
        assert_eq!(
            poc_link("poc/clickjacking.html", &target),
            "poc/clickjacking.html?url=https%3A%2F%2Fexample.com%2Fa%2520b%3Fx%3D1%26y%3D2"
        );
        assert!(poc_link("https://poc.local/f.html?theme=dark", &target)
            .starts_with("https://poc.local/f.html?theme=dark&url=https%3A"));
    }

    #[test]
    fn test_default_probe_order() {
        let scanner = Scanner::new(ScanConfig::default()).unwrap();
        assert_eq!(
            scanner.probe_names(),
            vec![
                "headers",
                "http-methods",
                "error-page",
                "robots",
                "sitemaps",
                "unauthorized-access"
            ]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScanConfig {
            timeout_secs: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(Scanner::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_header_findings_redirect_clickjacking() {
        let scanner = Scanner::new(ScanConfig::default()).unwrap();
        let target = Target::parse("https://example.com/").unwrap();
        let mut result = ScanResult::empty();

        let findings = crate::security::analyze_headers(Some(&reqwest::header::HeaderMap::new()));
        scanner.place_header_findings(&target, findings, &mut result);

        let headers = result.get(Category::HeaderIssues).unwrap();
        assert_eq!(headers.len(), 1);
        assert!(headers[0].is_missing_header("Content-Security-Policy"));

        let clickjacking = result.get(Category::ClickjackingIssues).unwrap();
        assert_eq!(clickjacking.len(), 1);
        assert_eq!(
            clickjacking[0].poc.as_deref(),
            Some("poc/clickjacking.html?url=https%3A%2F%2Fexample.com%2F")
        );
    }
}
