// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Method;
use url::Url;

use super::{Probe, Target};
use crate::finding::{Category, Finding, FindingKind, Severity};
use crate::http::{CredentialsMode, HttpClient};
use crate::security::{Matcher, RegexMatcher, SubstringMatcher};

/// Status codes whose bodies are inspected
pub const ERROR_STATUSES: [u16; 3] = [404, 500, 403];

/// Default path segment requested to provoke an error page
pub const DEFAULT_ERROR_SUFFIX: &str = "esssdad";

/// A pattern looked for in error page bodies
pub struct BodySignature {
    kind: FindingKind,
    severity: Severity,
    description: String,
    matcher: Box<dyn Matcher>,
    once: bool,
}

impl BodySignature {
    /// One finding per distinct match: `"<url> <description> <match>"`
    pub fn each_match(
        kind: FindingKind,
        severity: Severity,
        description: impl Into<String>,
        matcher: impl Matcher + 'static,
    ) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            matcher: Box::new(matcher),
            once: false,
        }
    }

    /// A single finding when anything matches: `"<url> <description>"`
    pub fn once(
        kind: FindingKind,
        severity: Severity,
        description: impl Into<String>,
        matcher: impl Matcher + 'static,
    ) -> Self {
        Self {
            once: true,
            ..Self::each_match(kind, severity, description, matcher)
        }
    }

    fn scan(&self, url: &Url, body: &str) -> Vec<Finding> {
        let finding = |message: String, subject: String| {
            Finding::new(Category::ErrorInfoIssues, self.kind, self.severity, message)
                .with_subject(subject)
        };

        if self.once {
            return self
                .matcher
                .find_all(body)
                .into_iter()
                .take(1)
                .map(|m| finding(format!("{} {}", url, self.description), m))
                .collect();
        }

        self.matcher
            .find_all(body)
            .into_iter()
            .map(|m| finding(format!("{} {} {}", url, self.description, m), m))
            .collect()
    }
}

/// Built-in error page signatures
pub fn default_signatures() -> Vec<BodySignature> {
    vec![
        BodySignature::each_match(
            FindingKind::PathDisclosure,
            Severity::Medium,
            "leaks absolute path",
            RegexMatcher::from_regex(
                "windows-path",
                Regex::new(r"(?i)[cdexf]:\\\w+\\\w+[\\\w.]+").unwrap(),
            ),
        ),
        BodySignature::each_match(
            FindingKind::VersionDisclosure,
            Severity::Low,
            "leaks server version",
            RegexMatcher::from_regex(
                "tomcat-version",
                Regex::new(r"(?i)Apache Tomcat/[\d.]+").unwrap(),
            ),
        ),
        BodySignature::once(
            FindingKind::DefaultErrorPage,
            Severity::Low,
            "returns a default WebLogic error page",
            SubstringMatcher::new("weblogic-error-page", "The server understood the"),
        ),
    ]
}

/// Requests a path that should not exist and scrapes the error page for
/// leaked paths, versions and stock application server pages.
///
/// Network failures and other statuses produce no findings.
pub struct ErrorPageProbe {
    suffix: String,
    signatures: Vec<BodySignature>,
}

impl Default for ErrorPageProbe {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_SUFFIX)
    }
}

impl ErrorPageProbe {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            signatures: default_signatures(),
        }
    }

    /// Add a signature, checked after the built-in ones
    pub fn with_signature(mut self, signature: BodySignature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// The URL this probe requests for a target
    pub fn error_url(&self, target: &Target) -> Url {
        target.with_suffix(&self.suffix)
    }

    /// Scan an error page body with every signature
    pub fn scan_body(&self, url: &Url, body: &str) -> Vec<Finding> {
        self.signatures
            .iter()
            .flat_map(|s| s.scan(url, body))
            .collect()
    }
}

#[async_trait]
impl Probe for ErrorPageProbe {
    fn name(&self) -> &'static str {
        "error-page"
    }

    fn category(&self) -> Category {
        Category::ErrorInfoIssues
    }

    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding> {
        let url = self.error_url(target);

        let resp = match client
            .perform(&url, Method::GET, CredentialsMode::Include, &[])
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(
                    url = %url,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Error page probe failed"
                );
                return Vec::new();
            }
        };

        tracing::debug!(
            url = %url,
            status = resp.status_code(),
            elapsed_ms = resp.response_time_ms,
            "Error page fetched"
        );

        if !ERROR_STATUSES.contains(&resp.status_code()) {
            return Vec::new();
        }

        self.scan_body(&url, &resp.text_lossy())
    }
}
