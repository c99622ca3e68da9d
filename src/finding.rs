// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Findings and the categorized scan result

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Result category. Keys are fixed; serialized in camelCase
/// (`headerIssues`, `clickjackingIssues`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    HeaderIssues,
    HttpMethodIssues,
    ErrorInfoIssues,
    RobotsIssues,
    SitemapsIssues,
    UnauthorizedAccessIssues,
    ClickjackingIssues,
    GeneralError,
}

impl Category {
    /// Every category a completed scan reports, in rendering order
    pub const SCAN: [Category; 7] = [
        Category::HeaderIssues,
        Category::HttpMethodIssues,
        Category::ErrorInfoIssues,
        Category::RobotsIssues,
        Category::SitemapsIssues,
        Category::UnauthorizedAccessIssues,
        Category::ClickjackingIssues,
    ];

    /// camelCase key, as serialized
    pub fn key(&self) -> &'static str {
        match self {
            Category::HeaderIssues => "headerIssues",
            Category::HttpMethodIssues => "httpMethodIssues",
            Category::ErrorInfoIssues => "errorInfoIssues",
            Category::RobotsIssues => "robotsIssues",
            Category::SitemapsIssues => "sitemapsIssues",
            Category::UnauthorizedAccessIssues => "unauthorizedAccessIssues",
            Category::ClickjackingIssues => "clickjackingIssues",
            Category::GeneralError => "generalError",
        }
    }

    /// Heading for display: "headerIssues" -> "Header Issues"
    pub fn title(&self) -> String {
        let mut title = String::new();
        for (i, c) in self.key().chars().enumerate() {
            if i == 0 {
                title.push(c.to_ascii_uppercase());
            } else if c.is_ascii_uppercase() {
                title.push(' ');
                title.push(c);
            } else {
                title.push(c);
            }
        }
        title
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

/// What kind of signal a finding reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Response headers could not be retrieved
    HeadersUnavailable,
    /// A security header is absent
    MissingHeader,
    /// A cookie lacks HttpOnly or Secure
    InsecureCookie,
    /// Server or framework fingerprint leaked in a header
    InfoDisclosure,
    /// OPTIONS disclosed the allowed methods
    AllowedMethods,
    /// OPTIONS succeeded without listing methods
    MethodsUndisclosed,
    /// TRACE is accepted
    TraceEnabled,
    /// Absolute filesystem path in an error page
    PathDisclosure,
    /// Application server version in an error page
    VersionDisclosure,
    /// Stock application server error page
    DefaultErrorPage,
    /// robots.txt names sensitive paths
    SensitivePaths,
    /// robots.txt allows crawling the whole site
    CrawlAllowed,
    /// A well-known resource was found
    ResourceFound,
    /// A well-known resource was not found
    ResourceMissing,
    /// Unauthenticated request was served
    UnauthenticatedAccess,
    /// Unauthenticated request was refused
    AuthorizationEnforced,
    /// Unauthenticated request returned some other status
    StatusReported,
    /// Page can be framed by another origin
    Clickjacking,
    /// A probe could not complete its request
    ProbeFailed,
    /// The scan itself aborted
    ScanAborted,
}

impl FindingKind {
    /// Short label, shown in brackets before the message
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::HeadersUnavailable => "headers unavailable",
            FindingKind::MissingHeader => "missing header",
            FindingKind::InsecureCookie => "insecure cookie",
            FindingKind::InfoDisclosure => "information disclosure",
            FindingKind::AllowedMethods => "allowed methods",
            FindingKind::MethodsUndisclosed => "allowed methods",
            FindingKind::TraceEnabled => "unsafe http method",
            FindingKind::PathDisclosure => "absolute path disclosure",
            FindingKind::VersionDisclosure => "version disclosure",
            FindingKind::DefaultErrorPage => "default error page",
            FindingKind::SensitivePaths => "sensitive paths",
            FindingKind::CrawlAllowed => "crawl allowed",
            FindingKind::ResourceFound => "found",
            FindingKind::ResourceMissing => "not found",
            FindingKind::UnauthenticatedAccess => "unauthenticated access",
            FindingKind::AuthorizationEnforced => "authorization enforced",
            FindingKind::StatusReported => "status",
            FindingKind::Clickjacking => "clickjacking",
            FindingKind::ProbeFailed => "probe failed",
            FindingKind::ScanAborted => "error",
        }
    }
}

/// A single reported issue or informational observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Category the finding belongs to
    pub category: Category,
    /// Kind of signal
    pub kind: FindingKind,
    /// Severity
    pub severity: Severity,
    /// Human readable message
    pub message: String,
    /// The header, path, cookie or version the finding is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Proof-of-concept link (clickjacking only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poc: Option<String>,
}

impl Finding {
    /// Create a new finding
    pub fn new(
        category: Category,
        kind: FindingKind,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            kind,
            severity,
            message: message.into(),
            subject: None,
            poc: None,
        }
    }

    /// Attach the subject the finding is about
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attach a proof-of-concept link
    pub fn with_poc(mut self, poc: impl Into<String>) -> Self {
        self.poc = Some(poc.into());
        self
    }

    /// Whether this finding reports the given header as missing
    pub fn is_missing_header(&self, header: &str) -> bool {
        self.kind == FindingKind::MissingHeader
            && self
                .subject
                .as_deref()
                .map_or(false, |s| s.eq_ignore_ascii_case(header))
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.kind.label(), self.message)
    }
}

/// Categorized findings for one scanned URL
///
/// A completed scan carries every category in [`Category::SCAN`], possibly
/// empty. An aborted scan carries only [`Category::GeneralError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResult {
    categories: BTreeMap<Category, Vec<Finding>>,
}

impl ScanResult {
    /// A completed scan with every category present and empty
    pub fn empty() -> Self {
        Self {
            categories: Category::SCAN.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    /// An aborted scan holding only the error message
    pub fn failed(message: impl Into<String>) -> Self {
        let finding = Finding::new(
            Category::GeneralError,
            FindingKind::ScanAborted,
            Severity::Info,
            message,
        );
        let mut categories = BTreeMap::new();
        categories.insert(Category::GeneralError, vec![finding]);
        Self { categories }
    }

    /// Append findings to a category, keeping their order
    pub fn extend(&mut self, category: Category, findings: impl IntoIterator<Item = Finding>) {
        self.categories.entry(category).or_default().extend(findings);
    }

    /// Findings for a category; `None` when the category is absent
    pub fn get(&self, category: Category) -> Option<&[Finding]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    /// Whether a category is present (even if empty)
    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains_key(&category)
    }

    /// Whether the scan aborted
    pub fn is_failed(&self) -> bool {
        self.contains(Category::GeneralError)
    }

    /// Message of the general error, if the scan aborted
    pub fn general_error(&self) -> Option<&str> {
        self.get(Category::GeneralError)
            .and_then(|f| f.first())
            .map(|f| f.message.as_str())
    }

    /// Iterate over present categories in order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Finding])> {
        self.categories.iter().map(|(c, f)| (*c, f.as_slice()))
    }

    /// Total number of findings
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether no findings were produced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_title() {
        assert_eq!(Category::HeaderIssues.title(), "Header Issues");
        assert_eq!(
            Category::UnauthorizedAccessIssues.title(),
            "Unauthorized Access Issues"
        );
        assert_eq!(Category::GeneralError.title(), "General Error");
    }

    #[test]
    fn test_category_key_matches_serde() {
        for category in Category::SCAN.iter().chain([Category::GeneralError].iter()) {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }

    #[test]
    fn test_empty_result_has_all_scan_categories() {
        let result = ScanResult::empty();
        for category in Category::SCAN {
            assert_eq!(result.get(category), Some(&[][..]));
        }
        assert!(!result.contains(Category::GeneralError));
        assert!(result.is_empty());
    }

    #[test]
    fn test_failed_result_only_has_general_error() {
        let result = ScanResult::failed("boom");
        assert!(result.is_failed());
        assert_eq!(result.general_error(), Some("boom"));
        assert_eq!(result.iter().count(), 1);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut result = ScanResult::empty();
        let a = Finding::new(Category::RobotsIssues, FindingKind::SensitivePaths, Severity::Low, "a");
        let b = Finding::new(Category::RobotsIssues, FindingKind::CrawlAllowed, Severity::Info, "b");
        result.extend(Category::RobotsIssues, vec![a.clone(), b.clone()]);
        assert_eq!(result.get(Category::RobotsIssues).unwrap(), &[a, b]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut result = ScanResult::empty();
        result.extend(
            Category::ClickjackingIssues,
            vec![Finding::new(
                Category::ClickjackingIssues,
                FindingKind::Clickjacking,
                Severity::Medium,
                "frameable",
            )
            .with_poc("poc.html?url=x")],
        );

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["headerIssues"].as_array().unwrap().is_empty());
        assert_eq!(json["clickjackingIssues"][0]["message"], "frameable");
        assert_eq!(json["clickjackingIssues"][0]["poc"], "poc.html?url=x");
        assert!(json.get("generalError").is_none());
    }

    #[test]
    fn test_missing_header_match() {
        let finding = Finding::new(
            Category::HeaderIssues,
            FindingKind::MissingHeader,
            Severity::Medium,
            "X-Frame-Options header is missing",
        )
        .with_subject("X-Frame-Options");
        assert!(finding.is_missing_header("x-frame-options"));
        assert!(!finding.is_missing_header("Content-Security-Policy"));
        assert_eq!(
            finding.to_string(),
            "(missing header) X-Frame-Options header is missing"
        );
    }
}
