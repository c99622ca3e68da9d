// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response header analysis
//!
//! Flags missing framing/CSP headers, cookies without `HttpOnly` or
//! `Secure`, and server fingerprints leaked through `Server` and
//! `X-Powered-By`. Pure: no I/O, same input gives the same ordered output.

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::HeaderMap;

use super::matcher::{Matcher, RegexMatcher};
use crate::finding::{Category, Finding, FindingKind, Severity};
use crate::http::headers::SET_COOKIE;

lazy_static! {
    static ref COOKIE_SEPARATOR: Regex = Regex::new(r",\s*").unwrap();
    static ref ATTRIBUTE_SEPARATOR: Regex = Regex::new(r";\s*").unwrap();
    static ref DEFAULT_ANALYZER: HeaderAnalyzer = HeaderAnalyzer::new();
}

/// Headers whose absence is reported, in reporting order
const REQUIRED_HEADERS: [&str; 2] = ["X-Frame-Options", "Content-Security-Policy"];

/// Cookie attributes every cookie should carry
const COOKIE_FLAGS: [&str; 2] = ["HttpOnly", "Secure"];

/// A header whose value gives away the server stack
pub struct FingerprintRule {
    /// Header name as displayed
    pub header: String,
    /// Pattern the value is matched against
    pub matcher: Box<dyn Matcher>,
}

impl FingerprintRule {
    pub fn new(header: impl Into<String>, matcher: impl Matcher + 'static) -> Self {
        Self {
            header: header.into(),
            matcher: Box::new(matcher),
        }
    }
}

/// Header analyzer
pub struct HeaderAnalyzer {
    fingerprints: Vec<FingerprintRule>,
}

impl Default for HeaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderAnalyzer {
    /// Create an analyzer with the built-in fingerprint rules
    pub fn new() -> Self {
        let fingerprints = vec![
            FingerprintRule::new(
                "Server",
                RegexMatcher::from_regex(
                    "server-version",
                    Regex::new(
                        r"(?i)Microsoft-IIS/[\d.]+|Nginx/[\d.]+|Servlet/[\d. ]+jsp/[\d. ]+|Apache/[\d. ]",
                    )
                    .unwrap(),
                ),
            ),
            FingerprintRule::new(
                "X-Powered-By",
                RegexMatcher::from_regex(
                    "powered-by",
                    Regex::new(r"(?i)ASP\.NET|PHP/[\d. ]+").unwrap(),
                ),
            ),
        ];

        Self { fingerprints }
    }

    /// Add a fingerprint rule, checked after the built-in ones
    pub fn with_fingerprint(mut self, rule: FingerprintRule) -> Self {
        self.fingerprints.push(rule);
        self
    }

    /// Analyze a header mapping. `None` means the headers could not be fetched.
    pub fn analyze(&self, headers: Option<&HeaderMap>) -> Vec<Finding> {
        let Some(headers) = headers else {
            return vec![Finding::new(
                Category::HeaderIssues,
                FindingKind::HeadersUnavailable,
                Severity::Info,
                "cannot retrieve response headers",
            )];
        };

        let mut findings = Vec::new();

        for name in REQUIRED_HEADERS {
            if !headers.contains_key(name) {
                findings.push(missing_header(name));
            }
        }

        let cookies = header_values(headers, SET_COOKIE);
        if !cookies.is_empty() {
            findings.extend(check_cookies(&cookies.join(", ")));
        }

        for rule in &self.fingerprints {
            for value in header_values(headers, &rule.header) {
                if rule.matcher.is_match(value) {
                    findings.push(
                        Finding::new(
                            Category::HeaderIssues,
                            FindingKind::InfoDisclosure,
                            Severity::Low,
                            format!("{}: {}", rule.header, value),
                        )
                        .with_subject(rule.header.clone()),
                    );
                }
            }
        }

        findings
    }
}

/// Analyze headers with the built-in rules
pub fn analyze_headers(headers: Option<&HeaderMap>) -> Vec<Finding> {
    DEFAULT_ANALYZER.analyze(headers)
}

fn header_values<'a>(headers: &'a HeaderMap, name: &str) -> Vec<&'a str> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect()
}

fn missing_header(name: &str) -> Finding {
    Finding::new(
        Category::HeaderIssues,
        FindingKind::MissingHeader,
        Severity::Medium,
        format!("{} header is missing", name),
    )
    .with_subject(name)
}

/// Check a folded `Set-Cookie` value.
///
/// Cookies are split on commas without regard for `Expires` dates, so a
/// date such as `Wed, 09 Jun 2021 ...` produces a bogus extra "cookie".
fn check_cookies(folded: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for cookie in COOKIE_SEPARATOR.split(folded) {
        if cookie.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = ATTRIBUTE_SEPARATOR.split(cookie).collect();
        let name = cookie_name(parts[0]);

        for flag in COOKIE_FLAGS {
            let present = parts.iter().any(|p| p.trim().eq_ignore_ascii_case(flag));
            if !present {
                findings.push(
                    Finding::new(
                        Category::HeaderIssues,
                        FindingKind::InsecureCookie,
                        Severity::Low,
                        format!("Set-Cookie is missing the {} attribute for {}", flag, name),
                    )
                    .with_subject(name.to_string()),
                );
            }
        }
    }

    findings
}

fn cookie_name(first: &str) -> &str {
    first.split('=').next().unwrap_or(first).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    fn messages(findings: &[Finding]) -> Vec<String> {
        findings.iter().map(|f| f.message.clone()).collect()
    }

    #[test]
    fn test_absent_headers() {
        let findings = analyze_headers(None);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::HeadersUnavailable);
        assert_eq!(findings[0].message, "cannot retrieve response headers");
    }

    #[test]
    fn test_empty_headers_missing_both() {
        let findings = analyze_headers(Some(&HeaderMap::new()));
        assert_eq!(findings.len(), 2);
        assert!(findings[0].is_missing_header("X-Frame-Options"));
        assert!(findings[1].is_missing_header("Content-Security-Policy"));
        assert!(findings.iter().all(|f| f.category == Category::HeaderIssues));
        assert!(findings.iter().all(|f| f.kind != FindingKind::Clickjacking));
    }

    #[test]
    fn test_present_headers() {
        let map = headers(&[
            ("x-frame-options", "DENY"),
            ("content-security-policy", "default-src 'self'"),
        ]);
        assert!(analyze_headers(Some(&map)).is_empty());
    }

    #[test]
    fn test_cookie_flags() {
        let map = headers(&[
            ("x-frame-options", "DENY"),
            ("content-security-policy", "default-src 'self'"),
            ("set-cookie", "sid=abc; Path=/; httponly"),
            ("set-cookie", "theme=dark; Secure; HttpOnly"),
            ("set-cookie", "track=1"),
        ]);

        assert_eq!(
            messages(&analyze_headers(Some(&map))),
            vec![
                "Set-Cookie is missing the Secure attribute for sid",
                "Set-Cookie is missing the HttpOnly attribute for track",
                "Set-Cookie is missing the Secure attribute for track",
            ]
        );
    }

    #[test]
    fn test_one_httponly_finding_per_cookie() {
        let map = headers(&[("set-cookie", "a=1; Path=/, b=2; Secure, c=3; Domain=x.com")]);
        let httponly = analyze_headers(Some(&map))
            .into_iter()
            .filter(|f| f.message.contains("HttpOnly"))
            .count();
        assert_eq!(httponly, 3);
    }

    #[test]
    fn test_expires_comma_is_split_naively() {
        let map = headers(&[(
            "set-cookie",
            "sid=1; Expires=Wed, 09 Jun 2021 10:18:14 GMT; Secure; HttpOnly",
        )]);
        let findings = analyze_headers(Some(&map));
        let cookie_findings: Vec<_> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::InsecureCookie)
            .collect();
        // "sid=1; Expires=Wed" lacks both flags, "09 Jun ...; Secure; HttpOnly" has both
        assert_eq!(cookie_findings.len(), 2);
        assert!(cookie_findings.iter().all(|f| f.subject.as_deref() == Some("sid")));
    }

    #[test]
    fn test_server_fingerprints() {
        for value in [
            "nginx/1.18.0",
            "Microsoft-IIS/10.0",
            "Apache/2.4.41 (Ubuntu)",
            "Servlet/3.0 JSP/2.2",
        ] {
            let map = headers(&[("server", value)]);
            let findings = analyze_headers(Some(&map));
            let disclosure: Vec<_> = findings
                .iter()
                .filter(|f| f.kind == FindingKind::InfoDisclosure)
                .collect();
            assert_eq!(disclosure.len(), 1, "expected disclosure for {}", value);
            assert_eq!(disclosure[0].message, format!("Server: {}", value));
        }

        for value in ["nginx", "Apache", "cloudflare"] {
            let map = headers(&[("server", value)]);
            assert!(analyze_headers(Some(&map))
                .iter()
                .all(|f| f.kind != FindingKind::InfoDisclosure));
        }
    }

    #[test]
    fn test_powered_by_fingerprints() {
        let map = headers(&[("x-powered-by", "PHP/7.4.3")]);
        assert!(messages(&analyze_headers(Some(&map))).contains(&"X-Powered-By: PHP/7.4.3".to_string()));

        let map = headers(&[("x-powered-by", "ASP.NET")]);
        assert!(messages(&analyze_headers(Some(&map))).contains(&"X-Powered-By: ASP.NET".to_string()));

        let map = headers(&[("x-powered-by", "Express")]);
        assert!(analyze_headers(Some(&map))
            .iter()
            .all(|f| f.kind != FindingKind::InfoDisclosure));
    }

    #[test]
    fn test_custom_fingerprint_rule() {
        let analyzer = HeaderAnalyzer::new().with_fingerprint(FingerprintRule::new(
            "X-AspNet-Version",
            RegexMatcher::new("aspnet-version", r"[\d.]+").unwrap(),
        ));
        let map = headers(&[("x-aspnet-version", "4.0.30319")]);
        assert!(messages(&analyzer.analyze(Some(&map)))
            .contains(&"X-AspNet-Version: 4.0.30319".to_string()));
    }

    #[test]
    fn test_idempotent() {
        let map = headers(&[
            ("server", "nginx/1.2.3"),
            ("set-cookie", "a=1, b=2; HttpOnly"),
        ]);
        assert_eq!(analyze_headers(Some(&map)), analyze_headers(Some(&map)));
    }
}
