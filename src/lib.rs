// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Vartija - Passive Web Reconnaissance Checker
//!
//! Sends a handful of HTTP probes at a single URL and flags common
//! misconfigurations. No crawling, no exploitation, no retries.
//!
//! ## Probes
//!
//! - Security headers: missing `X-Frame-Options` / `Content-Security-Policy`,
//!   cookies without `HttpOnly` / `Secure`, `Server` / `X-Powered-By` fingerprints
//! - HTTP methods: `OPTIONS` allow-list disclosure and/or `TRACE`
//! - Error pages: leaked absolute paths, Tomcat versions, default WebLogic pages
//! - `robots.txt` and `sitemaps.xml` exposure
//! - Unauthenticated access
//! - Clickjacking, derived from the header analysis, with a PoC link
//!
//! ## Example
//!
//! ```rust,no_run
//! use vartija::{Category, ScanConfig, ScanRequest, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = Scanner::new(ScanConfig::default())?;
//!     let result = scanner.handle(ScanRequest::detect("https://example.com")).await;
//!
//!     for finding in result.get(Category::HeaderIssues).unwrap_or_default() {
//!         println!("{}", finding);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod finding;
pub mod http;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod security;

// Errors
pub use error::{Error, ErrorContext, Result};

// Findings
pub use finding::{Category, Finding, FindingKind, ScanResult, Severity};

// HTTP
pub use http::{Cookie, CookieJar, CredentialsMode, HttpClient, HttpClientConfig, Request, Response};

// Probes
pub use probe::{
    BodySignature, ErrorPageProbe, HeaderProbe, MethodProbe, MethodProbeStrategy, Probe,
    RobotsProbe, SitemapProbe, Target, UnauthorizedProbe,
};

// Scanner
pub use scanner::{poc_link, ScanConfig, ScanRequest, Scanner};

// Security
pub use security::{analyze_headers, FingerprintRule, HeaderAnalyzer, Matcher, RegexMatcher, SubstringMatcher};

// Reports
pub use report::{render_text, ScanReport};

/// Vartija version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
