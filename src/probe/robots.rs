// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use async_trait::async_trait;
use reqwest::Method;

use super::{Probe, Target};
use crate::finding::{Category, Finding, FindingKind, Severity};
use crate::http::{CredentialsMode, HttpClient};

const ROBOTS_PATH: &str = "/robots.txt";

/// Directives that point at sensitive areas
const SENSITIVE_RULES: [&str; 2] = ["Disallow: /admin", "Disallow: /login"];

const CRAWL_ALL_RULE: &str = "Allow: /";

/// Reads `/robots.txt` from the target host
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotsProbe;

impl RobotsProbe {
    /// Findings for a robots.txt body that was served successfully
    pub fn inspect(body: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        if SENSITIVE_RULES.iter().any(|rule| body.contains(rule)) {
            findings.push(Finding::new(
                Category::RobotsIssues,
                FindingKind::SensitivePaths,
                Severity::Low,
                "robots.txt may expose sensitive directories",
            ));
        }

        if body.contains(CRAWL_ALL_RULE) {
            findings.push(Finding::new(
                Category::RobotsIssues,
                FindingKind::CrawlAllowed,
                Severity::Info,
                "robots.txt allows crawling the whole site",
            ));
        }

        findings
    }
}

#[async_trait]
impl Probe for RobotsProbe {
    fn name(&self) -> &'static str {
        "robots"
    }

    fn category(&self) -> Category {
        Category::RobotsIssues
    }

    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding> {
        let url = target.with_path(ROBOTS_PATH);

        match client
            .perform(&url, Method::GET, CredentialsMode::Include, &[])
            .await
        {
            Ok(resp) if resp.is_success() => {
                tracing::debug!(
                    url = %url,
                    final_url = %resp.url,
                    elapsed_ms = resp.response_time_ms,
                    "robots.txt fetched"
                );
                Self::inspect(&resp.text_lossy())
            }
            Ok(resp) => {
                tracing::debug!(
                    url = %url,
                    status = resp.status_code(),
                    elapsed_ms = resp.response_time_ms,
                    "robots.txt not found"
                );
                vec![Finding::new(
                    Category::RobotsIssues,
                    FindingKind::ResourceMissing,
                    Severity::Info,
                    "robots.txt not found",
                )]
            }
            Err(e) => vec![Finding::new(
                Category::RobotsIssues,
                FindingKind::ProbeFailed,
                Severity::Info,
                format!("robots.txt check failed: {}", e),
            )],
        }
    }
}
