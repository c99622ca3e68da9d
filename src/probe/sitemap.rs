// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use async_trait::async_trait;
use reqwest::Method;

use super::{Probe, Target};
use crate::finding::{Category, Finding, FindingKind, Severity};
use crate::http::{CredentialsMode, HttpClient};

const SITEMAPS_PATH: &str = "/sitemaps.xml";

/// Checks whether `/sitemaps.xml` is served
#[derive(Debug, Clone, Copy, Default)]
pub struct SitemapProbe;

#[async_trait]
impl Probe for SitemapProbe {
    fn name(&self) -> &'static str {
        "sitemaps"
    }

    fn category(&self) -> Category {
        Category::SitemapsIssues
    }

    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding> {
        let url = target.with_path(SITEMAPS_PATH);

        let response = client
            .perform(&url, Method::GET, CredentialsMode::Include, &[])
            .await;

        if let Ok(ref resp) = response {
            tracing::debug!(
                url = %url,
                status = resp.status_code(),
                elapsed_ms = resp.response_time_ms,
                "sitemaps.xml fetched"
            );
        }

        let finding = match response {
            Ok(resp) if resp.is_success() => Finding::new(
                Category::SitemapsIssues,
                FindingKind::ResourceFound,
                Severity::Info,
                "found sitemaps.xml",
            )
            .with_subject(url.to_string()),
            Ok(_) => Finding::new(
                Category::SitemapsIssues,
                FindingKind::ResourceMissing,
                Severity::Info,
                "sitemaps.xml not found",
            ),
            Err(e) => Finding::new(
                Category::SitemapsIssues,
                FindingKind::ProbeFailed,
                Severity::Info,
                format!("sitemaps.xml check failed: {}", e),
            ),
        };

        vec![finding]
    }
}
