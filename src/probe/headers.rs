// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use async_trait::async_trait;
use reqwest::Method;

use super::{Probe, Target};
use crate::finding::{Category, Finding};
use crate::http::{headers, CredentialsMode, HttpClient, DEFAULT_USER_AGENT};
use crate::security::HeaderAnalyzer;

/// Fetches the target with ambient cookies and analyzes its response headers.
///
/// A non-2xx response is treated like a failed fetch: the headers count as
/// unavailable.
pub struct HeaderProbe {
    user_agent: String,
    analyzer: HeaderAnalyzer,
}

impl Default for HeaderProbe {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl HeaderProbe {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            analyzer: HeaderAnalyzer::new(),
        }
    }
}

#[async_trait]
impl Probe for HeaderProbe {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn category(&self) -> Category {
        Category::HeaderIssues
    }

    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding> {
        let response = client
            .perform(
                target.url(),
                Method::GET,
                CredentialsMode::Include,
                &[(headers::USER_AGENT, self.user_agent.as_str())],
            )
            .await;

        match response {
            Ok(resp) if resp.is_success() => {
                tracing::debug!(
                    url = %target,
                    final_url = %resp.url,
                    headers = resp.headers.len(),
                    elapsed_ms = resp.response_time_ms,
                    "Analyzing response headers"
                );
                self.analyzer.analyze(Some(&resp.headers))
            }
            Ok(resp) => {
                tracing::debug!(
                    url = %target,
                    status = resp.status_code(),
                    elapsed_ms = resp.response_time_ms,
                    "Header probe got non-success status"
                );
                self.analyzer.analyze(None)
            }
            Err(e) => {
                tracing::warn!(
                    url = %target,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Failed to fetch response headers"
                );
                self.analyzer.analyze(None)
            }
        }
    }
}
