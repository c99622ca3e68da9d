// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use async_trait::async_trait;
use reqwest::Method;

use super::{Probe, Target};
use crate::finding::{Category, Finding, FindingKind, Severity};
use crate::http::{headers, CredentialsMode, HttpClient, DEFAULT_USER_AGENT};

/// Requests the target without any cookies to see whether it is served
/// to anonymous clients.
pub struct UnauthorizedProbe {
    user_agent: String,
}

impl Default for UnauthorizedProbe {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl UnauthorizedProbe {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    /// Classify the status of an anonymous request
    pub fn classify(status: u16) -> Finding {
        match status {
            200..=299 => Finding::new(
                Category::UnauthorizedAccessIssues,
                FindingKind::UnauthenticatedAccess,
                Severity::Medium,
                format!("page is accessible without authentication (HTTP {})", status),
            ),
            401 | 403 => Finding::new(
                Category::UnauthorizedAccessIssues,
                FindingKind::AuthorizationEnforced,
                Severity::Info,
                format!(
                    "authorization is enforced for anonymous requests (HTTP {})",
                    status
                ),
            ),
            _ => Finding::new(
                Category::UnauthorizedAccessIssues,
                FindingKind::StatusReported,
                Severity::Info,
                format!("anonymous request returned HTTP {}", status),
            ),
        }
    }
}

#[async_trait]
impl Probe for UnauthorizedProbe {
    fn name(&self) -> &'static str {
        "unauthorized-access"
    }

    fn category(&self) -> Category {
        Category::UnauthorizedAccessIssues
    }

    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding> {
        let finding = match client
            .perform(
                target.url(),
                Method::GET,
                CredentialsMode::Omit,
                &[(headers::USER_AGENT, self.user_agent.as_str())],
            )
            .await
        {
            Ok(resp) => {
                tracing::debug!(
                    url = %target,
                    status = resp.status_code(),
                    elapsed_ms = resp.response_time_ms,
                    "Anonymous request answered"
                );
                Self::classify(resp.status_code())
            }
            Err(e) => Finding::new(
                Category::UnauthorizedAccessIssues,
                FindingKind::ProbeFailed,
                Severity::Info,
                format!("unauthenticated access check failed: {}", e),
            ),
        };

        vec![finding]
    }
}
