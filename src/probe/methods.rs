// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Probe, Target};
use crate::finding::{Category, Finding, FindingKind, Severity};
use crate::http::{headers, CredentialsMode, HttpClient, Response};

/// Methods that are worth a higher severity when a server advertises them
const RISKY_METHODS: [&str; 5] = ["PUT", "DELETE", "TRACE", "CONNECT", "PATCH"];

/// Technique used by the HTTP method probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodProbeStrategy {
    /// `OPTIONS` request, report the disclosed `Allow` list
    #[default]
    Options,
    /// `TRACE` request, report whether TRACE is accepted
    Trace,
    /// Both of the above, OPTIONS findings first
    Both,
}

impl std::str::FromStr for MethodProbeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "options" => Ok(Self::Options),
            "trace" => Ok(Self::Trace),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown method probe '{}', expected options, trace or both",
                other
            )),
        }
    }
}

/// Probes which HTTP methods the target accepts.
///
/// Network failures and non-success responses produce no findings.
#[derive(Debug, Clone, Default)]
pub struct MethodProbe {
    strategy: MethodProbeStrategy,
}

impl MethodProbe {
    pub fn new(strategy: MethodProbeStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> MethodProbeStrategy {
        self.strategy
    }

    async fn send(&self, client: &HttpClient, target: &Target, method: Method) -> Option<Response> {
        match client
            .perform(target.url(), method.clone(), CredentialsMode::Include, &[])
            .await
        {
            Ok(resp) if resp.is_success() => {
                tracing::debug!(
                    url = %target,
                    method = %method,
                    status = resp.status_code(),
                    elapsed_ms = resp.response_time_ms,
                    "Method accepted"
                );
                Some(resp)
            }
            Ok(resp) => {
                tracing::debug!(
                    url = %target,
                    method = %method,
                    status = resp.status_code(),
                    elapsed_ms = resp.response_time_ms,
                    "Method probe got non-success status"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    url = %target,
                    method = %method,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Method probe failed"
                );
                None
            }
        }
    }

    async fn probe_options(&self, client: &HttpClient, target: &Target) -> Option<Finding> {
        let resp = self.send(client, target, Method::OPTIONS).await?;
        Some(options_finding(&resp))
    }

    async fn probe_trace(&self, client: &HttpClient, target: &Target) -> Option<Finding> {
        self.send(client, target, Method::TRACE).await?;
        Some(Finding::new(
            Category::HttpMethodIssues,
            FindingKind::TraceEnabled,
            Severity::Medium,
            "TRACE method enabled",
        ))
    }
}

fn options_finding(resp: &Response) -> Finding {
    let listed = |name: &str| resp.header(name).map(str::trim).filter(|v| !v.is_empty());
    let allowed = listed(headers::ALLOW).or_else(|| listed(headers::ACCESS_CONTROL_ALLOW_METHODS));

    match allowed {
        Some(methods) => {
            let risky = methods
                .split(',')
                .any(|m| RISKY_METHODS.iter().any(|r| m.trim().eq_ignore_ascii_case(r)));
            let severity = if risky { Severity::Medium } else { Severity::Info };
            Finding::new(
                Category::HttpMethodIssues,
                FindingKind::AllowedMethods,
                severity,
                format!("allowed methods: {}", methods),
            )
            .with_subject(methods)
        }
        None => Finding::new(
            Category::HttpMethodIssues,
            FindingKind::MethodsUndisclosed,
            Severity::Info,
            "server responded to OPTIONS without disclosing allowed methods",
        ),
    }
}

#[async_trait]
impl Probe for MethodProbe {
    fn name(&self) -> &'static str {
        "http-methods"
    }

    fn category(&self) -> Category {
        Category::HttpMethodIssues
    }

    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding> {
        let mut findings = Vec::new();

        if matches!(self.strategy, MethodProbeStrategy::Options | MethodProbeStrategy::Both) {
            findings.extend(self.probe_options(client, target).await);
        }
        if matches!(self.strategy, MethodProbeStrategy::Trace | MethodProbeStrategy::Both) {
            findings.extend(self.probe_trace(client, target).await);
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;
    use url::Url;

    fn response(pairs: &[(&'static str, &'static str)]) -> Response {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        Response::new(
            StatusCode::OK,
            map,
            Bytes::new(),
            Url::parse("https://example.com").unwrap(),
            1,
        )
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("OPTIONS".parse::<MethodProbeStrategy>(), Ok(MethodProbeStrategy::Options));
        assert_eq!("trace".parse::<MethodProbeStrategy>(), Ok(MethodProbeStrategy::Trace));
        assert_eq!("both".parse::<MethodProbeStrategy>(), Ok(MethodProbeStrategy::Both));
        assert!("head".parse::<MethodProbeStrategy>().is_err());
        assert_eq!(MethodProbeStrategy::default(), MethodProbeStrategy::Options);
    }

    #[test]
    fn test_allow_header_preferred() {
        let finding = options_finding(&response(&[
            ("allow", "GET, HEAD"),
            ("access-control-allow-methods", "PUT"),
        ]));
        assert_eq!(finding.kind, FindingKind::AllowedMethods);
        assert_eq!(finding.message, "allowed methods: GET, HEAD");
        assert_eq!(finding.severity, Severity::Info);
    }

    #[test]
    fn test_cors_methods_fallback_and_risky_severity() {
        let finding = options_finding(&response(&[(
            "access-control-allow-methods",
            "GET, PUT, DELETE",
        )]));
        assert_eq!(finding.subject.as_deref(), Some("GET, PUT, DELETE"));
        assert_eq!(finding.severity, Severity::Medium);
    }

    #[test]
    fn test_empty_allow_falls_back_to_cors_methods() {
        let finding = options_finding(&response(&[
            ("allow", ""),
            ("access-control-allow-methods", "GET, PUT, DELETE"),
        ]));
        assert_eq!(finding.kind, FindingKind::AllowedMethods);
        assert_eq!(finding.message, "allowed methods: GET, PUT, DELETE");
        assert_eq!(finding.severity, Severity::Medium);

        let finding = options_finding(&response(&[
            ("allow", "  "),
            ("access-control-allow-methods", ""),
        ]));
        assert_eq!(finding.kind, FindingKind::MethodsUndisclosed);
    }

    #[test]
    fn test_undisclosed_methods() {
        let finding = options_finding(&response(&[]));
        assert_eq!(finding.kind, FindingKind::MethodsUndisclosed);
        assert_eq!(
            finding.message,
            "server responded to OPTIONS without disclosing allowed methods"
        );
    }
}
