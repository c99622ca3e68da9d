// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scan configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorContext, Result};
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};
use crate::probe::MethodProbeStrategy;

/// Default location of the clickjacking proof-of-concept page
pub const DEFAULT_POC_BASE: &str = "poc/clickjacking.html";

/// Scan configuration
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// User agent sent by the header and unauthenticated-access probes
    pub user_agent: String,
    /// Network timeout per request, in seconds
    #[serde(rename = "timeout")]
    pub timeout_secs: u64,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// HTTP method probe technique
    pub method_strategy: MethodProbeStrategy,
    /// Base URL of the clickjacking PoC page
    pub poc_base: String,
    /// Path segment requested to provoke an error page
    pub error_probe_suffix: String,
    /// Ambient cookies in `Set-Cookie` syntax
    pub cookies: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
            method_strategy: MethodProbeStrategy::default(),
            poc_base: DEFAULT_POC_BASE.to_string(),
            error_probe_suffix: crate::probe::DEFAULT_ERROR_SUFFIX.to_string(),
            cookies: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Create a new scan config
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(&format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make a scan meaningless
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout must be greater than zero"));
        }
        if self.poc_base.trim().is_empty() {
            return Err(Error::config("poc_base must not be empty"));
        }
        let suffix = self.error_probe_suffix.trim();
        if suffix.is_empty() || suffix.contains('/') {
            return Err(Error::config(
                "error_probe_suffix must be a single non-empty path segment",
            ));
        }
        Ok(())
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the HTTP method probe technique
    pub fn method_strategy(mut self, strategy: MethodProbeStrategy) -> Self {
        self.method_strategy = strategy;
        self
    }

    /// Set the clickjacking PoC base URL
    pub fn poc_base(mut self, poc_base: impl Into<String>) -> Self {
        self.poc_base = poc_base.into();
        self
    }

    /// Add an ambient cookie
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookies.push(cookie.into());
        self
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
            accept_invalid_certs: self.accept_invalid_certs,
            proxy: self.proxy.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.method_strategy, MethodProbeStrategy::Options);
        assert_eq!(config.error_probe_suffix, "esssdad");
        assert_eq!(config.http_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder() {
        let config = ScanConfig::new()
            .timeout(Duration::from_millis(200))
            .method_strategy(MethodProbeStrategy::Both)
            .cookie("sid=1")
            .poc_base("https://poc.local/frame.html");
        assert_eq!(config.timeout_secs, 1);
        assert_eq!(config.cookies, vec!["sid=1"]);
        assert_eq!(config.poc_base, "https://poc.local/frame.html");
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"method_strategy": "trace", "cookies": ["a=1"], "timeout": 5}}"#
        )
        .unwrap();

        let config = ScanConfig::from_file(file.path()).unwrap();
        assert_eq!(config.method_strategy, MethodProbeStrategy::Trace);
        assert_eq!(config.cookies, vec!["a=1"]);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_timeout_key() {
        let json = serde_json::to_value(ScanConfig::default()).unwrap();
        assert_eq!(json["timeout"], 30);
        assert!(json.get("timeout_secs").is_none());

        let config: ScanConfig = serde_json::from_str(r#"{"timeout": 0}"#).unwrap();
        assert_eq!(config.timeout_secs, 0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"error_probe_suffix": "a/b"}}"#).unwrap();
        assert!(matches!(
            ScanConfig::from_file(file.path()),
            Err(Error::Config(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ScanConfig::from_file(file.path()),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ScanConfig::from_file("/nonexistent/vartija.json").unwrap_err();
        assert!(err.to_string().starts_with("reading config /nonexistent/vartija.json"));
    }
}
