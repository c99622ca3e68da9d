// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Header overrides
    pub headers: HeaderMap,
    /// Credentials mode
    pub credentials: CredentialsMode,
}

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send the ambient cookies
    #[default]
    Include,
    /// Send no cookies
    Omit,
}

impl Request {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            credentials: CredentialsMode::default(),
        }
    }

    /// Set a header, silently dropping names or values that are not valid HTTP
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set multiple headers
    pub fn headers<'a, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/path").unwrap()
    }

    #[test]
    fn test_request_creation() {
        let req = Request::new(Method::OPTIONS, url());
        assert_eq!(req.method, Method::OPTIONS);
        assert_eq!(req.url.host_str(), Some("example.com"));
        assert_eq!(req.credentials, CredentialsMode::Include);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_request_headers() {
        let req = Request::new(Method::GET, url())
            .headers([("x-custom", "value"), ("bad header", "dropped")]);
        assert_eq!(
            req.headers.get("x-custom").map(|v| v.to_str().unwrap()),
            Some("value")
        );
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn test_header_override_replaces() {
        let req = Request::new(Method::GET, url())
            .header("user-agent", "first")
            .header("User-Agent", "second")
            .credentials(CredentialsMode::Omit);
        assert_eq!(req.headers.get_all("user-agent").iter().count(), 1);
        assert_eq!(req.headers["user-agent"], "second");
        assert_eq!(req.credentials, CredentialsMode::Omit);
    }
}
