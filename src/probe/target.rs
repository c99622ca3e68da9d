// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Parsed scan target and the URLs derived from it

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// The URL being scanned, parsed once per scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parse and validate an absolute http(s) URL
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            scheme => Err(Error::UnsupportedScheme {
                url: url.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }

    /// The target URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Same scheme, host, port and query, with the path replaced
    pub fn with_path(&self, path: &str) -> Url {
        let mut url = self.url.clone();
        url.set_path(path);
        url
    }

    /// Append a segment to the current path, dropping one trailing slash first
    pub fn with_suffix(&self, segment: &str) -> Url {
        let path = self.url.path();
        let base = path.strip_suffix('/').unwrap_or(path);
        self.with_path(&format!("{}/{}", base, segment))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
