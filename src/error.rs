// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for Vartija
//!
//! Probes never surface these to the caller: a failed fetch is turned into
//! an empty finding list or an error finding inside the probe. Only the
//! orchestrator converts an escaped error into a `generalError` result.

use thiserror::Error;

/// Result type alias for Vartija operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Vartija
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (DNS, TLS, connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Target URL parsed but cannot be probed over HTTP
    #[error("Unsupported scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    /// A probe task failed outside its own isolation boundary
    #[error("Probe '{probe}' failed: {reason}")]
    Probe { probe: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a probe failure
    pub fn probe(probe: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Probe {
            probe: probe.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error() {
        let err = Error::probe("robots", "task panicked");
        assert_eq!(err.to_string(), "Probe 'robots' failed: task panicked");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_unsupported_scheme_message() {
        let err = Error::UnsupportedScheme {
            url: "ftp://example.com/".to_string(),
            scheme: "ftp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported scheme 'ftp' in ftp://example.com/"
        );
    }

    #[test]
    fn test_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = res.context("reading config vartija.json").unwrap_err();
        assert_eq!(
            err.to_string(),
            "reading config vartija.json: I/O error: no such file"
        );
    }
}
