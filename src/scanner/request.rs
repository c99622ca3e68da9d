// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Typed request contract for callers that talk to the scanner over a
//! message channel (`{"action": "detect", "url": "..."}`)

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A request to the scanner, one variant per supported action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ScanRequest {
    /// Scan a single URL
    Detect { url: String },
}

impl ScanRequest {
    /// Create a detect request
    pub fn detect(url: impl Into<String>) -> Self {
        ScanRequest::Detect { url: url.into() }
    }

    /// Parse a request from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
