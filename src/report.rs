// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Report rendering for the command line

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finding::ScanResult;

/// A scan result with the context the CLI prints alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// URL as given by the caller
    pub target: String,
    /// When the scan started
    pub started_at: DateTime<Utc>,
    /// Wall clock duration
    pub duration_ms: u64,
    /// Categorized findings
    pub result: ScanResult,
}

impl ScanReport {
    pub fn new(
        target: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        result: ScanResult,
    ) -> Self {
        Self {
            target: target.into(),
            started_at,
            duration_ms,
            result,
        }
    }

    /// Pretty JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a result as plain text, skipping empty categories
pub fn render_text(result: &ScanResult) -> String {
    let mut out = String::new();

    for (category, findings) in result.iter() {
        if findings.is_empty() {
            continue;
        }

        let _ = writeln!(out, "=== {} ===", category.title());
        for finding in findings {
            let _ = write!(out, "  [{}] {}", finding.severity, finding);
            if let Some(ref poc) = finding.poc {
                let _ = write!(out, " [PoC: {}]", poc);
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("No issues found.\n");
    }

    out
}
