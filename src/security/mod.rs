// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Security analysis modules
//!
//! - Response header analysis
//! - Pluggable text matchers for body and header scraping

mod headers;
mod matcher;

pub use headers::{analyze_headers, FingerprintRule, HeaderAnalyzer};
pub use matcher::{Matcher, RegexMatcher, SubstringMatcher};
