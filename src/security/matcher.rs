// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Text matchers for heuristic body and header scraping
//!
//! Error pages and fingerprint headers are scanned with small pattern
//! matchers. They sit behind the [`Matcher`] trait so the signature sets
//! can be extended and tested without any network plumbing.

use std::collections::HashSet;

use regex::Regex;

use crate::error::{Error, Result};

/// A pattern that can be searched for in text
pub trait Matcher: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Every match in `text`, in order of first appearance.
    /// Repeated occurrences of the same text are reported once.
    fn find_all(&self, text: &str) -> Vec<String>;

    /// Whether `text` contains at least one match
    fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }
}

/// Regex backed matcher
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    name: String,
    regex: Regex,
}

impl RegexMatcher {
    /// Compile a new matcher
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::config(format!("Invalid pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    /// Wrap an already compiled regex
    pub fn from_regex(name: impl Into<String>, regex: Regex) -> Self {
        Self {
            name: name.into(),
            regex,
        }
    }
}

impl Matcher for RegexMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_all(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|m| seen.insert(m.clone()))
            .collect()
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Literal, case-sensitive substring matcher
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    name: String,
    needle: String,
}

impl SubstringMatcher {
    pub fn new(name: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            needle: needle.into(),
        }
    }
}

impl Matcher for SubstringMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_all(&self, text: &str) -> Vec<String> {
        if text.contains(&self.needle) {
            vec![self.needle.clone()]
        } else {
            Vec::new()
        }
    }

    fn is_match(&self, text: &str) -> bool {
        text.contains(&self.needle)
    }
}
