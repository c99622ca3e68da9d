// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Common test utilities

#![allow(dead_code)]

use vartija::{Finding, FindingKind, HttpClient, ScanConfig, Target};

/// Client with short timeouts for tests
pub fn test_client() -> HttpClient {
    HttpClient::with_config(test_config().http_config()).expect("Failed to create client")
}

pub fn test_config() -> ScanConfig {
    ScanConfig::default().user_agent("Vartija-Test/0.1.0")
}

pub fn target(uri: &str) -> Target {
    Target::parse(uri).expect("Invalid target")
}

/// A URL on a local port nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

pub fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
    findings.iter().map(|f| f.kind).collect()
}
