// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for Vartija
//!
//! A thin fetch adapter over reqwest: configurable method, credentials
//! mode and header overrides, returning status, headers and body or an
//! error. Probes own every request they make.

mod client;
mod cookie;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use cookie::{Cookie, CookieJar};
pub use request::{CredentialsMode, Request};
pub use response::Response;

/// Browser user agent sent by the header and unauthenticated-access probes
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

/// HTTP header names the analyzer and probes look at
pub mod headers {
    pub const USER_AGENT: &str = "user-agent";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const ALLOW: &str = "allow";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "access-control-allow-methods";
}
