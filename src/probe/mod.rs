// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network probes
//!
//! Each probe issues its own request(s) against the target and turns the
//! response into findings of exactly one category. Probes never return an
//! error: a failed fetch becomes an empty list or an error finding,
//! depending on the probe.
//!
//! | Probe | Request | On network failure |
//! |---|---|---|
//! | [`HeaderProbe`] | `GET` target | "cannot retrieve response headers" |
//! | [`MethodProbe`] | `OPTIONS` and/or `TRACE` target | nothing |
//! | [`ErrorPageProbe`] | `GET` target + `/esssdad` | nothing |
//! | [`RobotsProbe`] | `GET /robots.txt` | error finding |
//! | [`SitemapProbe`] | `GET /sitemaps.xml` | error finding |
//! | [`UnauthorizedProbe`] | `GET` target, no cookies | error finding |

mod error_page;
mod headers;
mod methods;
mod robots;
mod sitemap;
mod target;
mod unauthorized;

pub use error_page::{
    default_signatures, BodySignature, ErrorPageProbe, DEFAULT_ERROR_SUFFIX, ERROR_STATUSES,
};
pub use headers::HeaderProbe;
pub use methods::{MethodProbe, MethodProbeStrategy};
pub use robots::RobotsProbe;
pub use sitemap::SitemapProbe;
pub use target::Target;
pub use unauthorized::UnauthorizedProbe;

use async_trait::async_trait;

use crate::finding::{Category, Finding};
use crate::http::HttpClient;

/// A single independent network check
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe name, used in logs and error messages
    fn name(&self) -> &'static str;

    /// Category every finding of this probe belongs to
    fn category(&self) -> Category;

    /// Run the probe. Failures are handled internally.
    async fn run(&self, client: &HttpClient, target: &Target) -> Vec<Finding>;
}
