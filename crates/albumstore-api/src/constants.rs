//! API constants
//!
//! Route paths are unversioned: the storefront's pages call them directly.

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Album title reported by the ungated preview endpoint's listing.
pub const PREVIEW_ALBUM_TITLE: &str = "Preview";

/// Bound on each readiness / health probe against an upstream.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
