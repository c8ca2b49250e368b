//! User-Agent sent with photo page and image requests.
//!
//! The photo host serves its lightweight mobile pages to older desktop
//! browsers, so the default identifies as one.

/// Default User-Agent: a legacy desktop Firefox.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:47.0) Gecko/20100101 Firefox/47.0";
