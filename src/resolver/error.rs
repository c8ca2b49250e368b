//! Error types for redirect resolution.
//!
//! Messages follow the What/Why/Fix pattern used across the project.

use thiserror::Error;

/// Errors that can occur while asking the photo host for a picture's link.
///
/// An identifier the host does not recognise is not an error: resolvers
/// report it as `Ok(None)` so the run can move on.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The photo page request itself failed (network, TLS, body decoding).
    #[error("request failed for picture '{identifier}' ({url}): {reason}\n  Suggestion: {suggestion}")]
    RequestFailed {
        /// The identifier being resolved.
        identifier: String,
        /// The photo page URL that was requested.
        url: String,
        /// Why the request failed.
        reason: String,
        /// How to fix the issue.
        suggestion: String,
    },

    /// The page URL built from the identifier is not a valid URL.
    #[error("invalid photo page URL '{url}' for picture '{identifier}'")]
    InvalidUrl {
        /// The identifier being resolved.
        identifier: String,
        /// The URL that failed to parse.
        url: String,
    },
}

impl ResolveError {
    /// Creates a `RequestFailed` error.
    #[must_use]
    pub fn request_failed(identifier: &str, url: &str, reason: &str) -> Self {
        Self::RequestFailed {
            identifier: identifier.to_string(),
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "Check your network connection and that the photo host is reachable"
                .to_string(),
        }
    }

    /// Creates an `InvalidUrl` error.
    #[must_use]
    pub fn invalid_url(identifier: &str, url: &str) -> Self {
        Self::InvalidUrl {
            identifier: identifier.to_string(),
            url: url.to_string(),
        }
    }
}
