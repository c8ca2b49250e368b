//! Identifier to download link resolution.
//!
//! A picture identifier does not point at the image itself but at a page that
//! generates a short-lived link to it. A [`RedirectResolver`] turns the
//! identifier into that link, or reports that the identifier is unknown.
//!
//! - [`RedirectResolver`] - Async trait the download engine drives
//! - [`PhotoPageResolver`] - Resolver for the photo host's full-size view page

mod error;
mod photo_page;

pub use error::ResolveError;
pub use photo_page::{DEFAULT_HOME_SENTINEL, DEFAULT_PHOTO_PAGE_PREFIX, PhotoPageResolver};

use async_trait::async_trait;

/// Turns a picture identifier into a followable download link.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via
/// `Box<dyn RedirectResolver>`. Rust 2024 native async traits are not
/// object-safe.
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Returns the resolver's name, used in logs.
    fn name(&self) -> &str;

    /// URL a user can open in a browser to check the picture by hand.
    fn page_url(&self, identifier: &str) -> String;

    /// Resolves the identifier.
    ///
    /// Returns `Ok(None)` when the host does not know the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the host could not be asked at all.
    async fn resolve_redirect(&self, identifier: &str) -> Result<Option<String>, ResolveError>;
}
