//! Resolver for the photo host's full-size view page.
//!
//! Requesting `<prefix><identifier>` returns a small page whose body carries
//! a `url=...` refresh target pointing at the image. For identifiers the host
//! does not know (or the session cannot see), that target is the home page.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

use super::{RedirectResolver, ResolveError};
use crate::download::HttpClient;

/// Page that generates the full-size image link for an identifier.
pub const DEFAULT_PHOTO_PAGE_PREFIX: &str = "https://m.facebook.com/photo/view_full_size/?fbid=";

/// Refresh target the host returns for identifiers it cannot show.
pub const DEFAULT_HOME_SENTINEL: &str = "https://mbasic.facebook.com/home.php";

#[allow(clippy::expect_used)]
static REFRESH_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url=(.*?)""#).expect("refresh target regex is valid") // Static pattern, safe to panic
});

/// Resolves identifiers through the full-size view page.
#[derive(Debug, Clone)]
pub struct PhotoPageResolver {
    client: HttpClient,
    prefix: String,
    home_sentinel: String,
}

impl PhotoPageResolver {
    /// Creates a resolver against the default photo host.
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self::with_endpoints(client, DEFAULT_PHOTO_PAGE_PREFIX, DEFAULT_HOME_SENTINEL)
    }

    /// Creates a resolver with a custom page prefix and home sentinel.
    #[must_use]
    pub fn with_endpoints(
        client: HttpClient,
        prefix: impl Into<String>,
        home_sentinel: impl Into<String>,
    ) -> Self {
        Self {
            client,
            prefix: prefix.into(),
            home_sentinel: home_sentinel.into(),
        }
    }
}

/// Extracts the refresh target from a photo page body.
///
/// Returns `None` when there is no target or it is the home page sentinel.
/// HTML-escaped ampersands in the target are decoded.
#[must_use]
pub fn extract_redirect(body: &str, home_sentinel: &str) -> Option<String> {
    let target = REFRESH_TARGET.captures(body)?.get(1)?.as_str();
    if target == home_sentinel {
        return None;
    }
    Some(target.replace("&amp;", "&"))
}

#[async_trait]
impl RedirectResolver for PhotoPageResolver {
    fn name(&self) -> &str {
        "photo_page"
    }

    fn page_url(&self, identifier: &str) -> String {
        format!("{}{identifier}", self.prefix)
    }

    #[tracing::instrument(skip(self), fields(resolver = "photo_page"))]
    async fn resolve_redirect(&self, identifier: &str) -> Result<Option<String>, ResolveError> {
        let page_url = self.page_url(identifier);
        Url::parse(&page_url).map_err(|_| ResolveError::invalid_url(identifier, &page_url))?;

        let body = self
            .client
            .get_text(&page_url)
            .await
            .map_err(|e| ResolveError::request_failed(identifier, &page_url, &e.to_string()))?;

        let redirect = extract_redirect(&body, &self.home_sentinel);
        debug!(found = redirect.is_some(), "photo page parsed");
        Ok(redirect)
    }
}
