//! HTTP client wrapper for photo page and image requests.
//!
//! Every request of a run carries the same `User-Agent` and `Cookie` headers,
//! set once as client defaults. No timeout is configured: network calls wait
//! as long as the transport allows.

use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, LAST_MODIFIED, USER_AGENT};
use tracing::{debug, instrument};
use url::Url;

use super::error::DownloadError;
use crate::auth::CookieHeader;

/// HTTP client shared by the resolver and the image fetch.
///
/// Created once per run and reused, taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use fmpd_core::auth::CookieHeader;
/// use fmpd_core::download::HttpClient;
/// use fmpd_core::user_agent::DEFAULT_USER_AGENT;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new(DEFAULT_USER_AGENT, &CookieHeader::default())?;
/// let image = client.fetch("https://example.com/photo.jpg").await?;
/// println!("{} bytes", image.bytes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// A fetched picture, held in memory until its name is chosen.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// URL the bytes were fetched from.
    pub url: String,
    /// Response body.
    pub bytes: Vec<u8>,
    /// Raw `Last-Modified` header, if the server sent one.
    pub last_modified: Option<String>,
}

impl HttpClient {
    /// Creates a client sending `user_agent` and `cookies` with every request.
    ///
    /// An empty cookie header is not sent.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidHeader`] when a header value contains
    /// characters HTTP cannot carry, or [`DownloadError::ClientBuild`] when the
    /// underlying client fails to initialise.
    #[instrument(level = "debug", skip(cookies))]
    pub fn new(user_agent: &str, cookies: &CookieHeader) -> Result<Self, DownloadError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| DownloadError::InvalidHeader { name: "User-Agent" })?,
        );

        if !cookies.is_empty() {
            let mut cookie_value = HeaderValue::from_str(cookies.as_str())
                .map_err(|_| DownloadError::InvalidHeader { name: "Cookie" })?;
            cookie_value.set_sensitive(true);
            headers.insert(COOKIE, cookie_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;

        Ok(Self { client })
    }

    /// Fetches a page body as text, whatever the response status.
    ///
    /// The photo host answers unknown identifiers with an ordinary page, so the
    /// status carries no information for the resolver.
    ///
    /// # Errors
    ///
    /// Returns the reqwest error when the request or body decoding fails.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        debug!(status = response.status().as_u16(), "page response");
        response.text().await
    }

    /// Fetches a picture and its `Last-Modified` header.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error)
    /// - The server returns an error status (4xx, 5xx)
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedResource, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::network(url, e))?
            .to_vec();

        debug!(bytes = bytes.len(), last_modified = ?last_modified, "fetched picture");

        Ok(FetchedResource {
            url: url.to_string(),
            bytes,
            last_modified,
        })
    }
}
