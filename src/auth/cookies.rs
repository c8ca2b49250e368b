//! Netscape cookie file reader.
//!
//! Flattens a curl/Netscape cookie file (TAB-separated fields per line) into a
//! single `Cookie` request header value: `name=value; name=value; ...`.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::input::decode_line;

/// A single `name=value` pair taken from a cookie file line.
///
/// The value is redacted in Debug output so it never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CookiePair {
    /// Cookie name (second to last field).
    pub name: String,
    /// Cookie value (last field, sensitive).
    value: String,
}

impl CookiePair {
    /// Creates a new cookie pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renders the pair as it appears in a `Cookie` header.
    #[must_use]
    pub fn to_header_fragment(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl fmt::Debug for CookiePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookiePair")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Flattened `Cookie` header value.
///
/// Debug output lists only the cookie names.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CookieHeader(String);

impl CookieHeader {
    /// Joins cookie pairs with `; `. Pairs with the same name are all kept.
    #[must_use]
    pub fn from_pairs(pairs: &[CookiePair]) -> Self {
        Self(
            pairs
                .iter()
                .map(CookiePair::to_header_fragment)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// The raw header value (sensitive).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the file contained no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CookieHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .0
            .split("; ")
            .filter_map(|pair| pair.split_once('=').map(|(name, _)| name))
            .collect();
        f.debug_tuple("CookieHeader").field(&names).finish()
    }
}

/// Errors that can occur while reading a cookie file.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// The cookie file could not be opened or read.
    #[error("failed to read cookie file {path}: {source}")]
    Io {
        /// Path of the cookie file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Parses Netscape-format cookie lines from a buffered reader.
///
/// Blank lines and lines starting with `# ` (hash, space) are comments. A `#`
/// without a following space is part of the line: curl writes HttpOnly cookies
/// as `#HttpOnly_.domain ...`, and some cookie names start with `#`.
///
/// For every other line the last two TAB-separated fields are the cookie name
/// and value. Lines with a single field carry no pair and are skipped with a
/// warning.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub fn parse_netscape_cookies(mut reader: impl BufRead) -> std::io::Result<Vec<CookiePair>> {
    let mut pairs = Vec::new();
    let mut raw = Vec::new();
    let mut line_number = 0;

    // Browser exports are not always UTF-8; decode lossily per line.
    while reader.read_until(b'\n', &mut raw)? > 0 {
        line_number += 1;
        let line = decode_line(&raw);
        raw.clear();

        if line.trim().is_empty() || line.starts_with("# ") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let [.., name, value] = fields.as_slice() else {
            warn!(line = line_number, "skipping cookie line without TAB-separated name and value");
            continue;
        };

        debug!(line = line_number, name = %name, "parsed cookie");
        pairs.push(CookiePair::new(*name, *value));
    }

    Ok(pairs)
}

/// Reads a cookie file and flattens it into a `Cookie` header value.
///
/// # Errors
///
/// Returns [`CookieError::Io`] when the file cannot be opened or read.
#[instrument(level = "debug", fields(path = %path.display()))]
pub fn read_cookie_header(path: &Path) -> Result<CookieHeader, CookieError> {
    let io_error = |source| CookieError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let pairs = parse_netscape_cookies(BufReader::new(file)).map_err(io_error)?;
    debug!(count = pairs.len(), "loaded cookies");
    Ok(CookieHeader::from_pairs(&pairs))
}
