//! Sequential download pipeline.
//!
//! The engine takes raw identifier lines one at a time and drives each through
//! resolve, fetch, timestamp, name and write before looking at the next. Only
//! one item is in flight at any time, so the collision check for an item always
//! sees every file written earlier in the same run.
//!
//! # Example
//!
//! ```no_run
//! use fmpd_core::auth::CookieHeader;
//! use fmpd_core::download::{DownloadEngine, HttpClient, PipelineOptions};
//! use fmpd_core::naming::Namer;
//! use fmpd_core::resolver::PhotoPageResolver;
//! use fmpd_core::user_agent::DEFAULT_USER_AGENT;
//! use futures_util::stream;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(DEFAULT_USER_AGENT, &CookieHeader::default())?;
//! let engine = DownloadEngine::new(
//!     Box::new(PhotoPageResolver::new(client.clone())),
//!     client,
//!     Namer::compile("f.jpg"),
//!     PipelineOptions::default(),
//! );
//! let ids = stream::iter(vec![Ok("10150".to_string())]);
//! let stats = engine.run(ids, |_| {}).await?;
//! println!("Written: {}, Unresolved: {}", stats.written(), stats.unresolved());
//! # Ok(())
//! # }
//! ```

use std::io;
use std::path::PathBuf;

use futures_util::{Stream, StreamExt};
use tracing::{debug, instrument, warn};

use super::timestamp::{now, parse_last_modified};
use super::{DownloadError, FetchedResource, HttpClient, write_picture};
use crate::input::normalize_identifier;
use crate::naming::{Namer, NamingError, Timestamp, resolve_unique_path};
use crate::resolver::{RedirectResolver, ResolveError};

/// Error type for download engine operations.
///
/// Any of these ends the run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The photo page could not be requested.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The picture could not be fetched or saved.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// No free file name was found within the ordinal cap.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// The collision search task panicked or was cancelled.
    #[error("name search task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Reading the identifier source failed.
    #[error("failed to read identifiers: {0}")]
    Input(#[source] io::Error),
}

/// Run-wide settings for [`DownloadEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Directory the rendered names are resolved against.
    pub output_dir: PathBuf,
    /// Suppresses the timestamp-fallback warning.
    pub quiet: bool,
    /// Highest ordinal the collision search may try. `None` is unbounded.
    pub max_ordinal: Option<u64>,
    /// Skip items whose photo page or image request fails instead of aborting.
    pub keep_going: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            quiet: true,
            max_ordinal: None,
            keep_going: false,
        }
    }
}

/// Why an input line produced no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Blank line or `#` comment.
    NotAnIdentifier,
    /// The photo host does not know the identifier.
    Unresolvable {
        /// Trimmed identifier.
        identifier: String,
    },
    /// A request failed and `keep_going` was set.
    FetchFailed {
        /// Trimmed identifier.
        identifier: String,
        /// Error message of the failed request.
        reason: String,
    },
}

/// Terminal state of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The picture was saved.
    Written {
        /// Trimmed identifier.
        identifier: String,
        /// Path the picture was written to, including the output directory.
        path: PathBuf,
    },
    /// Nothing was written.
    Skipped(SkipReason),
}

/// Counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    written: usize,
    ignored: usize,
    unresolved: usize,
    failed: usize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pictures written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the number of blank and comment lines.
    #[must_use]
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Returns the number of identifiers the host did not know.
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    /// Returns the number of items skipped after a failed request.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the number of identifiers processed (everything but ignored lines).
    #[must_use]
    pub fn total(&self) -> usize {
        self.written + self.unresolved + self.failed
    }

    fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Written { .. } => self.written += 1,
            ItemOutcome::Skipped(SkipReason::NotAnIdentifier) => self.ignored += 1,
            ItemOutcome::Skipped(SkipReason::Unresolvable { .. }) => self.unresolved += 1,
            ItemOutcome::Skipped(SkipReason::FetchFailed { .. }) => self.failed += 1,
        }
    }
}

/// Drives identifiers through the pipeline, strictly one after another.
pub struct DownloadEngine {
    resolver: Box<dyn RedirectResolver>,
    client: HttpClient,
    namer: Namer,
    options: PipelineOptions,
}

impl std::fmt::Debug for DownloadEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadEngine")
            .field("resolver", &self.resolver.name())
            .field("namer", &self.namer)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl DownloadEngine {
    /// Creates an engine.
    ///
    /// `client` fetches the images and should carry the same headers the
    /// resolver uses for the photo pages.
    #[must_use]
    pub fn new(
        resolver: Box<dyn RedirectResolver>,
        client: HttpClient,
        namer: Namer,
        options: PipelineOptions,
    ) -> Self {
        Self {
            resolver,
            client,
            namer,
            options,
        }
    }

    /// Returns the run options.
    #[must_use]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Processes every line of `identifiers` in order.
    ///
    /// Lines are pulled from the stream only after the previous item reached a
    /// terminal state, so unbounded or interactive sources work. `on_outcome`
    /// sees each item's outcome as soon as it is known.
    ///
    /// # Errors
    ///
    /// Stops at the first [`EngineError`]; items already written stay on disk.
    pub async fn run<S, F>(&self, mut identifiers: S, mut on_outcome: F) -> Result<DownloadStats, EngineError>
    where
        S: Stream<Item = io::Result<String>> + Unpin,
        F: FnMut(&ItemOutcome),
    {
        let mut stats = DownloadStats::new();

        while let Some(line) = identifiers.next().await {
            let line = line.map_err(EngineError::Input)?;
            let outcome = self.process_identifier(&line).await?;
            stats.record(&outcome);
            on_outcome(&outcome);
        }

        debug!(total = stats.total(), ignored = stats.ignored(), "identifier source exhausted");
        Ok(stats)
    }

    /// Runs one raw input line through the pipeline.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Resolve`] / [`EngineError::Download`] when a request
    ///   fails and `keep_going` is off, or the picture cannot be written
    /// - [`EngineError::Naming`] when the ordinal cap is reached
    /// - [`EngineError::Task`] when the name search task dies
    #[instrument(skip(self, raw), fields(identifier = %raw.trim()))]
    pub async fn process_identifier(&self, raw: &str) -> Result<ItemOutcome, EngineError> {
        let Some(identifier) = normalize_identifier(raw) else {
            return Ok(ItemOutcome::Skipped(SkipReason::NotAnIdentifier));
        };

        let redirect = match self.resolver.resolve_redirect(identifier).await {
            Ok(redirect) => redirect,
            Err(error) if self.options.keep_going => return Ok(skip_failed(identifier, &error)),
            Err(error) => return Err(error.into()),
        };
        let Some(url) = redirect else {
            warn!(
                page = %self.resolver.page_url(identifier),
                "invalid picture identifier, check the page in a browser"
            );
            return Ok(ItemOutcome::Skipped(SkipReason::Unresolvable {
                identifier: identifier.to_string(),
            }));
        };
        debug!(url = %url, "resolved");

        let fetched = match self.client.fetch(&url).await {
            Ok(fetched) => fetched,
            Err(error) if self.options.keep_going => return Ok(skip_failed(identifier, &error)),
            Err(error) => return Err(error.into()),
        };

        let timestamp = self.timestamp_of(&fetched);
        let path = self.free_path(identifier, timestamp).await?;
        write_picture(&path, &fetched.bytes).await?;

        Ok(ItemOutcome::Written {
            identifier: identifier.to_string(),
            path,
        })
    }

    /// Runs the collision search on the blocking pool, since every candidate
    /// is checked against the filesystem.
    async fn free_path(&self, identifier: &str, timestamp: Timestamp) -> Result<PathBuf, EngineError> {
        let namer = self.namer.clone();
        let identifier = identifier.to_string();
        let output_dir = self.options.output_dir.clone();
        let max_ordinal = self.options.max_ordinal;

        let name = tokio::task::spawn_blocking(move || {
            resolve_unique_path(&namer, &identifier, &timestamp, max_ordinal, |candidate| {
                output_dir.join(candidate).exists()
            })
        })
        .await??;

        Ok(self.options.output_dir.join(name))
    }

    fn timestamp_of(&self, fetched: &FetchedResource) -> Timestamp {
        if let Some(timestamp) = fetched.last_modified.as_deref().and_then(parse_last_modified) {
            return timestamp;
        }
        if !self.options.quiet {
            warn!(
                url = %fetched.url,
                last_modified = ?fetched.last_modified,
                "no usable Last-Modified header, using current time"
            );
        }
        now()
    }
}

fn skip_failed(identifier: &str, error: &dyn std::error::Error) -> ItemOutcome {
    warn!(error = %error, "request failed, skipping");
    ItemOutcome::Skipped(SkipReason::FetchFailed {
        identifier: identifier.to_string(),
        reason: error.to_string(),
    })
}
