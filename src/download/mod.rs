//! Fetching pictures and writing them to disk.
//!
//! This module holds the HTTP side of a run and the pipeline that drives it.
//!
//! # Features
//!
//! - One shared client carrying the run's `User-Agent` and `Cookie` headers
//! - Picture timestamps from `Last-Modified`, with a wall-clock fallback
//! - Collision-free file names via [`crate::naming`]
//! - Missing directories created on write
//! - Strictly sequential processing, in input order
//!
//! See [`DownloadEngine`] for a full example.

mod client;
mod engine;
mod error;
mod persistence;
mod timestamp;

pub use client::{FetchedResource, HttpClient};
pub use engine::{
    DownloadEngine, DownloadStats, EngineError, ItemOutcome, PipelineOptions, SkipReason,
};
pub use error::DownloadError;
pub use persistence::write_picture;
pub use timestamp::parse_last_modified;
