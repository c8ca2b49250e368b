//! fmpd Core Library
//!
//! This library downloads pictures from a photo host by identifier and saves
//! them under names built from a user template, without ever overwriting a
//! file that a template can disambiguate.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - Netscape cookie jar reading
//! - [`naming`] - Name template compiler and collision resolver
//! - [`resolver`] - Identifier to download link resolution
//! - [`download`] - HTTP client, storage writes and the sequential pipeline
//! - [`input`] - Identifier normalization and lazy identifier sources

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod download;
pub mod input;
pub mod naming;
pub mod resolver;
pub mod user_agent;

// Re-export commonly used types
pub use auth::{CookieError, CookieHeader, read_cookie_header};
pub use download::{
    DownloadEngine, DownloadError, DownloadStats, EngineError, HttpClient, ItemOutcome,
    PipelineOptions, SkipReason,
};
pub use naming::{Namer, NamingError, resolve_unique_path};
pub use resolver::{PhotoPageResolver, RedirectResolver, ResolveError};
