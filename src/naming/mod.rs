//! File name templates and collision-free path selection.
//!
//! A template is compiled once per run into a [`Namer`], a pure function of
//! `(identifier, timestamp, ordinal)` to a candidate path. Besides the date
//! tokens understood by [`render_date`], a template supports:
//!
//! - `f` - the picture identifier.
//! - `i...i` - a counter that starts at the first repeated name: the first
//!   picture gets nothing, the first duplicate `1`, the next `2`, and so on.
//! - `I...I` - a counter that starts at the first picture (`1`, `2`, ...).
//!
//! The number of `i`/`I` characters in a run is the minimum zero-padded width.
//! Text inside single quotes is literal and never substituted.
//!
//! ```
//! use fmpd_core::naming::Namer;
//! use chrono::DateTime;
//!
//! let namer = Namer::compile("yyyyMMddiii'.jpg'");
//! let ts = DateTime::parse_from_rfc3339("2016-05-19T10:00:00+00:00").unwrap();
//! assert_eq!(namer.render("42", &ts, 1), "20160519.jpg");
//! assert_eq!(namer.render("42", &ts, 2), "20160519001.jpg");
//! assert_eq!(namer.render("42", &ts, 3), "20160519002.jpg");
//! ```

mod collision;
mod date;

pub use collision::{NamingError, resolve_unique_path};
pub use date::{Timestamp, render_date};

use regex::{Captures, Regex};
use std::sync::LazyLock;

const QUOTE: char = '\'';

#[allow(clippy::expect_used)]
static SINCE_FIRST_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("i+").expect("ordinal regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static SINCE_FIRST_OCCURRENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("I+").expect("ordinal regex is valid") // Static pattern, safe to panic
});

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Quoted text, emitted verbatim.
    Literal(String),
    /// Unquoted text: placeholders are substituted, then date tokens expanded.
    Pattern(String),
}

/// A compiled file name template.
///
/// An `i`-run renders `ordinal - 1` (blank at ordinal 1), so the first
/// duplicate of a name is numbered `1`; an `I`-run renders the ordinal itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namer {
    segments: Vec<Segment>,
}

impl Namer {
    /// Compiles a template. Every string is a valid template.
    ///
    /// Splitting on `'` alternates between pattern and literal text. An odd
    /// number of quotes never leaves an open literal: the trailing piece is a
    /// pattern and the stray quote is kept as text in front of it.
    #[must_use]
    pub fn compile(template: &str) -> Self {
        let parts: Vec<&str> = template.split(QUOTE).collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len() + 1);

        for (idx, part) in parts.into_iter().enumerate() {
            if idx % 2 == 0 {
                segments.push(Segment::Pattern(part.to_string()));
            } else if idx == last {
                segments.push(Segment::Literal(QUOTE.to_string()));
                segments.push(Segment::Pattern(part.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Self { segments }
    }

    /// Renders the candidate path for one picture.
    ///
    /// `ordinal` is 1-based; `0` is treated as `1`.
    #[must_use]
    pub fn render(&self, identifier: &str, timestamp: &Timestamp, ordinal: u64) -> String {
        let ordinal = ordinal.max(1);
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Pattern(text) => {
                    let substituted = substitute(text, identifier, ordinal);
                    out.push_str(&render_date(timestamp, &substituted));
                }
            }
        }

        out
    }
}

/// Applies the identifier and ordinal placeholders to one pattern segment.
fn substitute(text: &str, identifier: &str, ordinal: u64) -> String {
    let with_identifier = text.replace('f', identifier);

    let with_duplicates = SINCE_FIRST_DUPLICATE.replace_all(&with_identifier, |caps: &Captures<'_>| {
        if ordinal == 1 {
            String::new()
        } else {
            pad(ordinal - 1, caps[0].len())
        }
    });

    SINCE_FIRST_OCCURRENCE
        .replace_all(&with_duplicates, |caps: &Captures<'_>| pad(ordinal, caps[0].len()))
        .into_owned()
}

fn pad(ordinal: u64, width: usize) -> String {
    format!("{ordinal:0width$}")
}
