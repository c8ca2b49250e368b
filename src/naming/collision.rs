//! Collision-free path selection for a compiled [`Namer`].

use thiserror::Error;
use tracing::{debug, trace};

use super::{Namer, Timestamp};

/// Errors produced while choosing a file name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// Every ordinal up to the configured cap produced an existing path.
    #[error("no free name for {identifier}: ordinals 1..={limit} are all taken (last tried {last_candidate})")]
    OrdinalLimit {
        /// Picture identifier being named.
        identifier: String,
        /// Highest ordinal that was tried.
        limit: u64,
        /// Candidate rendered for `limit`.
        last_candidate: String,
    },
}

/// Picks the final path for one picture.
///
/// Tries ordinal 1, 2, 3, ... and returns the first candidate for which
/// `exists` is false. When a later candidate renders identical to the first
/// one the template has no ordinal placeholder, and the first candidate is
/// returned even though it exists: the file will be overwritten.
///
/// With `max_ordinal` set, running past it returns
/// [`NamingError::OrdinalLimit`]; without it the search is unbounded.
///
/// # Errors
///
/// Only [`NamingError::OrdinalLimit`], and only when `max_ordinal` is set.
pub fn resolve_unique_path<F>(
    namer: &Namer,
    identifier: &str,
    timestamp: &Timestamp,
    max_ordinal: Option<u64>,
    mut exists: F,
) -> Result<String, NamingError>
where
    F: FnMut(&str) -> bool,
{
    let first = namer.render(identifier, timestamp, 1);
    if !exists(&first) {
        return Ok(first);
    }

    let mut ordinal: u64 = 1;
    loop {
        if let Some(limit) = max_ordinal
            && ordinal >= limit
        {
            return Err(NamingError::OrdinalLimit {
                identifier: identifier.to_string(),
                limit,
                last_candidate: namer.render(identifier, timestamp, limit),
            });
        }
        ordinal += 1;

        let candidate = namer.render(identifier, timestamp, ordinal);
        if candidate == first {
            debug!(path = %first, "name template has no ordinal; overwriting existing file");
            return Ok(first);
        }
        if !exists(&candidate) {
            return Ok(candidate);
        }
        trace!(path = %candidate, ordinal, "name taken");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::collections::HashSet;

    fn ts() -> Timestamp {
        DateTime::parse_from_rfc3339("2016-05-19T10:20:30+00:00").unwrap()
    }

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_free_first_candidate_is_returned() {
        let namer = Namer::compile("yyyyMMddi.jpg");
        let path = resolve_unique_path(&namer, "1", &ts(), None, |_| false).unwrap();
        assert_eq!(path, "20160519.jpg");
    }

    #[test]
    fn test_collision_moves_to_next_ordinal() {
        let namer = Namer::compile("yyyyMMdd iii.jpg");
        let existing = taken(&["20160519 .jpg", "20160519 001.jpg"]);
        let path = resolve_unique_path(&namer, "1", &ts(), None, |p| existing.contains(p)).unwrap();
        assert_eq!(path, "20160519 002.jpg");
    }

    #[test]
    fn test_static_template_returns_first_after_one_check() {
        let namer = Namer::compile("yyyyMMdd.jpg");
        let mut checks = 0;
        let path = resolve_unique_path(&namer, "1", &ts(), None, |_| {
            checks += 1;
            true
        })
        .unwrap();
        assert_eq!(path, "20160519.jpg");
        assert_eq!(checks, 1);
    }

    #[test]
    fn test_uppercase_ordinal_never_returns_existing_path() {
        let namer = Namer::compile("f_II");
        let existing = taken(&["7_01", "7_02", "7_03"]);
        let path = resolve_unique_path(&namer, "7", &ts(), None, |p| existing.contains(p)).unwrap();
        assert_eq!(path, "7_04");
    }

    #[test]
    fn test_ordinal_limit_reports_error() {
        let namer = Namer::compile("f_I");
        let err = resolve_unique_path(&namer, "7", &ts(), Some(3), |_| true).unwrap_err();
        assert_eq!(
            err,
            NamingError::OrdinalLimit {
                identifier: "7".to_string(),
                limit: 3,
                last_candidate: "7_3".to_string(),
            }
        );
    }

    #[test]
    fn test_ordinal_limit_not_hit_when_free_name_found() {
        let namer = Namer::compile("f_I");
        let existing = taken(&["7_1", "7_2"]);
        let path =
            resolve_unique_path(&namer, "7", &ts(), Some(3), |p| existing.contains(p)).unwrap();
        assert_eq!(path, "7_3");
    }

    #[test]
    fn test_ordinal_limit_applies_before_static_detection() {
        let namer = Namer::compile("x.jpg");
        let path = resolve_unique_path(&namer, "7", &ts(), Some(1), |_| true);
        // limit 1 means only the first candidate may be used
        assert!(path.is_err());
        let path = resolve_unique_path(&namer, "7", &ts(), Some(2), |_| true).unwrap();
        assert_eq!(path, "x.jpg");
    }
}
