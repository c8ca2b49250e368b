//! Picture timestamps from `Last-Modified` response headers.

use chrono::{DateTime, Local};

use crate::naming::Timestamp;

/// Parses a `Last-Modified` value into a local-time timestamp.
///
/// Accepts the three HTTP-date forms (IMF-fixdate, RFC 850, asctime), then
/// RFC 2822 and RFC 3339. Returns `None` for anything else.
#[must_use]
pub fn parse_last_modified(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(time) = httpdate::parse_http_date(value) {
        return Some(DateTime::<Local>::from(time).fixed_offset());
    }
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|parsed| parsed.with_timezone(&Local).fixed_offset())
}

/// Current wall-clock time, used when a response has no usable date.
#[must_use]
pub fn now() -> Timestamp {
    Local::now().fixed_offset()
}
