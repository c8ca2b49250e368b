//! Date/time pattern rendering for file name templates.
//!
//! Patterns use the token set `yyyy yy MM M dd d HH H hh h mm m ss s SSS SS S a`.
//! Text between single quotes is emitted verbatim; any other character is
//! copied through unchanged.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

/// Timestamp type every namer renders against.
pub type Timestamp = DateTime<FixedOffset>;

/// Recognised tokens, tried in order at each position (first match wins).
const TOKENS: [&str; 18] = [
    "yyyy", "yy", "MM", "M", "dd", "d", "HH", "H", "hh", "h", "mm", "m", "ss", "s", "SSS", "SS",
    "S", "a",
];

/// Expands the date/time tokens of `pattern` against `timestamp`.
#[must_use]
pub fn render_date(timestamp: &Timestamp, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str(&expand_token(timestamp, token));
            rest = &rest[token.len()..];
            continue;
        }

        if let Some(quoted) = rest.strip_prefix('\'')
            && let Some(end) = quoted.find('\'')
        {
            out.push_str(&quoted[..end]);
            rest = &quoted[end + 1..];
            continue;
        }

        // Unterminated quotes and everything else are plain text.
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

fn expand_token(ts: &Timestamp, token: &str) -> String {
    let millis = ts.timestamp_subsec_millis().min(999);
    match token {
        "yyyy" => format!("{:04}", ts.year()),
        "yy" => format!("{:02}", ts.year().rem_euclid(100)),
        "MM" => format!("{:02}", ts.month()),
        "M" => ts.month().to_string(),
        "dd" => format!("{:02}", ts.day()),
        "d" => ts.day().to_string(),
        "HH" => format!("{:02}", ts.hour()),
        "H" => ts.hour().to_string(),
        "hh" => format!("{:02}", twelve_hour(ts.hour())),
        "h" => twelve_hour(ts.hour()).to_string(),
        "mm" => format!("{:02}", ts.minute()),
        "m" => ts.minute().to_string(),
        "ss" => format!("{:02}", ts.second()),
        "s" => ts.second().to_string(),
        "SSS" => format!("{millis:03}"),
        "SS" => format!("{:02}", millis / 10),
        "S" => (millis / 100).to_string(),
        "a" => if ts.hour() >= 12 { "PM" } else { "AM" }.to_string(),
        other => other.to_string(),
    }
}

fn twelve_hour(hour: u32) -> u32 {
    if hour > 12 { hour - 12 } else { hour }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_render_date_full_date() {
        let t = ts("2016-05-19T08:04:09.123+00:00");
        assert_eq!(render_date(&t, "yyyyMMdd"), "20160519");
        assert_eq!(render_date(&t, "yy-M-d"), "16-5-19");
        assert_eq!(render_date(&t, "HH:mm:ss.SSS"), "08:04:09.123");
        assert_eq!(render_date(&t, "H:m:s"), "8:4:9");
    }

    #[test]
    fn test_render_date_twelve_hour_clock() {
        assert_eq!(render_date(&ts("2020-01-01T15:00:00+00:00"), "hh a"), "03 PM");
        assert_eq!(render_date(&ts("2020-01-01T12:30:00+00:00"), "h a"), "12 PM");
        assert_eq!(render_date(&ts("2020-01-01T00:30:00+00:00"), "h a"), "0 AM");
    }

    #[test]
    fn test_render_date_fractional_precision() {
        let t = ts("2020-01-01T00:00:00.987+00:00");
        assert_eq!(render_date(&t, "SS"), "98");
        assert_eq!(render_date(&t, "S"), "9");
    }

    #[test]
    fn test_render_date_quoted_text_is_verbatim() {
        let t = ts("2020-01-01T00:00:00+00:00");
        assert_eq!(render_date(&t, "'yyyy'yyyy"), "yyyy2020");
        assert_eq!(render_date(&t, "''"), "");
    }

    #[test]
    fn test_render_date_unterminated_quote_is_literal() {
        let t = ts("2020-01-01T00:00:00+00:00");
        assert_eq!(render_date(&t, "x'yy"), "x'20");
    }

    #[test]
    fn test_render_date_passes_unknown_characters() {
        let t = ts("2020-01-01T00:00:00+00:00");
        assert_eq!(render_date(&t, "x_123.jpg"), "x_123.jpg");
        // "h" is a token even inside words
        assert_eq!(render_date(&t, "photo"), "p0oto");
        // "yyy" is "yy" followed by a lone "y"
        assert_eq!(render_date(&t, "yyy"), "20y");
    }

    #[test]
    fn test_render_date_uses_timestamp_offset() {
        let t = ts("2020-01-01T23:30:00-05:00");
        assert_eq!(render_date(&t, "yyyyMMdd HH"), "20200101 23");
    }
}
