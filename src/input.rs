//! Identifier sources.
//!
//! Identifiers come from the command line, optionally followed by standard
//! input read line by line. The combined source is a lazy stream: stdin may be
//! interactive or unbounded, so lines are only read as the engine asks for them.

use std::io;

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Positional argument that enables reading identifiers from stdin.
pub const STDIN_MARKER: &str = "-";

/// Trims a raw line and filters out blanks and `#` comments.
///
/// ```
/// use fmpd_core::input::normalize_identifier;
///
/// assert_eq!(normalize_identifier("  10150 \n"), Some("10150"));
/// assert_eq!(normalize_identifier("# holiday album"), None);
/// assert_eq!(normalize_identifier("   "), None);
/// ```
#[must_use]
pub fn normalize_identifier(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// Removes every `-` marker from the positional arguments.
///
/// Returns the remaining identifiers and whether stdin should be read.
#[must_use]
pub fn split_stdin_marker(args: Vec<String>) -> (Vec<String>, bool) {
    let before = args.len();
    let identifiers: Vec<String> = args.into_iter().filter(|arg| arg != STDIN_MARKER).collect();
    let read_stdin = identifiers.len() != before;
    (identifiers, read_stdin)
}

/// Yields the positional identifiers, then every line of `tail` (if any).
///
/// Lines are yielded raw; filtering happens per item in the engine.
pub fn identifier_stream<R>(
    positional: Vec<String>,
    tail: Option<R>,
) -> BoxStream<'static, io::Result<String>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let head = stream::iter(positional.into_iter().map(Ok));
    match tail {
        Some(reader) => head.chain(line_stream(reader)).boxed(),
        None => head.boxed(),
    }
}

/// Lazily reads lines from `reader`; ends after EOF or the first I/O error.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so one
/// garbled line becomes a bad identifier instead of ending the source.
fn line_stream<R>(reader: R) -> impl futures_util::Stream<Item = io::Result<String>> + Send
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    stream::unfold(Some(reader), |state| async move {
        let mut reader = state?;
        let mut raw = Vec::new();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) => None,
            Ok(_) => Some((Ok(decode_line(&raw)), Some(reader))),
            Err(error) => Some((Err(error), None)),
        }
    })
}

/// Decodes one raw line, dropping the `\n` / `\r\n` terminator.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Stream over the positional identifiers and, if requested, stdin.
#[must_use]
pub fn cli_identifiers(args: Vec<String>) -> BoxStream<'static, io::Result<String>> {
    let (positional, read_stdin) = split_stdin_marker(args);
    let stdin = read_stdin.then(|| tokio::io::BufReader::new(tokio::io::stdin()));
    identifier_stream(positional, stdin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    async fn collect(stream: BoxStream<'static, io::Result<String>>) -> Vec<String> {
        stream.map(|line| line.unwrap()).collect().await
    }

    #[test]
    fn test_normalize_skips_blank_and_comments() {
        assert_eq!(normalize_identifier(""), None);
        assert_eq!(normalize_identifier("# note"), None);
        assert_eq!(normalize_identifier("   #indented comment"), None);
        assert_eq!(normalize_identifier("\t42\r"), Some("42"));
    }

    #[test]
    fn test_split_stdin_marker_removes_all_markers() {
        let args = vec!["1".to_string(), "-".to_string(), "2".to_string(), "-".to_string()];
        let (ids, read_stdin) = split_stdin_marker(args);
        assert_eq!(ids, vec!["1", "2"]);
        assert!(read_stdin);
    }

    #[test]
    fn test_split_stdin_marker_absent() {
        let (ids, read_stdin) = split_stdin_marker(vec!["1".to_string()]);
        assert_eq!(ids, vec!["1"]);
        assert!(!read_stdin);
    }

    #[tokio::test]
    async fn test_identifier_stream_positional_then_tail() {
        let tail = Cursor::new(b"3\n# c\n4\n".to_vec());
        let stream = identifier_stream(vec!["1".to_string(), "2".to_string()], Some(tail));
        assert_eq!(collect(stream).await, vec!["1", "2", "3", "# c", "4"]);
    }

    #[tokio::test]
    async fn test_identifier_stream_survives_invalid_utf8() {
        let tail = Cursor::new(b"\xff\xfe\n111\r\n222".to_vec());
        let lines = collect(identifier_stream(vec![], Some(tail))).await;
        assert_eq!(lines, vec!["\u{FFFD}\u{FFFD}", "111", "222"]);
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"42\r\n"), "42");
        assert_eq!(decode_line(b"42\n"), "42");
        assert_eq!(decode_line(b"42"), "42");
        assert_eq!(decode_line(b"a\rb\n"), "a\rb");
    }

    #[tokio::test]
    async fn test_identifier_stream_without_tail() {
        let stream = identifier_stream::<Cursor<Vec<u8>>>(vec!["9".to_string()], None);
        assert_eq!(collect(stream).await, vec!["9"]);
    }

    #[tokio::test]
    async fn test_identifier_stream_reads_lazily() {
        let (client, server) = tokio::io::duplex(64);
        let mut stream = identifier_stream(vec![], Some(tokio::io::BufReader::new(server)));
        let mut writer = client;

        tokio::io::AsyncWriteExt::write_all(&mut writer, b"first\n").await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), "first");

        tokio::io::AsyncWriteExt::write_all(&mut writer, b"second\n").await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), "second");

        drop(writer);
        assert!(stream.next().await.is_none());
    }
}
