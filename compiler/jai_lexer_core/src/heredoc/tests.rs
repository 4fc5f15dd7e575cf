use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::SourceBuffer;

/// Run both phases on text that follows `#string`.
/// Returns (delimiter, body, terminated).
fn scan(src: &str) -> Option<(&str, &str, bool)> {
    let buf = SourceBuffer::new(src);
    let mut cursor = buf.cursor();
    let delim = heredoc_delimiter(&mut cursor)?;
    let delimiter = &src[delim.start as usize..delim.end as usize];
    let body_start = cursor.pos() as usize;
    let result = heredoc_body(&mut cursor, delimiter.as_bytes());
    Some((delimiter, &src[body_start..cursor.pos() as usize], result.terminated))
}

#[test]
fn simple_heredoc() {
    assert_eq!(
        scan(" END\nhello\nworld\nEND;"),
        Some(("END", "\nhello\nworld\n", true))
    );
}

#[test]
fn indented_terminator_keeps_indent_in_body() {
    assert_eq!(
        scan(" DONE\n    text\n    DONE"),
        Some(("DONE", "\n    text\n    ", true))
    );
}

#[test]
fn delimiter_prefix_of_identifier_does_not_close() {
    assert_eq!(
        scan(" END\nENDING\nEND\n"),
        Some(("END", "\nENDING\n", true))
    );
}

#[test]
fn delimiter_mid_line_does_not_close() {
    assert_eq!(scan(" EOF\nnot EOF here\n"), Some(("EOF", "\nnot EOF here\n", false)));
}

#[test]
fn crlf_lines() {
    assert_eq!(scan(" X\r\na\r\nX\r\n"), Some(("X", "\r\na\r\n", true)));
}

#[test]
fn missing_delimiter() {
    let buf = SourceBuffer::new("   \nbody");
    let mut cursor = buf.cursor();
    assert_eq!(heredoc_delimiter(&mut cursor), None);
    assert_eq!(cursor.pos(), 3);

    let buf = SourceBuffer::new("");
    assert_eq!(heredoc_delimiter(&mut buf.cursor()), None);
}

#[test]
fn unterminated_runs_to_eof() {
    assert_eq!(scan(" END\nabc\n  END2"), Some(("END", "\nabc\n  END2", false)));
}

proptest! {
    #[test]
    fn terminated_body_stops_on_delimiter(body in "[a-zE \n]{0,40}") {
        let src = format!(" END\n{body}");
        let Some((delimiter, scanned, terminated)) = scan(&src) else {
            return Err(TestCaseError::fail("delimiter not found"));
        };
        prop_assert_eq!(delimiter, "END");
        let rest = &src[4 + scanned.len()..];
        if terminated {
            prop_assert!(rest.starts_with("END"));
        } else {
            prop_assert!(rest.is_empty());
        }
    }
}
