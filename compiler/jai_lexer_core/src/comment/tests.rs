use proptest::prelude::*;

use super::*;
use crate::SourceBuffer;

fn scan_block(source: &str) -> (BlockCommentEnd, u32) {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let end = block_comment(&mut cursor);
    (end, cursor.pos())
}

fn scan_line(source: &str) -> u32 {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    line_comment(&mut cursor);
    cursor.pos()
}

#[test]
fn simple_block_comment() {
    assert_eq!(scan_block("/* a */ x"), (BlockCommentEnd::Terminated, 7));
}

#[test]
fn nested_block_comment_spans_whole_text() {
    let source = "/* a /* b */ c */";
    assert_eq!(scan_block(source), (BlockCommentEnd::Terminated, 17));
}

#[test]
fn deeply_nested_block_comment() {
    let source = format!("{}{}", "/*".repeat(50), "*/".repeat(50));
    assert_eq!(scan_block(&source).0, BlockCommentEnd::Terminated);
    assert_eq!(scan_block(&source).1 as usize, source.len());
}

#[test]
fn unterminated_block_comment_reports_depth() {
    assert_eq!(
        scan_block("/* a /* b */"),
        (BlockCommentEnd::Unterminated { depth: 1 }, 12)
    );
    assert_eq!(
        scan_block("/* /* /*"),
        (BlockCommentEnd::Unterminated { depth: 3 }, 8)
    );
}

#[test]
fn lone_stars_and_slashes_inside() {
    assert_eq!(scan_block("/* a * b / c **/"), (BlockCommentEnd::Terminated, 16));
}

#[test]
fn opener_does_not_overlap_closer() {
    // `/*/` opens once, then `/` is plain text.
    assert_eq!(
        scan_block("/*/"),
        (BlockCommentEnd::Unterminated { depth: 1 }, 3)
    );
}

#[test]
fn line_comment_stops_before_newline() {
    assert_eq!(scan_line("// hi\nx"), 5);
}

#[test]
fn line_comment_to_eof() {
    assert_eq!(scan_line("// hi"), 5);
}

#[test]
fn backslash_continues_line_comment() {
    assert_eq!(scan_line("// a \\\nb\nc"), 8);
    assert_eq!(scan_line("// a \\\r\nb\nc"), 9);
}

#[test]
fn backslash_run_escapes_one_character() {
    // The run `\\` swallows the newline, so the comment continues.
    assert_eq!(scan_line("// \\\\\nb\nc"), 7);
    // An escaped ordinary character does not extend past the line.
    assert_eq!(scan_line("// \\x y\nz"), 7);
}

#[test]
fn trailing_backslash_at_eof() {
    assert_eq!(scan_line("// \\"), 4);
}

proptest! {
    #[test]
    fn block_comment_never_overruns(body in "[/* a\n]{0,40}") {
        let source = format!("/*{body}");
        let (end, pos) = scan_block(&source);
        prop_assert!(pos as usize <= source.len());
        if let BlockCommentEnd::Unterminated { .. } = end {
            prop_assert_eq!(pos as usize, source.len());
        }
    }

    #[test]
    fn balanced_nesting_terminates(depth in 1usize..20, filler in "[a-z ]{0,5}") {
        let source = format!(
            "{}{}{}",
            format!("/*{filler}").repeat(depth),
            format!("{filler}*/").repeat(depth),
            "tail"
        );
        let (end, pos) = scan_block(&source);
        prop_assert_eq!(end, BlockCommentEnd::Terminated);
        prop_assert_eq!(pos as usize, source.len() - 4);
    }

    #[test]
    fn line_comment_never_overruns(body in "[a\\\\\n\r ]{0,40}") {
        let source = format!("//{body}");
        let pos = scan_line(&source) as usize;
        prop_assert!(pos <= source.len());
        prop_assert!(pos == source.len() || source.as_bytes()[pos] == b'\n');
    }
}
