//! Re-streaming of the document body into one tile

use crate::constants::{COMMENT_MARKER, END_OF_TRANSMISSION};
use std::io::{self, BufRead, Write};

/// Copy the document body, dropping comment lines.
///
/// One line of lookahead tells the last line apart: only that line is
/// searched for a trailing Ctrl-D, which is cut off together with anything
/// after it. Returns whether the Ctrl-D was found, so the caller can emit
/// it once at the very end of the output.
pub fn copy_body<R: BufRead, W: Write + ?Sized>(mut reader: R, out: &mut W) -> io::Result<bool> {
    let mut current = Vec::new();
    let mut next = Vec::new();

    if reader.read_until(b'\n', &mut current)? == 0 {
        return Ok(false);
    }

    loop {
        next.clear();
        if reader.read_until(b'\n', &mut next)? == 0 {
            break;
        }
        write_unless_comment(out, &current)?;
        std::mem::swap(&mut current, &mut next);
    }

    let mut found = false;
    if let Some(at) = current.iter().position(|&b| b == END_OF_TRANSMISSION) {
        current.truncate(at);
        found = true;
    }
    if !current.is_empty() {
        write_unless_comment(out, &current)?;
    }
    Ok(found)
}

/// Comment lines are previewer hints; repeated per tile they would break
/// the structure of the output document
fn write_unless_comment<W: Write + ?Sized>(out: &mut W, line: &[u8]) -> io::Result<()> {
    if line.first() != Some(&COMMENT_MARKER) {
        out.write_all(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(input: &[u8]) -> (Vec<u8>, bool) {
        let mut out = Vec::new();
        let found = copy_body(input, &mut out).unwrap();
        (out, found)
    }

    #[test]
    fn test_comments_are_dropped() {
        let (out, found) = copy(b"%!PS\nnewpath\n%%Page: 1 1\n0 0 moveto\nshowpage\n");
        assert_eq!(out, b"newpath\n0 0 moveto\nshowpage\n");
        assert!(!found);
    }

    #[test]
    fn test_trailing_control_byte_is_removed() {
        let (out, found) = copy(b"newpath\nshowpage\n\x04");
        assert_eq!(out, b"newpath\nshowpage\n");
        assert!(found);
    }

    #[test]
    fn test_control_byte_on_last_text_line() {
        let (out, found) = copy(b"newpath\nshowpage\x04garbage");
        assert_eq!(out, b"newpath\nshowpage");
        assert!(found);
    }

    #[test]
    fn test_control_byte_before_last_line_is_kept() {
        let (out, found) = copy(b"binary\x04data\nshowpage\n");
        assert_eq!(out, b"binary\x04data\nshowpage\n");
        assert!(!found);
    }

    #[test]
    fn test_last_line_without_newline() {
        let (out, _) = copy(b"a\nb");
        assert_eq!(out, b"a\nb");
    }

    #[test]
    fn test_last_comment_line_with_control_byte() {
        let (out, found) = copy(b"a\n%%EOF\n\x04");
        assert_eq!(out, b"a\n");
        assert!(found);
    }

    #[test]
    fn test_empty_input() {
        let (out, found) = copy(b"");
        assert!(out.is_empty());
        assert!(!found);
    }
}
