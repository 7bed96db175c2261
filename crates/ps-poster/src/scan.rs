//! Header scan of the input document
//!
//! One forward pass over the structuring comments at the top of the input:
//! - picks up `%%BoundingBox:` unless it is deferred with `(atend)`
//! - tracks `%%BeginDocument`/`%%BeginData` nesting so that embedded
//!   documents do not count as top-level structure
//! - collects `%%Document...` property lines (with their `%%+`
//!   continuations) to be repeated in the output header
//!
//! The scan stops at the first body line or at `%%EndComments`. When a
//! value was deferred it keeps reading, which lets a `%%Trailer` section
//! supply the deferred bounding box.

use crate::types::{BBox, Result};
use std::io::BufRead;

/// What the header scan found
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderScan {
    /// Declared bounding box, if one was found and could be read
    pub bounding_box: Option<BBox>,
    /// Property comment lines to forward, without line terminators
    pub forwarded: Vec<Vec<u8>>,
}

/// Where the scanner is relative to the document structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Body,
    Trailer,
}

/// Line-by-line state machine behind [`scan_header`]
#[derive(Debug)]
struct HeaderScanner {
    section: Section,
    /// Nesting of embedded documents and data blocks; may go negative on
    /// unbalanced input, which blocks all further matching
    depth: i32,
    /// A property was marked `(atend)`
    deferred: bool,
    /// The previous line was forwarded, so `%%+` lines follow it
    continuation: bool,
    done: bool,
    result: HeaderScan,
}

impl HeaderScanner {
    fn new() -> Self {
        Self {
            section: Section::Header,
            depth: 0,
            deferred: false,
            continuation: false,
            done: false,
            result: HeaderScan::default(),
        }
    }

    /// Structure is only honoured at top level and outside the body
    fn at_top_level(&self) -> bool {
        self.depth == 0 && self.section != Section::Body
    }

    fn end_header(&mut self) {
        if !self.deferred {
            self.done = true;
        }
    }

    fn feed(&mut self, line: &[u8]) {
        if !line.starts_with(b"%") {
            self.continuation = false;
            if self.section == Section::Header {
                self.section = Section::Body;
            }
            self.end_header();
            return;
        }

        if line.starts_with(b"%%+") && self.continuation {
            self.result.forwarded.push(line.to_vec());
            return;
        }
        self.continuation = false;

        if line.starts_with(b"%%EndComments") {
            self.section = Section::Body;
            self.end_header();
        } else if line.starts_with(b"%%BeginDocument") || line.starts_with(b"%%BeginData") {
            self.depth += 1;
        } else if line.starts_with(b"%%EndDocument") || line.starts_with(b"%%EndData") {
            self.depth -= 1;
        } else if line.starts_with(b"%%Trailer") && self.depth == 0 {
            self.section = Section::Trailer;
        } else if let Some(value) = line.strip_prefix(b"%%BoundingBox:") {
            if self.at_top_level() {
                self.bounding_box(value);
            }
        } else if let Some(rest) = line.strip_prefix(b"%%Document") {
            if self.at_top_level() {
                self.document_property(line, rest);
            }
        }
    }

    fn bounding_box(&mut self, value: &[u8]) {
        let value = trim_leading_blanks(value);
        if value.starts_with(b"(atend)") {
            self.deferred = true;
            return;
        }
        match parse_four_numbers(value) {
            Some(bbox) => self.result.bounding_box = Some(bbox),
            None => log::warn!(
                "Ignoring unreadable %%BoundingBox: {}",
                String::from_utf8_lossy(value)
            ),
        }
    }

    /// `rest` follows `%%Document`: the remainder of the keyword, blanks,
    /// then the value
    fn document_property(&mut self, line: &[u8], rest: &[u8]) {
        let keyword_len = rest
            .iter()
            .position(|&b| b == b' ' || b == b'\t')
            .unwrap_or(rest.len());
        let value = trim_leading_blanks(&rest[keyword_len..]);
        if value.starts_with(b"(atend)") {
            self.deferred = true;
        } else {
            self.result.forwarded.push(line.to_vec());
            self.continuation = true;
        }
    }
}

fn trim_leading_blanks(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn parse_four_numbers(value: &[u8]) -> Option<BBox> {
    let text = std::str::from_utf8(value).ok()?;
    let mut numbers = text.split_ascii_whitespace().map(str::parse::<f64>);
    let mut next = || numbers.next()?.ok();
    Some(BBox::new(next()?, next()?, next()?, next()?))
}

/// Scan the header of a document for its bounding box and the property
/// comments worth forwarding.
///
/// Lines are split on `\n`; a trailing `\r` stays part of the line.
pub fn scan_header<R: BufRead>(mut reader: R) -> Result<HeaderScan> {
    let mut scanner = HeaderScanner::new();
    let mut line = Vec::new();

    while !scanner.done {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        scanner.feed(&line);
    }

    if let Some(bbox) = &scanner.result.bounding_box {
        log::debug!(
            "Found %%BoundingBox: {} {} {} {}",
            bbox.x0,
            bbox.y0,
            bbox.x1,
            bbox.y1
        );
    }
    Ok(scanner.result)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> HeaderScan {
        scan_header(text.as_bytes()).unwrap()
    }

    fn forwarded(scan: &HeaderScan) -> Vec<String> {
        scan.forwarded
            .iter()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    #[test]
    fn test_bounding_box() {
        let result = scan("%!PS-Adobe-3.0\n%%BoundingBox: 10 20 110 220\n%%EndComments\nshowpage\n");
        assert_eq!(result.bounding_box, Some(BBox::new(10.0, 20.0, 110.0, 220.0)));
        assert!(result.forwarded.is_empty());
    }

    #[test]
    fn test_fractional_bounding_box_with_tabs() {
        let result = scan("%%BoundingBox:\t0 0.5 99.5 100\n");
        assert_eq!(result.bounding_box, Some(BBox::new(0.0, 0.5, 99.5, 100.0)));
    }

    #[test]
    fn test_missing_bounding_box() {
        let result = scan("%!PS\nnewpath\n%%BoundingBox: 0 0 1 1\n");
        assert_eq!(result.bounding_box, None);
    }

    #[test]
    fn test_stops_at_end_comments() {
        let result = scan("%%EndComments\n%%BoundingBox: 0 0 5 5\n");
        assert_eq!(result.bounding_box, None);
    }

    #[test]
    fn test_embedded_document_is_skipped() {
        let text = "%!PS\n\
                    %%BeginDocument: inner.eps\n\
                    %%BoundingBox: 0 0 5 5\n\
                    %%DocumentFonts: Inner\n\
                    %%EndDocument\n\
                    %%BoundingBox: 0 0 50 60\n";
        let result = scan(text);
        assert_eq!(result.bounding_box, Some(BBox::new(0.0, 0.0, 50.0, 60.0)));
        assert!(result.forwarded.is_empty());
    }

    #[test]
    fn test_forwards_document_properties_with_continuations() {
        let text = "%!PS-Adobe-3.0\n\
                    %%DocumentFonts: Times-Roman\n\
                    %%+ Helvetica\n\
                    %%Title: not forwarded\n\
                    %%+ stray continuation\n\
                    %%DocumentNeededResources: font Courier\n\
                    %%EndComments\n";
        let result = scan(text);
        assert_eq!(
            forwarded(&result),
            vec![
                "%%DocumentFonts: Times-Roman",
                "%%+ Helvetica",
                "%%DocumentNeededResources: font Courier",
            ]
        );
    }

    #[test]
    fn test_atend_resolved_in_trailer() {
        let text = "%!PS\n\
                    %%BoundingBox: (atend)\n\
                    %%EndComments\n\
                    0 0 moveto\n\
                    %%BoundingBox: 1 1 2 2\n\
                    %%Trailer\n\
                    %%BoundingBox: 0 0 300 400\n\
                    %%EOF\n";
        let result = scan(text);
        // the body line is ignored, the trailer one wins
        assert_eq!(result.bounding_box, Some(BBox::new(0.0, 0.0, 300.0, 400.0)));
    }

    #[test]
    fn test_atend_never_resolved() {
        let text = "%%BoundingBox: (atend)\n%%EndComments\nshowpage\n";
        assert_eq!(scan(text).bounding_box, None);
    }

    #[test]
    fn test_deferred_property_is_not_forwarded() {
        let text = "%%DocumentFonts: (atend)\n%%EndComments\n";
        assert!(scan(text).forwarded.is_empty());
    }

    #[test]
    fn test_unreadable_bounding_box() {
        let result = scan("%%BoundingBox: 0 0 wide tall\n%%EndComments\n");
        assert_eq!(result.bounding_box, None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(scan(""), HeaderScan::default());
    }
}
