//! Box and margin specification parsing
//!
//! A box spec has the form `[multiplier][offset]unit`:
//! - multiplier: `NUMBERxNUMBER` or `NUMBER*NUMBER` (default `1x1`)
//! - offset: `+NUMBER,NUMBER` (default `0,0`)
//! - unit: a name from [`UNIT_TABLE`](crate::units::UNIT_TABLE), abbreviated
//!   to any unique case-insensitive prefix
//!
//! Examples: `A4`, `3x3letter`, `10x25cm`, `200x200+10,10p`.
//!
//! A margin spec is `0`, `NUMBER%` (of the media size) or a box spec whose
//! upper-right corner gives the horizontal and vertical margin.

use crate::types::{BBox, Margin};
use crate::units::{UnitLookupError, lookup_unit, unit_names};
use std::fmt;

/// Grammar summary shown with syntax errors
const BOX_GRAMMAR: &str = "[multiplier][offset]unit, \
     with multiplier NUMBERxNUMBER, offset +NUMBER,NUMBER";

/// What went wrong while parsing a spec
#[derive(Debug, Clone, PartialEq)]
pub enum SpecErrorKind {
    /// The text does not follow the grammar
    Syntax { expected: &'static str },
    /// Nothing left for the unit name
    MissingUnit,
    /// No unit starts with the given name
    UnrecognizedUnit,
    /// Several units start with the given name
    AmbiguousUnit { candidates: Vec<&'static str> },
    /// A coordinate came out negative
    NegativeBox,
    /// Width or height is zero or negative
    EmptyBox,
    /// A margin is negative or not below half the media size
    MarginOutOfRange { value: f64 },
}

/// A spec that could not be turned into a box or margin
#[derive(Debug, Clone, PartialEq)]
pub struct SpecError {
    pub kind: SpecErrorKind,
    /// The complete spec as given by the user
    pub input: String,
    /// Byte offset into `input` where parsing stopped
    pub position: usize,
}

impl SpecError {
    fn new(kind: SpecErrorKind, input: &str, position: usize) -> Self {
        Self {
            kind,
            input: input.to_string(),
            position,
        }
    }
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SpecErrorKind::Syntax { expected } => {
                write!(
                    f,
                    "I don't understand your box specification '{}' (expected {} at offset {})",
                    self.input, expected, self.position
                )?;
                write_grammar_help(f)
            }
            SpecErrorKind::MissingUnit => {
                write!(f, "Box specification '{}' lacks a unit", self.input)?;
                write_grammar_help(f)
            }
            SpecErrorKind::UnrecognizedUnit => {
                write!(
                    f,
                    "Unknown unit '{}' in box specification '{}'",
                    &self.input[self.position..],
                    self.input
                )?;
                write_grammar_help(f)
            }
            SpecErrorKind::AmbiguousUnit { candidates } => write!(
                f,
                "Your box spec '{}' is not unique! (give more chars; matches {})",
                &self.input[self.position..],
                candidates.join(", ")
            ),
            SpecErrorKind::NegativeBox => write!(
                f,
                "Your specification '{}' leads to negative values!",
                self.input
            ),
            SpecErrorKind::EmptyBox => write!(
                f,
                "Your specification '{}' leads to an empty box!",
                self.input
            ),
            SpecErrorKind::MarginOutOfRange { value } => write!(
                f,
                "Margin value '{}' out of range! ({} is not below half the media size)",
                self.input, value
            ),
        }
    }
}

impl std::error::Error for SpecError {}

fn write_grammar_help(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\nThe proper format is: {}\nwith unit one of:", BOX_GRAMMAR)?;
    for (i, name) in unit_names().enumerate() {
        if i % 7 == 0 {
            write!(f, "\n ")?;
        }
        write!(f, " {:<10}", name)?;
    }
    write!(
        f,
        "\nYou can use a shorthand for these unit names, provided it resolves unique."
    )
}

// =============================================================================
// Box Specs
// =============================================================================

/// Parse a box spec into PostScript units.
///
/// The result is `(offset.x*unit.x, offset.y*unit.y, mult.x*unit.x, mult.y*unit.y)`
/// and must have a non-negative lower-left corner and a positive size.
pub fn parse_box(spec: &str) -> Result<BBox, SpecError> {
    let bbox = convert_box(spec)?;

    if bbox.x0 < 0.0 || bbox.y0 < 0.0 || bbox.x1 < 0.0 || bbox.y1 < 0.0 {
        return Err(SpecError::new(SpecErrorKind::NegativeBox, spec, 0));
    }
    if !bbox.has_positive_size() {
        return Err(SpecError::new(SpecErrorKind::EmptyBox, spec, 0));
    }

    Ok(bbox)
}

/// Apply the box grammar without judging the resulting geometry
fn convert_box(spec: &str) -> Result<BBox, SpecError> {
    let mut cursor = Cursor::new(spec);

    let (mx, my) = if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
        let mx = cursor.number()?;
        if !cursor.eat(b'x') && !cursor.eat(b'*') {
            return Err(SpecError::new(
                SpecErrorKind::Syntax {
                    expected: "'x' or '*' after the first multiplier",
                },
                spec,
                cursor.pos,
            ));
        }
        let my = cursor.number()?;
        (mx, my)
    } else {
        (1.0, 1.0)
    };

    let (ox, oy) = if cursor.eat(b'+') {
        let ox = cursor.signed_number()?;
        if !cursor.eat(b',') {
            return Err(SpecError::new(
                SpecErrorKind::Syntax {
                    expected: "',' between the offset values",
                },
                spec,
                cursor.pos,
            ));
        }
        let oy = cursor.signed_number()?;
        (ox, oy)
    } else {
        (0.0, 0.0)
    };

    let unit_start = cursor.pos;
    let unit_name = cursor.rest();
    if unit_name.is_empty() {
        return Err(SpecError::new(SpecErrorKind::MissingUnit, spec, unit_start));
    }
    let unit = lookup_unit(unit_name).map_err(|err| {
        let kind = match err {
            UnitLookupError::Unrecognized => SpecErrorKind::UnrecognizedUnit,
            UnitLookupError::Ambiguous(candidates) => SpecErrorKind::AmbiguousUnit { candidates },
        };
        SpecError::new(kind, spec, unit_start)
    })?;

    let bbox = BBox::new(
        ox * unit.width,
        oy * unit.height,
        mx * unit.width,
        my * unit.height,
    );
    log::debug!(
        "Box spec '{}' is [{}, {}, {}, {}]",
        spec,
        bbox.x0,
        bbox.y0,
        bbox.x1,
        bbox.y1
    );

    Ok(bbox)
}

// =============================================================================
// Margin Specs
// =============================================================================

/// Parse a margin spec against the media it applies to.
///
/// Each resulting value must lie in `[0, media extent / 2)`.
pub fn parse_margin(spec: &str, media: &BBox) -> Result<Margin, SpecError> {
    let margin = if spec.trim().parse::<f64>().is_ok_and(|v| v == 0.0) {
        Margin::zero()
    } else if let Some(percent) = spec.strip_suffix('%') {
        let value: f64 = percent.trim().parse().map_err(|_| {
            SpecError::new(
                SpecErrorKind::Syntax {
                    expected: "a number before '%'",
                },
                spec,
                0,
            )
        })?;
        Margin::new(
            0.01 * value * media.width(),
            0.01 * value * media.height(),
        )
    } else {
        let bbox = convert_box(spec)?;
        Margin::new(bbox.x1, bbox.y1)
    };

    for (value, extent) in [
        (margin.horizontal, media.width()),
        (margin.vertical, media.height()),
    ] {
        if value.is_nan() || value < 0.0 || 2.0 * value >= extent {
            return Err(SpecError::new(
                SpecErrorKind::MarginOutOfRange { value },
                spec,
                0,
            ));
        }
    }

    Ok(margin)
}

// =============================================================================
// Scanner
// =============================================================================

struct Cursor<'a> {
    bytes: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            text,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// `digits [. digits]` or `. digits`
    fn number(&mut self) -> Result<f64, SpecError> {
        let start = self.pos;
        let mut count = self.digits();
        if self.eat(b'.') {
            count += self.digits();
        }
        if count == 0 {
            self.pos = start;
            return Err(SpecError::new(
                SpecErrorKind::Syntax {
                    expected: "a number",
                },
                self.text,
                start,
            ));
        }
        self.text[start..self.pos].parse().map_err(|_| {
            SpecError::new(
                SpecErrorKind::Syntax {
                    expected: "a number",
                },
                self.text,
                start,
            )
        })
    }

    fn signed_number(&mut self) -> Result<f64, SpecError> {
        if self.eat(b'-') {
            Ok(-self.number()?)
        } else {
            self.eat(b'+');
            self.number()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_plain_unit() {
        assert_eq!(parse_box("A4").unwrap(), BBox::new(0.0, 0.0, 595.0, 842.0));
        assert_eq!(parse_box("letter").unwrap(), BBox::new(0.0, 0.0, 612.0, 792.0));
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(parse_box("3x3letter").unwrap(), BBox::new(0.0, 0.0, 1836.0, 2376.0));
        assert_eq!(parse_box("2*4i").unwrap(), BBox::new(0.0, 0.0, 144.0, 288.0));

        let cm = parse_box("10x25cm").unwrap();
        assert!(approx(cm.x1, 283.465));
        assert!(approx(cm.y1, 708.6625));
    }

    #[test]
    fn test_decimal_multiplier() {
        let b = parse_box("1.5x.5p").unwrap();
        assert_eq!(b, BBox::new(0.0, 0.0, 1.5, 0.5));
    }

    #[test]
    fn test_offset() {
        let b = parse_box("200x200+10,10p").unwrap();
        assert_eq!(b, BBox::new(10.0, 10.0, 200.0, 200.0));
    }

    #[test]
    fn test_offset_with_inches() {
        let b = parse_box("3x4+1,2i").unwrap();
        assert_eq!(b, BBox::new(72.0, 144.0, 216.0, 288.0));

        // the default 1x1 multiplier leaves no room past a unit offset
        let err = parse_box("+1,1i").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::EmptyBox);
    }

    #[test]
    fn test_missing_second_multiplier() {
        let err = parse_box("4A4").unwrap_err();
        assert!(matches!(err.kind, SpecErrorKind::Syntax { .. }));
        assert_eq!(err.position, 1);
        assert_eq!(err.input, "4A4");

        let err = parse_box("4xA4").unwrap_err();
        assert!(matches!(err.kind, SpecErrorKind::Syntax { .. }));
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_bad_offset() {
        let err = parse_box("+10p").unwrap_err();
        assert!(matches!(err.kind, SpecErrorKind::Syntax { .. }));
        assert_eq!(err.position, 3);
    }

    #[test]
    fn test_missing_unit() {
        let err = parse_box("3x3").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::MissingUnit);
        assert_eq!(err.position, 3);
    }

    #[test]
    fn test_unknown_and_ambiguous_units() {
        let err = parse_box("2x2parsec").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::UnrecognizedUnit);
        assert_eq!(err.position, 3);
        assert!(err.to_string().contains("parsec"));

        let err = parse_box("A").unwrap_err();
        assert!(matches!(err.kind, SpecErrorKind::AmbiguousUnit { .. }));
        assert!(err.to_string().contains("not unique"));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = parse_box("+-1,0A4").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::NegativeBox);
    }

    #[test]
    fn test_collapsed_box_rejected() {
        let err = parse_box("0x10cm").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::EmptyBox);

        // offset beyond the upper-right corner
        let err = parse_box("10x10+20,0p").unwrap_err();
        assert_eq!(err.kind, SpecErrorKind::EmptyBox);
    }

    #[test]
    fn test_syntax_error_lists_units() {
        let message = parse_box("4A4").unwrap_err().to_string();
        assert!(message.contains("multiplier"));
        assert!(message.contains("Letter"));
        assert!(message.contains("cm"));
    }

    #[test]
    fn test_margin_zero() {
        let tiny = BBox::from_size(20.0, 20.0);
        assert_eq!(parse_margin("0", &tiny).unwrap(), Margin::zero());
        assert_eq!(parse_margin("0.0", &tiny).unwrap(), Margin::zero());
    }

    #[test]
    fn test_margin_percent() {
        let a4 = BBox::from_size(595.0, 842.0);
        let m = parse_margin("5%", &a4).unwrap();
        assert!(approx(m.horizontal, 0.05 * 595.0));
        assert!(approx(m.vertical, 0.05 * 842.0));
    }

    #[test]
    fn test_margin_box() {
        let a4 = BBox::from_size(595.0, 842.0);
        let m = parse_margin("1x2cm", &a4).unwrap();
        assert!(approx(m.horizontal, 28.3465));
        assert!(approx(m.vertical, 56.693));

        let m = parse_margin("0x1cm", &a4).unwrap();
        assert_eq!(m.horizontal, 0.0);
        assert!(approx(m.vertical, 28.3465));
    }

    #[test]
    fn test_margin_out_of_range() {
        let a4 = BBox::from_size(595.0, 842.0);
        assert!(matches!(
            parse_margin("50%", &a4).unwrap_err().kind,
            SpecErrorKind::MarginOutOfRange { .. }
        ));
        assert!(matches!(
            parse_margin("-5%", &a4).unwrap_err().kind,
            SpecErrorKind::MarginOutOfRange { .. }
        ));
        assert!(parse_margin("49%", &a4).is_ok());
        for spec in ["nan%", "NaN%", "inf%"] {
            assert!(
                matches!(
                    parse_margin(spec, &a4).unwrap_err().kind,
                    SpecErrorKind::MarginOutOfRange { .. }
                ),
                "{} accepted",
                spec
            );
        }
    }

    #[test]
    fn test_margin_bad_percent() {
        let a4 = BBox::from_size(595.0, 842.0);
        let err = parse_margin("five%", &a4).unwrap_err();
        assert!(matches!(err.kind, SpecErrorKind::Syntax { .. }));
    }
}
