//! Shared constants for poster tiling
//!
//! This module centralizes the defaults, sanity limits and PostScript
//! drawing parameters used throughout planning and emission.

// =============================================================================
// Unit Conversion
// =============================================================================

/// PostScript units per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// PostScript units per millimeter, as listed in the unit table
pub const POINTS_PER_MM: f64 = 2.83465;

// =============================================================================
// Defaults
// =============================================================================

/// Media used when none is given
pub const DEFAULT_MEDIA: &str = "A4";

/// Input image size assumed when neither an image spec nor a header
/// bounding box is available
pub const DEFAULT_IMAGE: &str = "A4";

/// Cut margin used when none is given
pub const DEFAULT_CUT_MARGIN: &str = "5%";

/// White margin used when none is given
pub const DEFAULT_WHITE_MARGIN: &str = "0";

/// Name written into the `%%Creator` comment
pub const DEFAULT_CREATOR: &str = "poster";

/// Inputs up to this size are read once and sliced per tile
pub const DEFAULT_MAX_BUFFERED_BYTES: u64 = 64 * 1024 * 1024;

// =============================================================================
// Sanity Limits
// =============================================================================

/// Largest sheet grid (rows × columns) that will be planned
pub const MAX_TILES: usize = 400;

/// Smallest accepted linear scale factor
pub const MIN_SCALE: f64 = 0.01;

/// Largest accepted linear scale factor
pub const MAX_SCALE: f64 = 1.0e6;

/// Media must exceed this extent on both axes (PostScript units)
pub const MIN_MEDIA_EXTENT: f64 = 10.0;

/// Applied to a requested poster size before dividing by the media size,
/// so that a poster equal to N sheets is not rounded up to N+1.
pub const POSTER_SLACK: f64 = 0.95;

// =============================================================================
// Tile Marks
// =============================================================================

/// Distance the clip rectangle extends past the drawable area (points)
pub const CLIP_MARGIN: i32 = 6;

/// Font size of the `Grid ( row , col )` label (points)
pub const LABEL_SIZE: i32 = 9;

/// Line width of cut lines (points)
pub const CUT_LINE_WIDTH: f64 = 0.23;

// =============================================================================
// Document Structure
// =============================================================================

/// Control byte that may terminate a PostScript stream (Ctrl-D)
pub const END_OF_TRANSMISSION: u8 = 0x04;

/// First byte of every comment line
pub const COMMENT_MARKER: u8 = b'%';
