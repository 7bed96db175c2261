//! Layout data types for poster tiling

use crate::types::{BBox, Orientation};

/// Position within the sheet grid (row, column)
///
/// Both indices are 1-based, matching the labels printed on each sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (1 = first row)
    pub row: usize,
    /// Column index (1 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Sheets needed along each axis for one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCount {
    pub columns: usize,
    pub rows: usize,
}

impl SheetCount {
    /// Sheets needed to cover `size` with pieces of `piece`, per axis
    pub fn covering(size: (f64, f64), piece: (f64, f64)) -> Self {
        Self {
            columns: (size.0 / piece.0).ceil() as usize,
            rows: (size.1 / piece.1).ceil() as usize,
        }
    }

    pub fn total(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

/// The computed tiling of one poster
///
/// Produced once by [`plan_layout`](super::plan_layout) and consumed by the
/// tile emitter for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Number of sheet rows
    pub rows: usize,
    /// Number of sheet columns
    pub columns: usize,
    /// Whether sheets are turned by 90 degrees relative to the image
    pub rotate: bool,
    /// Linear magnification applied to the input image
    pub scale: f64,
    /// The scaled image, centered within the total tiled drawable area
    pub poster_box: BBox,
    /// Drawable area of one sheet, measured along the poster's axes
    /// (swapped when `rotate` is set)
    pub tile_size: (f64, f64),
}

impl LayoutPlan {
    /// Number of sheets (output pages)
    pub fn tile_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Size of the total tiled drawable area
    pub fn tiled_size(&self) -> (f64, f64) {
        (
            self.columns as f64 * self.tile_size.0,
            self.rows as f64 * self.tile_size.1,
        )
    }

    pub fn sheet_orientation(&self) -> Orientation {
        if self.rotate {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}
