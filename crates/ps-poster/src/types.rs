use crate::spec::SpecError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Layout of {columns}x{rows} sheets exceeds the limit of {limit}")]
    TooManyTiles {
        rows: usize,
        columns: usize,
        limit: usize,
    },
    #[error("Failed to open file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// An axis-aligned rectangle in PostScript units (1/72 inch)
///
/// `(x0, y0)` is the lower-left corner, `(x1, y1)` the upper-right one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A box anchored at the origin
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Wider than tall
    pub fn is_landscape(&self) -> bool {
        self.height() < self.width()
    }

    /// Both extents strictly positive
    pub fn has_positive_size(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// The same box with both axes exchanged
    pub fn transposed(&self) -> Self {
        Self::new(self.y0, self.x0, self.y1, self.x1)
    }

    /// The same size, moved so that the lower-left corner is at 0,0
    pub fn at_origin(&self) -> Self {
        Self::from_size(self.width(), self.height())
    }
}

/// Horizontal and vertical margin, in PostScript units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Margin {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Sheet orientation relative to the poster image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Sheets are used upright
    #[default]
    Portrait,
    /// Sheets are turned by 90 degrees
    Landscape,
}

impl Orientation {
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
        }
    }
}

/// How the output size is requested: exactly one of the two
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeRequest {
    /// Linear magnification of the input image
    Scale(f64),
    /// Target poster size; the scale is derived from the sheet grid
    Poster(BBox),
}
