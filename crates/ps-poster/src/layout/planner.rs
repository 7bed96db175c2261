//! Sheet grid, rotation and scale decisions
//!
//! Given the input image, the media and margins, and either a scale or a
//! target poster size, pick the orientation needing the fewest sheets and
//! place the scaled image in the middle of the tiled area.

use crate::constants::{MAX_TILES, POSTER_SLACK};
use crate::options::RunConfig;
use crate::types::*;

use super::{LayoutPlan, SheetCount};

/// Sheet counts for both orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationChoice {
    /// Sheets used upright
    pub upright: SheetCount,
    /// Sheets turned by 90 degrees
    pub turned: SheetCount,
}

impl OrientationChoice {
    /// Turn the sheets only when that needs strictly fewer of them
    pub fn rotate(&self) -> bool {
        self.upright.total() > self.turned.total()
    }

    pub fn chosen(&self) -> SheetCount {
        if self.rotate() {
            self.turned
        } else {
            self.upright
        }
    }
}

/// Compute the layout plan for `image` under `config`.
pub fn plan_layout(image: &BBox, config: &RunConfig) -> Result<LayoutPlan> {
    if !image.has_positive_size() {
        return Err(PosterError::Config(
            "Input image should have positive size".to_string(),
        ));
    }

    let (drawable_w, drawable_h) = config.drawable_size();
    let white = config.white_margin;

    let choice = match config.request {
        SizeRequest::Scale(scale) => {
            let size = (
                image.width() * scale + 2.0 * white.horizontal,
                image.height() * scale + 2.0 * white.vertical,
            );
            OrientationChoice {
                upright: SheetCount::covering(size, (drawable_w, drawable_h)),
                turned: SheetCount::covering(size, (drawable_h, drawable_w)),
            }
        }
        SizeRequest::Poster(poster) => {
            let target = orient_poster(&poster, image);
            let size = (POSTER_SLACK * target.x1, POSTER_SLACK * target.y1);
            let media = (config.media.width(), config.media.height());
            OrientationChoice {
                upright: SheetCount::covering(size, media),
                turned: SheetCount::covering(size, (media.1, media.0)),
            }
        }
    };

    let rotate = choice.rotate();
    let SheetCount { columns, rows } = choice.chosen();
    log::info!(
        "Deciding for {} column{} and {} row{} of {} pages",
        columns,
        if columns == 1 { "" } else { "s" },
        rows,
        if rows == 1 { "" } else { "s" },
        if rotate { "landscape" } else { "portrait" }
    );

    if choice.chosen().total() > MAX_TILES {
        return Err(PosterError::TooManyTiles {
            rows,
            columns,
            limit: MAX_TILES,
        });
    }

    let tile_size = if rotate {
        (drawable_h, drawable_w)
    } else {
        (drawable_w, drawable_h)
    };
    let tiled_w = columns as f64 * tile_size.0;
    let tiled_h = rows as f64 * tile_size.1;

    let scale = match config.request {
        SizeRequest::Scale(scale) => scale,
        SizeRequest::Poster(_) => {
            let scale_x = (tiled_w - 2.0 * white.horizontal) / image.width();
            let scale_y = (tiled_h - 2.0 * white.vertical) / image.height();
            let scale = scale_x.min(scale_y);
            if scale.is_nan() || scale <= 0.0 {
                return Err(PosterError::Config(
                    "Margins leave no room for the image".to_string(),
                ));
            }
            log::info!("Deciding for a scale factor of {}", scale);
            scale
        }
    };

    let scaled_w = scale * image.width();
    let scaled_h = scale * image.height();
    let x0 = (tiled_w - scaled_w) / 2.0;
    let y0 = (tiled_h - scaled_h) / 2.0;
    let poster_box = BBox::new(x0, y0, x0 + scaled_w, y0 + scaled_h);
    log::debug!(
        "Output image is [{}, {}, {}, {}]",
        poster_box.x0,
        poster_box.y0,
        poster_box.x1,
        poster_box.y1
    );

    Ok(LayoutPlan {
        rows,
        columns,
        rotate,
        scale,
        poster_box,
        tile_size,
    })
}

/// Give the requested poster the orientation of the image.
///
/// The request is first made portrait, then turned to landscape when the
/// image is wider than tall, however the user wrote the size down.
pub fn orient_poster(poster: &BBox, image: &BBox) -> BBox {
    let portrait = if poster.is_landscape() {
        poster.transposed()
    } else {
        *poster
    };
    if image.is_landscape() {
        portrait.transposed()
    } else {
        portrait
    }
}

// =============================================================================
// Tests
// =============================================================================
