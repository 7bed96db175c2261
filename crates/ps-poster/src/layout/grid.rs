//! Sheet grid traversal
//!
//! Tiles are numbered from the lower-left corner of the poster: row 1 is
//! the bottom strip, column 1 the leftmost one.

use super::{GridPosition, LayoutPlan};
use crate::types::BBox;

/// All grid positions in output order: row by row, columns left to right
pub fn tile_positions(plan: &LayoutPlan) -> impl Iterator<Item = GridPosition> + use<> {
    let (rows, columns) = (plan.rows, plan.columns);
    (1..=rows).flat_map(move |row| (1..=columns).map(move |col| GridPosition::new(row, col)))
}

/// Part of the tiled poster area shown on the sheet at `pos`.
///
/// Coordinates are in the scaled poster space, the same space as
/// [`LayoutPlan::poster_box`].
pub fn tile_viewport(plan: &LayoutPlan, pos: GridPosition) -> BBox {
    let (tile_w, tile_h) = plan.tile_size;
    let x0 = (pos.col - 1) as f64 * tile_w;
    let y0 = (pos.row - 1) as f64 * tile_h;
    BBox::new(x0, y0, x0 + tile_w, y0 + tile_h)
}

/// 1-based page number of the sheet at `pos`
pub fn page_number(plan: &LayoutPlan, pos: GridPosition) -> usize {
    (pos.row - 1) * plan.columns + pos.col
}

// =============================================================================
// Tests
// =============================================================================
