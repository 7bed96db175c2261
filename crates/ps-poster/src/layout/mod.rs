//! Layout calculation modules for poster tiling
//!
//! This module handles all the geometric decisions:
//! - Sheet grid size and rotation (which orientation needs fewer sheets)
//! - Scale factor when only a target poster size is known
//! - Poster placement within the total tiled area

mod grid;
mod planner;
mod types;

pub use grid::*;
pub use planner::*;
pub use types::*;
