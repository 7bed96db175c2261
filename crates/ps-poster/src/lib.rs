pub mod constants;
mod document;
pub mod emit;
pub mod layout;
mod options;
mod poster;
mod scan;
pub mod spec;
mod types;
pub mod units;

pub use document::{Document, DocumentSource, load_document};
pub use emit::write_poster;
pub use layout::{GridPosition, LayoutPlan, plan_layout, tile_positions, tile_viewport};
pub use options::*;
pub use poster::{PosterJob, make_poster, prepare_job, resolve_image_box, save_poster};
pub use scan::{HeaderScan, scan_header};
pub use spec::{SpecError, SpecErrorKind, parse_box, parse_margin};
pub use types::*;
