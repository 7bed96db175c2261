//! Poster document output
//!
//! This module writes the tiled document in order:
//! 1. Header comments, including the forwarded input properties
//! 2. Prolog and setup (tile procedures, media request, layout numbers)
//! 3. One page per tile, each re-streaming the input body
//! 4. `%%EOF`, followed by the input's trailing Ctrl-D if it had one

mod body;
mod header;
mod prolog;

pub use body::copy_body;
pub use header::{format_general, write_header};
pub use prolog::{prolog, setup};

use crate::constants::END_OF_TRANSMISSION;
use crate::document::Document;
use crate::layout::{GridPosition, LayoutPlan, page_number, tile_positions};
use crate::options::RunConfig;
use crate::poster::PosterJob;
use crate::types::*;
use std::io::Write;

/// Closes the current page and the document when the input disappears
/// halfway through the output
const ABORTED_PAGE: &[u8] = b"/systemdict /showpage get exec\n%%EOF\n";

/// Write the complete poster document.
///
/// On a failure to reopen the input for a tile, a page end and `%%EOF`
/// are still written so that the truncated output stays well-formed.
pub fn write_poster<W: Write + ?Sized>(
    out: &mut W,
    document: &Document,
    config: &RunConfig,
    job: &PosterJob,
) -> Result<()> {
    write_header(out, document, config, &job.header, &job.plan)?;
    out.write_all(prolog().as_bytes())?;
    out.write_all(setup(config, &job.image, &job.plan).as_bytes())?;

    let mut trailing_eot = false;
    for pos in tile_positions(&job.plan) {
        trailing_eot |= write_tile(out, document, &job.plan, pos)?;
    }

    out.write_all(b"%%EOF\n")?;
    if trailing_eot {
        out.write_all(&[END_OF_TRANSMISSION])?;
    }
    out.flush()?;
    Ok(())
}

/// Write one page; returns whether the body ended in a Ctrl-D
fn write_tile<W: Write + ?Sized>(
    out: &mut W,
    document: &Document,
    plan: &LayoutPlan,
    pos: GridPosition,
) -> Result<bool> {
    let page = page_number(plan, pos);
    log::info!("Printing page {} (row {}, column {})", page, pos.row, pos.col);

    writeln!(out, "\n%%Page: {} {}", page, page)?;
    writeln!(out, "{} {} tileprolog", pos.row, pos.col)?;
    writeln!(out, "%%BeginDocument: {}", document.name)?;

    let reader = match document.open() {
        Ok(reader) => reader,
        Err(err) => {
            if let Err(close_err) = out.write_all(ABORTED_PAGE).and_then(|_| out.flush()) {
                log::warn!("Could not close the output document: {}", close_err);
            }
            return Err(err);
        }
    };
    let trailing_eot = copy_body(reader, out)?;

    out.write_all(b"\n%%EndDocument\n")?;
    out.write_all(b"tileepilog\n")?;
    Ok(trailing_eot)
}
