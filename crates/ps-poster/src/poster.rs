//! Poster run orchestration
//!
//! Scan the input header, settle the image bounding box, plan the layout,
//! then write the tiled document.

use crate::constants::DEFAULT_IMAGE;
use crate::document::Document;
use crate::emit::write_poster;
use crate::layout::{LayoutPlan, plan_layout};
use crate::options::RunConfig;
use crate::scan::{HeaderScan, scan_header};
use crate::spec::parse_box;
use crate::types::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Everything decided before the first byte of output
#[derive(Debug, Clone, PartialEq)]
pub struct PosterJob {
    /// Result of the header scan
    pub header: HeaderScan,
    /// Input image bounding box the plan was computed for
    pub image: BBox,
    pub plan: LayoutPlan,
}

/// Pick the input image bounding box.
///
/// An explicit image spec wins over the header; without either, the
/// default media size is assumed.
pub fn resolve_image_box(config: &RunConfig, header: &HeaderScan) -> Result<BBox> {
    let image = match (config.image, header.bounding_box) {
        (Some(image), _) => image,
        (None, Some(found)) => found,
        (None, None) => {
            log::info!("Using default input image of {}", DEFAULT_IMAGE);
            parse_box(DEFAULT_IMAGE)?
        }
    };
    log::debug!(
        "Input image is [{}, {}, {}, {}]",
        image.x0,
        image.y0,
        image.x1,
        image.y1
    );

    if !image.has_positive_size() {
        return Err(PosterError::Config(
            "Input image should have positive size".to_string(),
        ));
    }
    Ok(image)
}

/// Scan the document and compute its layout
pub fn prepare_job(document: &Document, config: &RunConfig) -> Result<PosterJob> {
    let header = scan_header(document.open()?)?;
    let image = resolve_image_box(config, &header)?;
    let plan = plan_layout(&image, config)?;
    Ok(PosterJob {
        header,
        image,
        plan,
    })
}

/// Plan and write the poster for `document` into `out`
pub fn make_poster<W: Write + ?Sized>(
    out: &mut W,
    document: &Document,
    config: &RunConfig,
) -> Result<PosterJob> {
    let job = prepare_job(document, config)?;
    write_poster(out, document, config, &job)?;
    Ok(job)
}

/// Write an already planned poster to `output`, or to stdout when `None`
pub async fn save_poster(
    document: Document,
    config: RunConfig,
    job: PosterJob,
    output: Option<PathBuf>,
) -> Result<()> {
    tokio::task::spawn_blocking(move || match output {
        Some(path) => {
            let file = File::create(&path).map_err(|source| PosterError::Open {
                path: path.clone(),
                source,
            })?;
            log::info!("Opened '{}' for writing", path.display());
            let mut out = BufWriter::new(file);
            write_poster(&mut out, &document, &config, &job)
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_poster(&mut out, &document, &config, &job)
        }
    })
    .await?
}
