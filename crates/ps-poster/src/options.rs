use crate::constants::*;
use crate::spec::{parse_box, parse_margin};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User-facing poster configuration, as given on the command line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PosterOptions {
    // Input
    pub input_file: PathBuf,
    /// Input image size; read from the document header when absent
    pub image: Option<String>,

    // Output size
    pub media: String,
    pub poster: Option<String>,
    pub scale: Option<f64>,

    // Margins
    pub cut_margin: String,
    pub white_margin: String,

    // Output document
    pub manual_feed: bool,
    pub creator: String,
    pub orientation_comment: bool,

    // Input handling
    pub max_buffered_bytes: u64,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            image: None,
            media: DEFAULT_MEDIA.to_string(),
            poster: None,
            scale: None,
            cut_margin: DEFAULT_CUT_MARGIN.to_string(),
            white_margin: DEFAULT_WHITE_MARGIN.to_string(),
            manual_feed: false,
            creator: DEFAULT_CREATOR.to_string(),
            orientation_comment: false,
            max_buffered_bytes: DEFAULT_MAX_BUFFERED_BYTES,
        }
    }
}

/// Validated, immutable inputs for one poster run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_file: PathBuf,
    /// Explicit image bounding box, overriding the document header
    pub image: Option<BBox>,
    /// Media spec as given, echoed in `%%DocumentMedia`
    pub media_name: String,
    /// Media size, lower-left corner at 0,0
    pub media: BBox,
    pub cut_margin: Margin,
    pub white_margin: Margin,
    pub request: SizeRequest,
    pub manual_feed: bool,
    pub creator: String,
    pub orientation_comment: bool,
    pub max_buffered_bytes: u64,
}

impl RunConfig {
    /// Printable area of one sheet: media minus the cut margin on both sides
    pub fn drawable_size(&self) -> (f64, f64) {
        (
            self.media.width() - 2.0 * self.cut_margin.horizontal,
            self.media.height() - 2.0 * self.cut_margin.vertical,
        )
    }
}

impl PosterOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options and parse every spec they contain
    pub fn resolve(&self) -> Result<RunConfig> {
        if self.input_file.as_os_str().is_empty() {
            return Err(PosterError::Config("No input file specified".to_string()));
        }

        let media = resolve_media(&self.media)?;

        let request = match (self.scale, self.poster.as_deref()) {
            (Some(_), Some(poster)) => {
                log::warn!("Both a scale and a poster size given, ignoring the scale");
                SizeRequest::Poster(resolve_poster(poster)?)
            }
            (Some(scale), None) => SizeRequest::Scale(validate_scale(scale)?),
            (None, Some(poster)) => SizeRequest::Poster(resolve_poster(poster)?),
            (None, None) => {
                log::info!("Defaulting poster size to media size of {}", self.media);
                SizeRequest::Poster(resolve_poster(&self.media)?)
            }
        };

        let cut_margin = parse_margin(&self.cut_margin, &media)?;
        let white_margin = parse_margin(&self.white_margin, &media)?;
        log::debug!(
            "Cut margin {:?}, white margin {:?}",
            cut_margin,
            white_margin
        );

        let image = self.image.as_deref().map(parse_box).transpose()?;

        Ok(RunConfig {
            input_file: self.input_file.clone(),
            image,
            media_name: self.media.clone(),
            media,
            cut_margin,
            white_margin,
            request,
            manual_feed: self.manual_feed,
            creator: self.creator.clone(),
            orientation_comment: self.orientation_comment,
            max_buffered_bytes: self.max_buffered_bytes,
        })
    }
}

fn resolve_media(spec: &str) -> Result<BBox> {
    let mut media = parse_box(spec)?;
    if media.x0 != 0.0 || media.y0 != 0.0 {
        log::warn!("Media lower-left coordinates are assumed 0");
        media = BBox::from_size(media.x1, media.y1);
    }
    if media.is_landscape() {
        return Err(PosterError::Config(
            "Media should always be specified in portrait format".to_string(),
        ));
    }
    if media.width() <= MIN_MEDIA_EXTENT || media.height() <= MIN_MEDIA_EXTENT {
        return Err(PosterError::Config(format!(
            "Media size {}x{} is ridiculous",
            media.width(),
            media.height()
        )));
    }
    Ok(media)
}

fn resolve_poster(spec: &str) -> Result<BBox> {
    let poster = parse_box(spec)?;
    if poster.x0 != 0.0 || poster.y0 != 0.0 {
        log::warn!("Poster lower-left coordinates are assumed 0");
        return Ok(BBox::from_size(poster.x1, poster.y1));
    }
    Ok(poster)
}

fn validate_scale(scale: f64) -> Result<f64> {
    if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
        return Err(PosterError::Config(format!(
            "Illegal scale value {} (expected {} to {})",
            scale, MIN_SCALE, MAX_SCALE
        )));
    }
    Ok(scale)
}
