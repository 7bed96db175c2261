//! Input document access
//!
//! The body is re-read once per tile. Inputs below the buffering ceiling
//! are read into memory once and every pass slices that buffer; larger
//! inputs are reopened from disk for each pass, trading I/O volume for a
//! bounded memory footprint.

use crate::types::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Where the document bytes come from on each pass
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// Whole document held in memory
    Buffered(Vec<u8>),
    /// Document reopened from this path on every pass
    Streamed(PathBuf),
}

/// An input document, opened once per pass
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Name echoed into the output (`%%BeginDocument:` and the title line)
    pub name: String,
    source: DocumentSource,
}

impl Document {
    /// A document held in memory
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: DocumentSource::Buffered(bytes),
        }
    }

    /// A document reopened from disk on every pass
    pub fn streamed(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            source: DocumentSource::Streamed(path),
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self.source, DocumentSource::Buffered(_))
    }

    /// Start a new pass over the document from its first byte
    pub fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        match &self.source {
            DocumentSource::Buffered(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            DocumentSource::Streamed(path) => {
                let file = File::open(path).map_err(|source| PosterError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Load an input document, buffering it when it is at most
/// `max_buffered_bytes` long.
pub async fn load_document(path: impl AsRef<Path>, max_buffered_bytes: u64) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let open_error = |source| PosterError::Open {
        path: path.clone(),
        source,
    };

    let metadata = tokio::fs::metadata(&path).await.map_err(open_error)?;
    if metadata.is_file() && metadata.len() > max_buffered_bytes {
        log::info!(
            "Input '{}' is {} bytes, reopening it for every tile",
            path.display(),
            metadata.len()
        );
        // Fail now rather than in the middle of the first page
        tokio::fs::File::open(&path).await.map_err(open_error)?;
        return Ok(Document::streamed(path));
    }

    let bytes = tokio::fs::read(&path).await.map_err(open_error)?;
    Ok(Document::from_bytes(path.display().to_string(), bytes))
}
