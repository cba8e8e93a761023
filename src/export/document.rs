// SPDX-License-Identifier: MPL-2.0
//! Structured catalogue document, independent of any file format.
//!
//! The document is built from a projection snapshot before anything touches
//! the destination, so every image is read (and its format checked) up
//! front. A writer then only has to serialise what is here.

use super::CancelToken;
use crate::config::{DEFAULT_IMAGE_SIZE_PT, MAX_IMAGE_SIZE_PT, MIN_IMAGE_SIZE_PT};
use crate::error::ExportError;
use crate::lots::{LotNumber, LotProjection};
use crate::media::ImageHandle;
use image_rs::ImageFormat;
use tracing::debug;

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: u64 = 12_700;

/// Text of the right-hand column of every lot table.
pub const DETAILS_TEXT: &str = "Reserve price:\nEstimation:";

/// Page-independent layout choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLayout {
    image_size_pt: u32,
}

impl DocumentLayout {
    /// Creates a layout, clamping the picture size to the supported range.
    #[must_use]
    pub fn new(image_size_pt: u32) -> Self {
        Self {
            image_size_pt: image_size_pt.clamp(MIN_IMAGE_SIZE_PT, MAX_IMAGE_SIZE_PT),
        }
    }

    #[must_use]
    pub fn image_size_pt(self) -> u32 {
        self.image_size_pt
    }

    /// Side of the square picture frame in EMU.
    #[must_use]
    pub fn image_extent_emu(self) -> u64 {
        u64::from(self.image_size_pt) * EMU_PER_POINT
    }
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_SIZE_PT)
    }
}

/// Raster formats a word-processing document can embed natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Jpeg,
    Png,
}

impl PictureFormat {
    /// Sniffs the format from the file content, not its extension.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match image_rs::guess_format(bytes).ok()? {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// Image bytes ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub name: String,
    pub format: PictureFormat,
    pub bytes: Vec<u8>,
    /// Width and height of the picture frame in EMU.
    pub extent_emu: u64,
}

impl EmbeddedImage {
    /// Reads `handle` from disk.
    ///
    /// # Errors
    ///
    /// [`ExportError::ImageRead`] when the file cannot be read and
    /// [`ExportError::UnsupportedImage`] when it is neither JPEG nor PNG.
    pub fn read(handle: &ImageHandle, extent_emu: u64) -> Result<Self, ExportError> {
        let bytes = std::fs::read(handle.path()).map_err(|e| ExportError::ImageRead {
            file: handle.name().to_string(),
            reason: e.to_string(),
        })?;
        let format = PictureFormat::detect(&bytes)
            .ok_or_else(|| ExportError::UnsupportedImage(handle.name().to_string()))?;
        Ok(Self {
            name: handle.name().to_string(),
            format,
            bytes,
            extent_emu,
        })
    }
}

/// One lot: a title, a left column of pictures and a right column of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotSection {
    pub lot: LotNumber,
    pub title: String,
    pub images: Vec<EmbeddedImage>,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueDocument {
    pub sections: Vec<LotSection>,
}

impl CatalogueDocument {
    /// Builds the document for `projection`, one section per lot in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or unsupported image, or with
    /// [`ExportError::Cancelled`] once `cancel` fires.
    pub fn build(
        projection: &LotProjection,
        layout: DocumentLayout,
        cancel: &CancelToken,
    ) -> Result<Self, ExportError> {
        let extent = layout.image_extent_emu();
        let mut sections = Vec::with_capacity(projection.len());

        for (lot, handles) in projection.iter() {
            cancel.check()?;
            let mut images = Vec::with_capacity(handles.len());
            for handle in handles {
                cancel.check()?;
                images.push(EmbeddedImage::read(handle, extent)?);
            }
            debug!(%lot, images = images.len(), "lot section ready");
            sections.push(LotSection {
                lot,
                title: format!("Lot {lot}"),
                images,
                details: DETAILS_TEXT.to_string(),
            });
        }

        Ok(Self { sections })
    }

    /// Images across all sections, in document order.
    pub fn images(&self) -> impl Iterator<Item = &EmbeddedImage> {
        self.sections.iter().flat_map(|s| s.images.iter())
    }

    /// Total number of embedded pictures.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.sections.iter().map(|s| s.images.len()).sum()
    }
}
