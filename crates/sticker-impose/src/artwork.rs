//! Uploaded sticker artwork
//!
//! Artwork is embedded in the output document as a base64 data URI. Only the
//! pixel dimensions are decoded; the image content is never inspected.

use crate::constants::CM_PER_INCH;
use crate::services::Advisory;
use crate::types::{ItemSpec, ProductionMode, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

/// An image ready to be placed into every tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    /// Image reference written into the document
    pub href: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl Artwork {
    /// Read the pixel size of an encoded image and embed it as a data URI.
    ///
    /// When `mime` is not given it is taken from the detected format.
    pub fn from_bytes(bytes: &[u8], mime: Option<&str>) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let detected = reader.format().map(|format| format.to_mime_type());
        let (width_px, height_px) = reader.into_dimensions()?;

        let mime = mime.or(detected).unwrap_or("application/octet-stream");
        Ok(Self {
            href: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
            width_px,
            height_px,
        })
    }

    /// Read an image file and measure it
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let bytes = tokio::fs::read(&path).await?;
        let artwork = tokio::task::spawn_blocking(move || Artwork::from_bytes(&bytes, None)).await??;
        log::info!(
            "loaded artwork {} ({}×{} px)",
            path.display(),
            artwork.width_px,
            artwork.height_px
        );
        Ok(artwork)
    }

    /// Lowest pixel density across both axes when printed at the item's size
    pub fn effective_dpi(&self, item: &ItemSpec) -> Option<f64> {
        if !item.is_valid() {
            return None;
        }
        let horizontal = self.width_px as f64 / (item.width_cm / CM_PER_INCH);
        let vertical = self.height_px as f64 / (item.height_cm / CM_PER_INCH);
        Some(horizontal.min(vertical))
    }

    /// Advisory raised when the artwork is too coarse for the mode
    pub fn resolution_advisory(&self, item: &ItemSpec, mode: ProductionMode) -> Option<Advisory> {
        let dpi = self.effective_dpi(item)?;
        let recommended = mode.profile().recommended_dpi;
        (dpi < recommended).then(|| {
            let advisory = Advisory::LowResolution { dpi, recommended };
            log::warn!("{}", advisory);
            advisory
        })
    }
}
