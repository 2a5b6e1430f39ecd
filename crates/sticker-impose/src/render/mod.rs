//! SVG rendering for imposition
//!
//! This module turns a packing solution into a vector document:
//! - Cut geometry and artwork definitions for one sticker
//! - Registration marks for sheet-fed media
//! - One placement reference per tile

mod document;
mod shape;

pub use document::{StickerArt, document_size, render_imposition};
pub use shape::CutGeometry;
