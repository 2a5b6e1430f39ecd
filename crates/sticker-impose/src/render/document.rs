//! Imposed document assembly

use crate::catalog::SheetTemplate;
use crate::layout::{PackingSolution, bounded_tiles, tile_placements};
use crate::marks::registration_marks;
use crate::types::{ImposeError, OutputIntent, Result};
use svg::Document;
use svg::node::element::{Definitions, Use};

use super::shape::{CutGeometry, TileFrame, artwork_group, cut_shape, sticker_group};

const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// What is drawn inside every tile
#[derive(Debug, Clone, Copy)]
pub struct StickerArt<'a> {
    pub geometry: &'a CutGeometry,
    /// Image reference (usually a data URI); required for print output
    pub artwork_href: Option<&'a str>,
    /// Fill drawn under the artwork
    pub background: Option<&'a str>,
}

/// Physical extent of the document (mm)
pub fn document_size(solution: &PackingSolution, template: &SheetTemplate) -> (f64, f64) {
    match solution.roll {
        Some(run) => (template.width_mm, run.linear_height_mm),
        None => (template.width_mm, template.height_mm),
    }
}

/// Render the imposition of a packing solution.
///
/// Fails with [`ImposeError::Infeasible`] when nothing can be tiled or the grid
/// exceeds what one document can hold, and with
/// [`ImposeError::MissingArtwork`] when print output is requested without an
/// image.
pub fn render_imposition(
    solution: &PackingSolution,
    template: &SheetTemplate,
    art: &StickerArt<'_>,
    intent: OutputIntent,
) -> Result<Document> {
    if !solution.is_feasible() || bounded_tiles(solution.cols, solution.rows).is_none() {
        return Err(ImposeError::Infeasible);
    }

    let frame = TileFrame::of(solution);
    let artwork = match intent {
        OutputIntent::Print => {
            let href = art.artwork_href.ok_or(ImposeError::MissingArtwork)?;
            Some(artwork_group(href, art.background, &frame))
        }
        OutputIntent::Cut => None,
    };

    let definitions = Definitions::new()
        .add(cut_shape(art.geometry, &frame))
        .add(sticker_group(artwork));

    let (width, height) = document_size(solution, template);
    let mut document = Document::new()
        .set("xmlns:xlink", XLINK_NAMESPACE)
        .set("width", format!("{}mm", width))
        .set("height", format!("{}mm", height))
        .set("viewBox", format!("0 0 {} {}", width, height))
        .add(definitions)
        .add(registration_marks(template));

    let placements = tile_placements(solution, template);
    log::debug!(
        "rendering {} tiles ({}) on {}×{} mm",
        placements.len(),
        intent.label(),
        width,
        height
    );
    for tile in placements {
        document = document.add(
            Use::new()
                .set("href", "#sticker")
                .set("x", tile.x_mm)
                .set("y", tile.y_mm),
        );
    }

    Ok(document)
}
