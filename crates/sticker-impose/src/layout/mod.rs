//! Layout calculation modules for imposition
//!
//! This module handles all the geometric calculations for sticker imposition:
//! - Sheet-fed packing (orientation choice, items per sheet)
//! - Roll-fed packing (columns across the roll, rows along it)
//! - Tile placement (centering and per-tile coordinates)

mod placement;
mod roll;
mod sheet;
mod types;

pub use placement::*;
pub use roll::*;
pub use sheet::*;
pub use types::*;

use crate::catalog::MediaKind;
use crate::types::{DemandSpec, ItemSpec, ProductionMode};

/// Compute the packing solution for an item, mode, demand and spacing.
///
/// Never fails: inputs that cannot be produced yield
/// [`PackingSolution::infeasible`]. Sheet-fed modes ignore a length demand's
/// interpretation and treat it as zero stickers.
pub fn calculate_layout(
    item: &ItemSpec,
    mode: ProductionMode,
    demand: DemandSpec,
    requested_spacing_mm: f64,
) -> PackingSolution {
    let profile = mode.profile();
    let spacing_mm = profile.spacing.resolve(requested_spacing_mm);

    match profile.media {
        MediaKind::Sheet => match demand {
            DemandSpec::Quantity(quantity) => {
                pack_sheets(item, &profile.template, spacing_mm, quantity)
            }
            DemandSpec::Length { .. } => PackingSolution::infeasible(spacing_mm),
        },
        MediaKind::Roll { segment_length_mm } => pack_roll(
            item,
            &profile.template,
            spacing_mm,
            demand,
            segment_length_mm,
        ),
    }
}
