//! Sheet-fed packing
//!
//! Sheets are bounded on both axes, so the item may be turned 90° when that
//! strictly increases the number of stickers per sheet.

use crate::catalog::SheetTemplate;
use crate::types::ItemSpec;

use super::{PackingSolution, bounded_tiles, fit_along};

/// Columns and rows for one orientation of the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetFit {
    pub cols: u32,
    pub rows: u32,
}

impl SheetFit {
    /// Items per sheet; zero when the grid exceeds what one document can hold
    pub fn per_sheet(&self) -> u32 {
        bounded_tiles(self.cols, self.rows).unwrap_or(0)
    }
}

/// Count how many items of the given size fit in the printable area
pub fn sheet_fit(
    template: &SheetTemplate,
    item_width_mm: f64,
    item_height_mm: f64,
    spacing_mm: f64,
) -> SheetFit {
    if item_width_mm <= 0.0 || item_height_mm <= 0.0 {
        return SheetFit { cols: 0, rows: 0 };
    }
    let cols = fit_along(template.printable_width_mm, item_width_mm, spacing_mm);
    let rows = fit_along(template.printable_height_mm, item_height_mm, spacing_mm);
    match (cols, rows) {
        (Some(cols), Some(rows)) => SheetFit { cols, rows },
        _ => SheetFit { cols: 0, rows: 0 },
    }
}

/// Pack `quantity` items onto sheets, choosing the better orientation.
///
/// The rotated orientation wins only when it yields strictly more items per
/// sheet; ties keep the item as given.
pub fn pack_sheets(
    item: &ItemSpec,
    template: &SheetTemplate,
    spacing_mm: f64,
    quantity: u32,
) -> PackingSolution {
    if !item.is_valid() || quantity == 0 {
        return PackingSolution::infeasible(spacing_mm);
    }

    let (item_w, item_h) = (item.width_mm(), item.height_mm());
    let normal = sheet_fit(template, item_w, item_h, spacing_mm);
    let turned = sheet_fit(template, item_h, item_w, spacing_mm);

    let rotated = turned.per_sheet() > normal.per_sheet();
    let (fit, item_width_mm, item_height_mm) = if rotated {
        (turned, item_h, item_w)
    } else {
        (normal, item_w, item_h)
    };

    let per_sheet = fit.per_sheet();
    if per_sheet == 0 {
        return PackingSolution::infeasible(spacing_mm);
    }
    let total_units = quantity.div_ceil(per_sheet);
    if per_sheet.checked_mul(total_units).is_none() {
        return PackingSolution::infeasible(spacing_mm);
    }

    log::debug!(
        "sheet fit: {}x{} as given, {}x{} rotated, using {}",
        normal.cols,
        normal.rows,
        turned.cols,
        turned.rows,
        if rotated { "rotated" } else { "as given" }
    );

    PackingSolution {
        cols: fit.cols,
        rows: fit.rows,
        rotated,
        item_width_mm,
        item_height_mm,
        spacing_mm,
        per_unit: per_sheet,
        total_units,
        roll: None,
    }
}

// =============================================================================
// Tests
// =============================================================================
