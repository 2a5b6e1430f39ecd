//! Layout data types for imposition
//!
//! These types represent the packing solution shared by pricing,
//! scheduling and rendering.

use crate::constants::MAX_TILES_PER_DOCUMENT;

/// Position within the tile grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row, or the leading edge of a roll)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
}

impl GridPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Extra results that only exist for roll-fed runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollRun {
    /// Length of media consumed by the run (mm)
    pub linear_height_mm: f64,
    /// Stickers actually produced; may exceed the requested quantity
    pub total_produced: u32,
}

impl RollRun {
    pub fn linear_meters(&self) -> f64 {
        self.linear_height_mm / 1000.0
    }

    pub fn linear_cm(&self) -> f64 {
        self.linear_height_mm / 10.0
    }
}

/// How items are tiled onto the production medium
///
/// A solution with `per_unit == 0` is infeasible: the item does not fit,
/// or the input could not be computed. Callers must treat it as
/// "cannot produce".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingSolution {
    /// Items across the medium
    pub cols: u32,
    /// Items along the medium (per sheet, or per roll run)
    pub rows: u32,
    /// Whether the item was turned 90° to improve yield
    pub rotated: bool,
    /// Item width as tiled (mm), already swapped when rotated
    pub item_width_mm: f64,
    /// Item height as tiled (mm), already swapped when rotated
    pub item_height_mm: f64,
    /// Gap between tiles (mm)
    pub spacing_mm: f64,
    /// Items per sheet (sheet-fed) or items per row (roll-fed)
    pub per_unit: u32,
    /// Sheets or roll segments required
    pub total_units: u32,
    /// Roll-only results
    pub roll: Option<RollRun>,
}

impl PackingSolution {
    /// The zero-valued result for inputs that cannot be produced
    pub fn infeasible(spacing_mm: f64) -> Self {
        Self {
            cols: 0,
            rows: 0,
            rotated: false,
            item_width_mm: 0.0,
            item_height_mm: 0.0,
            spacing_mm,
            per_unit: 0,
            total_units: 0,
            roll: None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.per_unit > 0 && self.total_units > 0
    }

    /// Stickers actually produced by the job
    ///
    /// The packers reject solutions whose count overflows.
    pub fn total_produced(&self) -> u32 {
        match self.roll {
            Some(run) => run.total_produced,
            None => self.per_unit.saturating_mul(self.total_units),
        }
    }

    /// Width of the tiled block (mm)
    pub fn block_width_mm(&self) -> f64 {
        span_mm(self.cols, self.item_width_mm, self.spacing_mm)
    }

    /// Height of the tiled block (mm)
    pub fn block_height_mm(&self) -> f64 {
        span_mm(self.rows, self.item_height_mm, self.spacing_mm)
    }

    /// Linear meters consumed (roll-fed only)
    pub fn linear_meters(&self) -> Option<f64> {
        self.roll.map(|run| run.linear_meters())
    }
}

/// Extent of `count` items with `spacing` between neighbours
pub fn span_mm(count: u32, item_mm: f64, spacing_mm: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * item_mm + (count - 1) as f64 * spacing_mm
}

/// Items that fit along one axis: `floor((available + spacing) / (item + spacing))`
///
/// Returns `None` when the count cannot be represented, which callers treat
/// as infeasible.
pub fn fit_along(available_mm: f64, item_mm: f64, spacing_mm: f64) -> Option<u32> {
    if item_mm <= 0.0 || !available_mm.is_finite() || available_mm <= 0.0 {
        return Some(0);
    }
    let count = ((available_mm + spacing_mm) / (item_mm + spacing_mm)).floor();
    if !count.is_finite() || count > f64::from(u32::MAX) {
        return None;
    }
    Some(count.max(0.0) as u32)
}

/// Tiles drawn on one document, if within [`MAX_TILES_PER_DOCUMENT`]
pub(crate) fn bounded_tiles(cols: u32, rows: u32) -> Option<u32> {
    cols.checked_mul(rows)
        .filter(|&tiles| tiles <= MAX_TILES_PER_DOCUMENT)
}

// =============================================================================
// Tests
// =============================================================================
