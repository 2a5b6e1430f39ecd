//! Tile placement on the medium
//!
//! The tiled block is centered inside the printable area. Sheets center on
//! both axes; rolls center across the roll only and start at the leading
//! edge of the run.

use crate::catalog::SheetTemplate;

use super::{GridPosition, PackingSolution, bounded_tiles};

/// Top-left corner of one tile, in document millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub position: GridPosition,
    pub x_mm: f64,
    pub y_mm: f64,
}

/// Offset of the tiled block from the printable origin.
pub fn centering_offset(solution: &PackingSolution, template: &SheetTemplate) -> (f64, f64) {
    let x_offset = (template.printable_width_mm - solution.block_width_mm()) / 2.0;
    let y_offset = if solution.roll.is_some() {
        0.0
    } else {
        (template.printable_height_mm - solution.block_height_mm()) / 2.0
    };
    (x_offset, y_offset)
}

/// Compute the position of every tile, row by row.
///
/// Each coordinate is `printable origin + centering offset + index × (item + spacing)`.
/// Infeasible solutions, and grids too large for one document, produce no tiles.
pub fn tile_placements(solution: &PackingSolution, template: &SheetTemplate) -> Vec<TilePlacement> {
    if !solution.is_feasible() {
        return Vec::new();
    }
    let Some(tiles) = bounded_tiles(solution.cols, solution.rows) else {
        return Vec::new();
    };

    let (x_offset, y_offset) = centering_offset(solution, template);
    let step_x = solution.item_width_mm + solution.spacing_mm;
    let step_y = solution.item_height_mm + solution.spacing_mm;
    let origin_x = template.printable_x_mm + x_offset;
    let origin_y = template.printable_y_mm + y_offset;

    let mut placements = Vec::with_capacity(tiles as usize);
    for row in 0..solution.rows {
        for col in 0..solution.cols {
            placements.push(TilePlacement {
                position: GridPosition::new(row, col),
                x_mm: origin_x + col as f64 * step_x,
                y_mm: origin_y + row as f64 * step_y,
            });
        }
    }
    placements
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_layout;
    use crate::types::{DemandSpec, ItemSpec, ProductionMode};

    #[test]
    fn test_sheet_block_is_centered_on_both_axes() {
        let solution = calculate_layout(
            &ItemSpec::new(8.0, 8.0),
            ProductionMode::Press,
            DemandSpec::Quantity(100),
            0.0,
        );
        let template = ProductionMode::Press.template();

        // Block: 3 × 80 + 2 × 2 = 244 wide, 5 × 80 + 4 × 2 = 408 tall
        let (x_offset, y_offset) = centering_offset(&solution, template);
        assert_eq!(x_offset, 28.0);
        assert_eq!(y_offset, 6.0);

        let tiles = tile_placements(&solution, template);
        assert_eq!(tiles.len(), 15);
        assert_eq!(tiles[0].x_mm, 43.0);
        assert_eq!(tiles[0].y_mm, 51.0);
        assert_eq!(tiles[1].x_mm, 125.0);
        assert_eq!(tiles[3].position, GridPosition::new(1, 0));
        assert_eq!(tiles[3].y_mm, 133.0);
    }

    #[test]
    fn test_roll_block_is_centered_across_only() {
        let solution = calculate_layout(
            &ItemSpec::new(4.0, 4.0),
            ProductionMode::DtfUv,
            DemandSpec::Quantity(100),
            5.0,
        );
        let template = ProductionMode::DtfUv.template();

        // Block: 13 × 40 + 12 × 5 = 580 wide, fills the roll exactly
        let (x_offset, y_offset) = centering_offset(&solution, template);
        assert_eq!(x_offset, 0.0);
        assert_eq!(y_offset, 0.0);

        let tiles = tile_placements(&solution, template);
        assert_eq!(tiles.len(), 104);
        assert_eq!(tiles[0].x_mm, 10.0);
        assert_eq!(tiles[0].y_mm, 0.0);
        assert_eq!(tiles[13].y_mm, 45.0);
    }

    #[test]
    fn test_infeasible_solution_has_no_tiles() {
        let solution = PackingSolution::infeasible(2.0);
        assert!(tile_placements(&solution, ProductionMode::Press.template()).is_empty());
    }

    #[test]
    fn test_placements_are_deterministic() {
        let solution = calculate_layout(
            &ItemSpec::new(3.3, 2.7),
            ProductionMode::Plotter,
            DemandSpec::Quantity(500),
            0.0,
        );
        let template = ProductionMode::Plotter.template();
        assert_eq!(
            tile_placements(&solution, template),
            tile_placements(&solution, template)
        );
    }
}
