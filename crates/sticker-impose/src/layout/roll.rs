//! Roll-fed packing
//!
//! The roll width is fixed and the transport direction is unbounded, so the
//! item is never rotated. Columns come from the printable width; rows come
//! from whichever demand interpretation is active.

use crate::catalog::SheetTemplate;
use crate::constants::{ceil_tolerant, cm_to_mm};
use crate::types::{DemandSpec, ItemSpec};

use super::{PackingSolution, RollRun, bounded_tiles, fit_along, span_mm};

/// Pack items across a roll for the given demand.
pub fn pack_roll(
    item: &ItemSpec,
    template: &SheetTemplate,
    spacing_mm: f64,
    demand: DemandSpec,
    segment_length_mm: f64,
) -> PackingSolution {
    if !item.is_valid() {
        return PackingSolution::infeasible(spacing_mm);
    }

    let (item_w, item_h) = (item.width_mm(), item.height_mm());
    let Some(cols) = fit_along(template.printable_width_mm, item_w, spacing_mm) else {
        return PackingSolution::infeasible(spacing_mm);
    };
    if cols == 0 {
        log::debug!(
            "{}mm item does not fit across a {}mm roll",
            item_w,
            template.printable_width_mm
        );
        return PackingSolution::infeasible(spacing_mm);
    }

    let (rows, linear_height_mm) = match demand {
        DemandSpec::Length { cm } => {
            let length_mm = cm_to_mm(cm);
            (fit_along(length_mm, item_h, spacing_mm), length_mm)
        }
        DemandSpec::Quantity(quantity) => {
            let rows = quantity.div_ceil(cols);
            (Some(rows), span_mm(rows, item_h, spacing_mm))
        }
    };

    let Some(rows) = rows.filter(|&rows| rows > 0) else {
        return PackingSolution::infeasible(spacing_mm);
    };
    let Some(total_produced) = bounded_tiles(cols, rows) else {
        log::debug!("{} x {} tiles exceed one document", cols, rows);
        return PackingSolution::infeasible(spacing_mm);
    };

    let total_units = if segment_length_mm > 0.0 {
        ceil_tolerant(linear_height_mm / segment_length_mm) as u32
    } else {
        1
    };

    PackingSolution {
        cols,
        rows,
        rotated: false,
        item_width_mm: item_w,
        item_height_mm: item_h,
        spacing_mm,
        per_unit: cols,
        total_units,
        roll: Some(RollRun {
            linear_height_mm,
            total_produced,
        }),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductionMode;

    fn dtf() -> &'static SheetTemplate {
        ProductionMode::DtfUv.template()
    }

    #[test]
    fn test_quantity_mode_rounds_up_to_full_rows() {
        let solution = pack_roll(
            &ItemSpec::new(4.0, 4.0),
            dtf(),
            5.0,
            DemandSpec::Quantity(100),
            1000.0,
        );
        assert_eq!(solution.cols, 13);
        assert_eq!(solution.rows, 8);
        assert_eq!(solution.total_produced(), 104);
        let run = solution.roll.unwrap();
        assert_eq!(run.linear_height_mm, 355.0);
        assert_eq!(run.linear_meters(), 0.355);
        assert_eq!(solution.total_units, 1);
    }

    #[test]
    fn test_length_mode_fills_the_run() {
        // (500 + 5) / (40 + 5) = 11.2 rows
        let solution = pack_roll(
            &ItemSpec::new(4.0, 4.0),
            dtf(),
            5.0,
            DemandSpec::Length { cm: 50.0 },
            1000.0,
        );
        assert_eq!(solution.rows, 11);
        assert_eq!(solution.total_produced(), 13 * 11);
        assert_eq!(solution.roll.unwrap().linear_height_mm, 500.0);
    }

    #[test]
    fn test_segments_round_up() {
        let solution = pack_roll(
            &ItemSpec::new(10.0, 10.0),
            dtf(),
            0.0,
            DemandSpec::Length { cm: 250.0 },
            1000.0,
        );
        assert_eq!(solution.total_units, 3);

        let solution = pack_roll(
            &ItemSpec::new(10.0, 10.0),
            dtf(),
            0.0,
            DemandSpec::Length { cm: 200.0 },
            1000.0,
        );
        assert_eq!(solution.total_units, 2);
    }

    #[test]
    fn test_item_wider_than_roll_is_infeasible() {
        let solution = pack_roll(
            &ItemSpec::new(60.0, 4.0),
            dtf(),
            5.0,
            DemandSpec::Quantity(10),
            1000.0,
        );
        assert!(!solution.is_feasible());
        assert!(solution.roll.is_none());
    }

    #[test]
    fn test_run_shorter_than_item_is_infeasible() {
        let solution = pack_roll(
            &ItemSpec::new(4.0, 12.0),
            dtf(),
            5.0,
            DemandSpec::Length { cm: 10.0 },
            1000.0,
        );
        assert!(!solution.is_feasible());
    }

    #[test]
    fn test_runaway_length_is_infeasible() {
        // 1e12 mm of 45 mm rows overflows the row count
        let solution = pack_roll(
            &ItemSpec::new(4.0, 4.0),
            dtf(),
            5.0,
            DemandSpec::Length { cm: 1e11 },
            1000.0,
        );
        assert!(!solution.is_feasible());

        // 13 columns x 2.2 million rows fits u32 but not one document
        let solution = pack_roll(
            &ItemSpec::new(4.0, 4.0),
            dtf(),
            5.0,
            DemandSpec::Length { cm: 1e7 },
            1000.0,
        );
        assert!(!solution.is_feasible());
    }

    #[test]
    fn test_microscopic_item_is_infeasible() {
        let solution = pack_roll(
            &ItemSpec::new(1e-8, 1e-8),
            dtf(),
            0.0,
            DemandSpec::Quantity(10),
            1000.0,
        );
        assert!(!solution.is_feasible());
    }

    #[test]
    fn test_roll_never_rotates() {
        // Turning this item would fit more columns, but rolls keep orientation
        let solution = pack_roll(
            &ItemSpec::new(30.0, 5.0),
            dtf(),
            5.0,
            DemandSpec::Quantity(10),
            1000.0,
        );
        assert!(!solution.rotated);
        assert_eq!(solution.cols, 1);
        assert_eq!(solution.rows, 10);
    }
}
