use sticker_impose::layout::{pack_sheets, sheet_fit, tile_placements};
use sticker_impose::*;

fn press_layout(width_cm: f64, height_cm: f64, quantity: u32) -> PackingSolution {
    calculate_layout(
        &ItemSpec::new(width_cm, height_cm),
        ProductionMode::Press,
        DemandSpec::Quantity(quantity),
        0.0,
    )
}

#[test]
fn test_press_eight_centimeter_square() {
    let solution = press_layout(8.0, 8.0, 100);

    assert!(solution.is_feasible());
    assert!(!solution.rotated);
    assert_eq!((solution.cols, solution.rows), (3, 5));
    assert_eq!(solution.per_unit, 15);
    assert_eq!(solution.total_units, 7);
    assert_eq!(solution.spacing_mm, 2.0);
    assert!(solution.roll.is_none());
}

#[test]
fn test_sheet_totals_cover_the_order() {
    for mode in [ProductionMode::Press, ProductionMode::Plotter] {
        for (width, height) in [(2.0, 3.0), (5.5, 7.5), (8.0, 8.0), (12.0, 4.0), (28.0, 40.0)] {
            for quantity in [1, 14, 15, 16, 100, 999, 12_345] {
                let solution = calculate_layout(
                    &ItemSpec::new(width, height),
                    mode,
                    DemandSpec::Quantity(quantity),
                    0.0,
                );
                assert!(solution.is_feasible(), "{width}x{height} on {mode:?}");
                assert!(solution.per_unit * solution.total_units >= quantity);
                assert_eq!(solution.total_units, quantity.div_ceil(solution.per_unit));
            }
        }
    }
}

#[test]
fn test_rotation_only_when_strictly_better() {
    let template = ProductionMode::Press.template();
    for width in 1..=30 {
        for height in 1..=30 {
            let item = ItemSpec::new(width as f64, height as f64);
            let solution = pack_sheets(&item, template, 2.0, 10);
            let as_given = sheet_fit(template, item.width_mm(), item.height_mm(), 2.0);
            let turned = sheet_fit(template, item.height_mm(), item.width_mm(), 2.0);

            if solution.rotated {
                assert!(turned.per_sheet() > as_given.per_sheet());
                assert_eq!(solution.item_width_mm, item.height_mm());
            } else if solution.is_feasible() {
                assert!(turned.per_sheet() <= as_given.per_sheet());
                assert_eq!(solution.item_width_mm, item.width_mm());
            }
        }
    }
}

#[test]
fn test_square_items_never_rotate() {
    for side in [1.0, 3.3, 8.0, 14.9] {
        assert!(!press_layout(side, side, 50).rotated);
    }
}

#[test]
fn test_infeasible_inputs_yield_zero_solution() {
    for solution in [
        press_layout(0.0, 5.0, 10),
        press_layout(5.0, -1.0, 10),
        press_layout(50.0, 50.0, 10),
        press_layout(5.0, 5.0, 0),
    ] {
        assert!(!solution.is_feasible());
        assert_eq!(solution.per_unit, 0);
        assert_eq!(solution.total_units, 0);
        assert_eq!(solution.total_produced(), 0);
    }
}

#[test]
fn test_dtf_quantity_run() {
    let solution = calculate_layout(
        &ItemSpec::new(4.0, 4.0),
        ProductionMode::DtfUv,
        DemandSpec::Quantity(100),
        5.0,
    );

    assert_eq!(solution.cols, 13);
    assert_eq!(solution.rows, 8);
    assert_eq!(solution.per_unit, 13);
    assert_eq!(solution.total_units, 1);
    let run = solution.roll.unwrap();
    assert_eq!(run.total_produced, 104);
    assert_eq!(run.linear_height_mm, 355.0);
    assert!((run.linear_meters() - 0.355).abs() < 1e-12);
}

#[test]
fn test_roll_quantity_overshoots_to_full_rows() {
    for quantity in [1, 12, 13, 14, 100, 1000] {
        let solution = calculate_layout(
            &ItemSpec::new(4.0, 4.0),
            ProductionMode::HoloUv,
            DemandSpec::Quantity(quantity),
            5.0,
        );
        let produced = solution.total_produced();
        assert_eq!(produced, solution.cols * quantity.div_ceil(solution.cols));
        assert!(produced >= quantity);
    }
}

#[test]
fn test_roll_spacing_is_clamped() {
    let item = ItemSpec::new(4.0, 4.0);
    let wide = calculate_layout(&item, ProductionMode::DtfUv, DemandSpec::Quantity(10), 25.0);
    assert_eq!(wide.spacing_mm, 10.0);

    let tight = calculate_layout(&item, ProductionMode::DtfUv, DemandSpec::Quantity(10), 0.0);
    assert_eq!(tight.spacing_mm, 0.0);
    // 580 / 40 = 14.5
    assert_eq!(tight.cols, 14);
}

#[test]
fn test_length_demand_on_sheet_mode_is_infeasible() {
    let solution = calculate_layout(
        &ItemSpec::new(4.0, 4.0),
        ProductionMode::Plotter,
        DemandSpec::Length { cm: 100.0 },
        0.0,
    );
    assert!(!solution.is_feasible());
}

#[test]
fn test_placements_stay_inside_printable_area() {
    for mode in [ProductionMode::Press, ProductionMode::Plotter] {
        let solution = calculate_layout(
            &ItemSpec::new(6.5, 3.5),
            mode,
            DemandSpec::Quantity(40),
            0.0,
        );
        let template = mode.template();
        let tiles = tile_placements(&solution, template);
        assert_eq!(tiles.len() as u32, solution.per_unit);
        for tile in tiles {
            assert!(tile.x_mm >= template.printable_x_mm);
            assert!(tile.y_mm >= template.printable_y_mm);
            assert!(tile.x_mm + solution.item_width_mm <= template.printable_right_mm() + 1e-9);
            assert!(tile.y_mm + solution.item_height_mm <= template.printable_bottom_mm() + 1e-9);
        }
    }
}
