//! Registration marks for sheet-fed imposition
//!
//! Marks are L-shaped corners drawn just outside the printable area so the
//! cutter can register the sheet. The plotter template adds two ticks per
//! side. Roll-fed templates have no marks.

use crate::catalog::SheetTemplate;
use crate::constants::{INTERMEDIATE_TICK_HALF_MM, MARK_COLOR};
use svg::node::element::{Group, Path};

/// Build the registration-marks group for a template.
///
/// The group is always present; it is empty when the template carries no
/// marks.
pub fn registration_marks(template: &SheetTemplate) -> Group {
    let group = Group::new()
        .set("id", "registration-marks")
        .set("stroke", MARK_COLOR)
        .set("stroke-width", template.mark_stroke_mm)
        .set("fill", "none");

    if template.mark_length_mm <= 0.0 {
        return group;
    }

    let mut paths = corner_marks(template);
    if template.intermediate_marks {
        paths.extend(intermediate_marks(template));
    }

    paths
        .into_iter()
        .fold(group, |group, d| group.add(Path::new().set("d", d)))
}

/// Path data for the four corner marks
fn corner_marks(template: &SheetTemplate) -> Vec<String> {
    let len = template.mark_length_mm;
    let left = template.printable_x_mm;
    let top = template.printable_y_mm;
    let right = template.printable_right_mm();
    let bottom = template.printable_bottom_mm();

    vec![
        format!("M{},{} H{} V{}", left - len, top, left, top - len),
        format!("M{},{} H{} V{}", right + len, top, right, top - len),
        format!("M{},{} H{} V{}", left - len, bottom, left, bottom + len),
        format!("M{},{} H{} V{}", right + len, bottom, right, bottom + len),
    ]
}

/// Path data for the ticks at one and two thirds of the printable height
fn intermediate_marks(template: &SheetTemplate) -> Vec<String> {
    let len = template.mark_length_mm;
    let left = template.printable_x_mm;
    let right = template.printable_right_mm();
    let top = template.printable_y_mm;
    let height = template.printable_height_mm;

    let mut paths = Vec::with_capacity(8);
    for y in [top + height / 3.0, top + 2.0 * height / 3.0] {
        for (edge, outer) in [(left, left - len), (right, right + len)] {
            paths.push(format!("M{},{} H{}", outer, y, edge));
            paths.push(format!(
                "M{},{} V{}",
                edge,
                y - INTERMEDIATE_TICK_HALF_MM,
                y + INTERMEDIATE_TICK_HALF_MM
            ));
        }
    }
    paths
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductionMode;

    #[test]
    fn test_press_corner_marks() {
        let paths = corner_marks(ProductionMode::Press.template());
        assert_eq!(paths[0], "M5,45 H15 V35");
        assert_eq!(paths[1], "M325,45 H315 V35");
        assert_eq!(paths[2], "M5,465 H15 V475");
        assert_eq!(paths[3], "M325,465 H315 V475");
    }

    #[test]
    fn test_plotter_intermediate_ticks() {
        let paths = intermediate_marks(ProductionMode::Plotter.template());
        assert_eq!(paths.len(), 8);
        // printable height 1400 from y = 50: thirds fall near 516.67 and 983.33
        assert!(paths[0].starts_with("M40,516.66"));
        assert!(paths[0].ends_with("H50"));
        assert!(paths[1].starts_with("M50,511.66"));
        assert!(paths[2].starts_with("M560,516.66"));
        assert!(paths[4].starts_with("M40,983.33"));
    }

    #[test]
    fn test_marks_group_counts() {
        let press = registration_marks(ProductionMode::Press.template()).to_string();
        assert_eq!(press.matches("<path").count(), 4);

        let plotter = registration_marks(ProductionMode::Plotter.template()).to_string();
        assert_eq!(plotter.matches("<path").count(), 12);

        for mode in [ProductionMode::DtfUv, ProductionMode::HoloUv] {
            let roll = registration_marks(mode.template()).to_string();
            assert!(roll.contains("registration-marks"));
            assert!(!roll.contains("<path"));
        }
    }
}
