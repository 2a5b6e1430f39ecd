//! Cut geometry and the per-sticker definition groups

use crate::constants::{CUT_LINE_COLOR, CUT_LINE_WIDTH, OUTLINE_SPACE};
use crate::layout::PackingSolution;
use svg::Node;
use svg::node::element::{Ellipse, Group, Image, Path, Rectangle, Use};

/// Resolved cut line for one sticker
#[derive(Debug, Clone, PartialEq)]
pub enum CutGeometry {
    Rectangle,
    /// Rectangle with rounded corners (radius in mm)
    Rounded { radius_mm: f64 },
    /// Ellipse inscribed in the tile
    Ellipse,
    /// Path data in a normalized 100×100 space
    Outline(String),
}

/// Size and orientation of one tile as it sits on the medium
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TileFrame {
    /// Tiled width (mm)
    pub width: f64,
    /// Tiled height (mm)
    pub height: f64,
    pub rotated: bool,
}

impl TileFrame {
    pub fn of(solution: &PackingSolution) -> Self {
        Self {
            width: solution.item_width_mm,
            height: solution.item_height_mm,
            rotated: solution.rotated,
        }
    }

    /// Width and height of the item before it was turned
    pub fn upright(&self) -> (f64, f64) {
        if self.rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Transform turning upright content into the tile, if it is rotated
    pub fn upright_transform(&self) -> Option<String> {
        self.rotated
            .then(|| format!("translate({} 0) rotate(90)", self.width))
    }
}

fn stroked<T: Node>(mut element: T) -> Box<dyn Node> {
    element.assign("id", "cut-shape");
    element.assign("fill", "none");
    element.assign("stroke", CUT_LINE_COLOR);
    element.assign("stroke-width", CUT_LINE_WIDTH);
    Box::new(element)
}

/// The `#cut-shape` definition for a tile.
pub(crate) fn cut_shape(geometry: &CutGeometry, frame: &TileFrame) -> Box<dyn Node> {
    match geometry {
        CutGeometry::Rectangle => stroked(
            Rectangle::new()
                .set("width", frame.width)
                .set("height", frame.height),
        ),
        CutGeometry::Rounded { radius_mm } => stroked(
            Rectangle::new()
                .set("width", frame.width)
                .set("height", frame.height)
                .set("rx", *radius_mm)
                .set("ry", *radius_mm),
        ),
        CutGeometry::Ellipse => stroked(
            Ellipse::new()
                .set("cx", frame.width / 2.0)
                .set("cy", frame.height / 2.0)
                .set("rx", frame.width / 2.0)
                .set("ry", frame.height / 2.0),
        ),
        CutGeometry::Outline(d) => {
            let (width, height) = frame.upright();
            let scale = format!(
                "scale({} {})",
                width / OUTLINE_SPACE,
                height / OUTLINE_SPACE
            );
            let transform = match frame.upright_transform() {
                Some(turn) => format!("{} {}", turn, scale),
                None => scale,
            };
            stroked(Path::new().set("d", d.as_str()).set("transform", transform))
        }
    }
}

/// The `#artwork` group: optional background fill under the image.
pub(crate) fn artwork_group(href: &str, background: Option<&str>, frame: &TileFrame) -> Group {
    let (width, height) = frame.upright();
    let mut group = Group::new().set("id", "artwork");
    if let Some(transform) = frame.upright_transform() {
        group = group.set("transform", transform);
    }
    if let Some(fill) = background {
        group = group.add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", fill),
        );
    }
    group.add(
        Image::new()
            .set("href", href)
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("preserveAspectRatio", "xMidYMid slice"),
    )
}

/// The `#sticker` group placed once per tile.
pub(crate) fn sticker_group(artwork: Option<Group>) -> Group {
    let group = Group::new().set("id", "sticker");
    let group = match artwork {
        Some(artwork) => group.add(artwork),
        None => group,
    };
    group.add(Use::new().set("href", "#cut-shape"))
}
