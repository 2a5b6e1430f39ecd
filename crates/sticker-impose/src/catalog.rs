//! Static per-mode production data
//!
//! Every production mode resolves once to a [`ModeProfile`] that carries its
//! medium geometry, spacing rule, pricing strategy and scheduling strategy.
//! The rest of the crate dispatches on the profile's data instead of
//! re-checking the mode.

use crate::constants::*;
use crate::pricing::{DtfRates, PricingStrategy};
use crate::schedule::ScheduleStrategy;
use crate::types::ProductionMode;
use chrono::Weekday;

/// Physical geometry of a production medium, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetTemplate {
    /// Physical width of the medium
    pub width_mm: f64,
    /// Physical height of the medium (unbounded for rolls)
    pub height_mm: f64,
    pub printable_width_mm: f64,
    /// Printable height (unbounded for rolls)
    pub printable_height_mm: f64,
    /// Left edge of the printable area
    pub printable_x_mm: f64,
    /// Top edge of the printable area
    pub printable_y_mm: f64,
    /// Length of each registration mark arm (zero for rolls)
    pub mark_length_mm: f64,
    /// Stroke width of registration marks (zero for rolls)
    pub mark_stroke_mm: f64,
    /// Whether two extra ticks are placed on each side of the printable area
    pub intermediate_marks: bool,
}

impl SheetTemplate {
    pub fn printable_right_mm(&self) -> f64 {
        self.printable_x_mm + self.printable_width_mm
    }

    pub fn printable_bottom_mm(&self) -> f64 {
        self.printable_y_mm + self.printable_height_mm
    }
}

/// How the medium is fed through the machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaKind {
    /// Discrete bounded sheets
    Sheet,
    /// Continuous roll, counted in segments of the given length
    Roll { segment_length_mm: f64 },
}

/// Gap between tiled items
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpacingRule {
    Fixed(f64),
    Adjustable { min: f64, max: f64, default: f64 },
}

impl SpacingRule {
    /// Resolve a requested spacing against the rule
    pub fn resolve(self, requested_mm: f64) -> f64 {
        match self {
            SpacingRule::Fixed(spacing) => spacing,
            SpacingRule::Adjustable { min, max, default } => {
                if requested_mm.is_finite() {
                    requested_mm.clamp(min, max)
                } else {
                    default
                }
            }
        }
    }

    pub fn accepts(self, requested_mm: f64) -> bool {
        match self {
            SpacingRule::Fixed(_) => true,
            SpacingRule::Adjustable { min, max, .. } => {
                requested_mm.is_finite() && (min..=max).contains(&requested_mm)
            }
        }
    }
}

/// Everything that varies between production modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    pub mode: ProductionMode,
    /// Short identifier used in file names
    pub tag: &'static str,
    pub name: &'static str,
    /// What one counted unit is called in summaries
    pub unit_name: &'static str,
    pub template: SheetTemplate,
    pub media: MediaKind,
    pub spacing: SpacingRule,
    pub pricing: PricingStrategy,
    pub schedule: ScheduleStrategy,
    /// Artwork density below which a resolution advisory is raised
    pub recommended_dpi: f64,
}

impl ModeProfile {
    pub fn is_roll_fed(&self) -> bool {
        matches!(self.media, MediaKind::Roll { .. })
    }
}

const ROLL_TEMPLATE: SheetTemplate = SheetTemplate {
    width_mm: 600.0,
    height_mm: f64::INFINITY,
    printable_width_mm: 580.0,
    printable_height_mm: f64::INFINITY,
    printable_x_mm: 10.0,
    printable_y_mm: 0.0,
    mark_length_mm: 0.0,
    mark_stroke_mm: 0.0,
    intermediate_marks: false,
};

const ROLL_SPACING: SpacingRule = SpacingRule::Adjustable {
    min: ROLL_MIN_SPACING_MM,
    max: ROLL_MAX_SPACING_MM,
    default: ROLL_DEFAULT_SPACING_MM,
};

static PRESS: ModeProfile = ModeProfile {
    mode: ProductionMode::Press,
    tag: "XEROX",
    name: "Digital press",
    unit_name: "sheets",
    template: SheetTemplate {
        width_mm: 330.0,
        height_mm: 480.0,
        printable_width_mm: 300.0,
        printable_height_mm: 420.0,
        printable_x_mm: 15.0,
        printable_y_mm: 45.0,
        mark_length_mm: 10.0,
        mark_stroke_mm: 0.05,
        intermediate_marks: false,
    },
    media: MediaKind::Sheet,
    spacing: SpacingRule::Fixed(SHEET_SPACING_MM),
    pricing: PricingStrategy::SheetTiers {
        tiers: PRESS_PRICING_TIERS,
        finish_per_sheet: FINISH_COST_PER_SHEET,
    },
    schedule: ScheduleStrategy::PerSheet {
        print_minutes: PRESS_PRINT_MINUTES_PER_SHEET,
        finish_minutes: FINISH_MINUTES_PER_SHEET,
    },
    recommended_dpi: HIGH_DENSITY_DPI,
};

static PLOTTER: ModeProfile = ModeProfile {
    mode: ProductionMode::Plotter,
    tag: "PLOTTER",
    name: "Inkjet plotter",
    unit_name: "sheets",
    template: SheetTemplate {
        width_mm: 600.0,
        height_mm: 1500.0,
        printable_width_mm: 500.0,
        printable_height_mm: 1400.0,
        printable_x_mm: 50.0,
        printable_y_mm: 50.0,
        mark_length_mm: 10.0,
        mark_stroke_mm: 0.05,
        intermediate_marks: true,
    },
    media: MediaKind::Sheet,
    spacing: SpacingRule::Fixed(SHEET_SPACING_MM),
    pricing: PricingStrategy::SheetTiers {
        tiers: PLOTTER_PRICING_TIERS,
        finish_per_sheet: FINISH_COST_PER_SHEET,
    },
    schedule: ScheduleStrategy::PerSheet {
        print_minutes: PLOTTER_PRINT_MINUTES_PER_SHEET,
        finish_minutes: FINISH_MINUTES_PER_SHEET,
    },
    recommended_dpi: PLOTTER_DPI,
};

static DTF_UV: ModeProfile = ModeProfile {
    mode: ProductionMode::DtfUv,
    tag: "DTF",
    name: "UV printer (DTF)",
    unit_name: "roll segments",
    template: ROLL_TEMPLATE,
    media: MediaKind::Roll {
        segment_length_mm: ROLL_SEGMENT_LENGTH_MM,
    },
    spacing: ROLL_SPACING,
    pricing: PricingStrategy::DtfBlocks(DtfRates {
        block_cm: DTF_BLOCK_CM,
        block_price: DTF_BLOCK_PRICE,
        cap_cm: DTF_CAP_CM,
        cap_price: DTF_CAP_PRICE,
        offer_min_cm: DTF_METER_OFFER_MIN_CM,
        offer_max_cm: DTF_METER_OFFER_MAX_CM,
        offer_price: DTF_METER_OFFER_PRICE,
        container_price: DTF_CONTAINER_COST,
    }),
    schedule: ScheduleStrategy::SteppedMeters {
        initial_meters: DTF_INITIAL_METERS,
        initial_minutes_per_meter: DTF_INITIAL_MINUTES_PER_METER,
        extra_minutes_per_meter: DTF_EXTRA_MINUTES_PER_METER,
    },
    recommended_dpi: HIGH_DENSITY_DPI,
};

static HOLO_UV: ModeProfile = ModeProfile {
    mode: ProductionMode::HoloUv,
    tag: "HOLO",
    name: "UV printer (HOLO)",
    unit_name: "roll segments",
    template: ROLL_TEMPLATE,
    media: MediaKind::Roll {
        segment_length_mm: ROLL_SEGMENT_LENGTH_MM,
    },
    spacing: ROLL_SPACING,
    pricing: PricingStrategy::PerMeter {
        price_per_meter: HOLO_PRICE_PER_METER,
    },
    schedule: ScheduleStrategy::WeeklyBatch {
        slot_day: Weekday::Fri,
        slot_hour: 12,
        cutoff_day: Weekday::Wed,
        cutoff_hour: 14,
    },
    recommended_dpi: HIGH_DENSITY_DPI,
};

impl ProductionMode {
    /// Static production data for this mode
    pub fn profile(self) -> &'static ModeProfile {
        match self {
            ProductionMode::Press => &PRESS,
            ProductionMode::Plotter => &PLOTTER,
            ProductionMode::DtfUv => &DTF_UV,
            ProductionMode::HoloUv => &HOLO_UV,
        }
    }

    pub fn template(self) -> &'static SheetTemplate {
        &self.profile().template
    }
}
