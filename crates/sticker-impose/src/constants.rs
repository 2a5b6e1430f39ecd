//! Shared constants for sticker imposition
//!
//! This module centralizes the production numbers used throughout
//! layout, pricing, scheduling and rendering.

use crate::pricing::PricingTier;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per centimeter
pub const MM_PER_CM: f64 = 10.0;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Convert centimeters to millimeters
#[inline]
pub fn cm_to_mm(cm: f64) -> f64 {
    cm * MM_PER_CM
}

/// Tolerance used when rounding derived lengths up to whole billing units,
/// so that 70.000000001 cm still counts as 7 blocks.
pub const ROUNDING_EPSILON: f64 = 1e-9;

/// Round up, ignoring floating point noise just above an integer
#[inline]
pub fn ceil_tolerant(value: f64) -> f64 {
    (value - ROUNDING_EPSILON).ceil()
}

// =============================================================================
// Spacing
// =============================================================================

/// Gap between stickers on sheet-fed media (mm)
pub const SHEET_SPACING_MM: f64 = 2.0;

/// Default gap between stickers on roll-fed media (mm)
pub const ROLL_DEFAULT_SPACING_MM: f64 = 5.0;

/// Smallest gap a roll job may request (mm)
pub const ROLL_MIN_SPACING_MM: f64 = 0.0;

/// Largest gap a roll job may request (mm)
pub const ROLL_MAX_SPACING_MM: f64 = 10.0;

/// Length of one billable roll segment (mm)
pub const ROLL_SEGMENT_LENGTH_MM: f64 = 1000.0;

// =============================================================================
// Order Limits
// =============================================================================

/// Largest sticker count a single order may request
pub const MAX_QUANTITY: u32 = 100_000;

/// Longest roll run a single order may request (cm)
pub const MAX_RUN_LENGTH_CM: f64 = 10_000.0;

/// Smallest sticker edge that can be cut (cm)
pub const MIN_ITEM_CM: f64 = 0.5;

/// Most tiles a single imposed document may hold
pub const MAX_TILES_PER_DOCUMENT: u32 = 1_000_000;

// =============================================================================
// Sheet-fed Pricing
// =============================================================================

/// Per-sheet prices for the digital press, keyed on total sheets
pub const PRESS_PRICING_TIERS: &[PricingTier] = &[
    PricingTier::up_to(2, 50.0),
    PricingTier::up_to(9, 35.0),
    PricingTier::up_to(24, 30.0),
    PricingTier::up_to(49, 25.0),
    PricingTier::up_to(99, 20.0),
    PricingTier::ceiling(18.0),
];

/// Per-sheet prices for the inkjet plotter, keyed on total sheets
pub const PLOTTER_PRICING_TIERS: &[PricingTier] = &[
    PricingTier::up_to(1, 350.0),
    PricingTier::up_to(4, 250.0),
    PricingTier::up_to(9, 225.0),
    PricingTier::up_to(24, 200.0),
    PricingTier::ceiling(180.0),
];

/// Lamination surcharge per sheet
pub const FINISH_COST_PER_SHEET: f64 = 10.0;

// =============================================================================
// Roll-fed Pricing
// =============================================================================

/// DTF runs are billed in blocks of this many centimeters
pub const DTF_BLOCK_CM: f64 = 10.0;

/// Price of one DTF block
pub const DTF_BLOCK_PRICE: f64 = 60.0;

/// Requested DTF lengths above this are billed at [`DTF_CAP_PRICE`]
pub const DTF_CAP_CM: f64 = 70.0;

/// Flat price for any requested DTF length above [`DTF_CAP_CM`]
pub const DTF_CAP_PRICE: f64 = 450.0;

/// Lower bound (exclusive) of the "complete the meter" offer window (cm)
pub const DTF_METER_OFFER_MIN_CM: f64 = 61.0;

/// Upper bound (exclusive) of the "complete the meter" offer window (cm)
pub const DTF_METER_OFFER_MAX_CM: f64 = 100.0;

/// Flat price offered for a full DTF meter
pub const DTF_METER_OFFER_PRICE: f64 = 500.0;

/// Protective container surcharge
pub const DTF_CONTAINER_COST: f64 = 35.0;

/// HOLO runs are billed per started meter
pub const HOLO_PRICE_PER_METER: f64 = 900.0;

// =============================================================================
// Production Time
// =============================================================================

/// Press print time per sheet (minutes)
pub const PRESS_PRINT_MINUTES_PER_SHEET: u32 = 10;

/// Plotter print time per sheet (minutes)
pub const PLOTTER_PRINT_MINUTES_PER_SHEET: u32 = 30;

/// Lamination time per sheet (minutes)
pub const FINISH_MINUTES_PER_SHEET: u32 = 5;

/// DTF meters billed at the initial rate
pub const DTF_INITIAL_METERS: f64 = 2.0;

/// DTF minutes per meter within the initial meters
pub const DTF_INITIAL_MINUTES_PER_METER: f64 = 60.0;

/// DTF minutes per meter beyond the initial meters
pub const DTF_EXTRA_MINUTES_PER_METER: f64 = 45.0;

/// No job is promised in less than this (minutes)
pub const MINIMUM_PRODUCTION_MINUTES: u32 = 120;

// =============================================================================
// Marks and Cut Lines
// =============================================================================

/// Half-length of the tick crossing an intermediate plotter mark (mm)
pub const INTERMEDIATE_TICK_HALF_MM: f64 = 5.0;

/// Stroke color for cut geometry
pub const CUT_LINE_COLOR: &str = "cyan";

/// Stroke width for cut geometry
pub const CUT_LINE_WIDTH: &str = "0.05mm";

/// Stroke color for registration marks
pub const MARK_COLOR: &str = "black";

/// Side length of the normalized outline coordinate space
pub const OUTLINE_SPACE: f64 = 100.0;

// =============================================================================
// Artwork
// =============================================================================

/// Recommended density for press and roll output (dots per inch)
pub const HIGH_DENSITY_DPI: f64 = 300.0;

/// Recommended density for plotter output (dots per inch)
pub const PLOTTER_DPI: f64 = 150.0;
