//! Cost estimation
//!
//! Prices are estimates, not binding quotes. Every strategy always produces a
//! number; infeasible packing solutions cost nothing.

use crate::constants::ceil_tolerant;
use crate::layout::PackingSolution;
use crate::types::{DemandSpec, Finish, ProductionMode};

/// One breakpoint of a tier table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingTier {
    /// Inclusive maximum unit count; `None` is the ceiling tier
    pub max_units: Option<u32>,
    pub unit_price: f64,
}

impl PricingTier {
    pub const fn up_to(max_units: u32, unit_price: f64) -> Self {
        Self {
            max_units: Some(max_units),
            unit_price,
        }
    }

    pub const fn ceiling(unit_price: f64) -> Self {
        Self {
            max_units: None,
            unit_price,
        }
    }

    fn covers(&self, units: u32) -> bool {
        self.max_units.is_none_or(|max| units <= max)
    }
}

/// Unit price for a count: the first tier whose maximum is not exceeded,
/// falling back to the last tier.
pub fn tier_price(tiers: &[PricingTier], units: u32) -> f64 {
    tiers
        .iter()
        .find(|tier| tier.covers(units))
        .or_else(|| tiers.last())
        .map_or(0.0, |tier| tier.unit_price)
}

/// How a production mode is billed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingStrategy {
    /// Per-sheet price from a tier table, plus a per-sheet finishing surcharge
    SheetTiers {
        tiers: &'static [PricingTier],
        finish_per_sheet: f64,
    },
    /// Fixed-price blocks of film, with a flat cap for long requested runs
    DtfBlocks(DtfRates),
    /// A fixed price per started meter
    PerMeter { price_per_meter: f64 },
}

/// Rates for block-billed film
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DtfRates {
    pub block_cm: f64,
    pub block_price: f64,
    /// Requested lengths above this are billed at `cap_price`
    pub cap_cm: f64,
    pub cap_price: f64,
    /// Exclusive window (cm) in which the meter offer is shown
    pub offer_min_cm: f64,
    pub offer_max_cm: f64,
    pub offer_price: f64,
    pub container_price: f64,
}

/// Mode-specific inputs that change the price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingOptions {
    pub demand: DemandSpec,
    pub finish: Finish,
    pub container: bool,
}

/// One itemized line of a cost breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CostLine {
    pub label: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
}

impl CostLine {
    fn new(label: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            label: label.into(),
            quantity,
            unit_price,
            amount: quantity * unit_price,
        }
    }

    fn flat(label: impl Into<String>, amount: f64) -> Self {
        Self::new(label, 1.0, amount)
    }
}

/// Informational "complete the meter" offer shown next to a DTF quote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterOffer {
    pub price: f64,
}

/// Itemized cost of an order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostBreakdown {
    pub lines: Vec<CostLine>,
    pub total: f64,
    /// Does not contribute to `total`
    pub meter_offer: Option<MeterOffer>,
}

impl CostBreakdown {
    fn from_lines(lines: Vec<CostLine>) -> Self {
        let total = lines.iter().map(|line| line.amount).sum();
        Self {
            lines,
            total,
            meter_offer: None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0.0
    }
}

/// Price a packing solution under the mode's strategy.
pub fn price(
    mode: ProductionMode,
    solution: &PackingSolution,
    options: &PricingOptions,
) -> CostBreakdown {
    if !solution.is_feasible() {
        return CostBreakdown::default();
    }

    let profile = mode.profile();
    match profile.pricing {
        PricingStrategy::SheetTiers {
            tiers,
            finish_per_sheet,
        } => price_sheets(
            tiers,
            finish_per_sheet,
            profile.unit_name,
            solution,
            options.finish,
        ),
        PricingStrategy::DtfBlocks(rates) => price_dtf(&rates, solution, options),
        PricingStrategy::PerMeter { price_per_meter } => {
            price_per_meter_run(price_per_meter, solution, options)
        }
    }
}

fn price_sheets(
    tiers: &[PricingTier],
    finish_per_sheet: f64,
    unit_name: &str,
    solution: &PackingSolution,
    finish: Finish,
) -> CostBreakdown {
    let sheets = solution.total_units;
    let mut lines = vec![CostLine::new(
        format!("{} {}", sheets, unit_name),
        sheets as f64,
        tier_price(tiers, sheets),
    )];

    if finish != Finish::None {
        lines.push(CostLine::new(
            format!("{} × {}", sheets, finish.name()),
            sheets as f64,
            finish_per_sheet,
        ));
    }

    CostBreakdown::from_lines(lines)
}

fn price_dtf(rates: &DtfRates, solution: &PackingSolution, options: &PricingOptions) -> CostBreakdown {
    let DtfRates {
        block_cm,
        block_price,
        cap_cm,
        cap_price,
        offer_min_cm,
        offer_max_cm,
        offer_price,
        container_price,
    } = *rates;

    let mut meter_offer = None;
    let mut lines = Vec::new();

    match options.demand {
        // Any requested length past the cap is billed at one flat price,
        // however far past it goes.
        DemandSpec::Length { cm } if cm > cap_cm => {
            lines.push(CostLine::flat(format!("Run over {} cm", cap_cm), cap_price));
        }
        DemandSpec::Length { cm } => {
            let blocks = ceil_tolerant(cm / block_cm);
            lines.push(CostLine::new(
                format!("{} × {} cm blocks", blocks, block_cm),
                blocks,
                block_price,
            ));
        }
        DemandSpec::Quantity(_) => {
            let cm = solution.roll.map_or(0.0, |run| run.linear_cm());
            let blocks = ceil_tolerant(cm / block_cm);
            lines.push(CostLine::new(
                format!("{} × {} cm blocks", blocks, block_cm),
                blocks,
                block_price,
            ));
            if cm > offer_min_cm && cm < offer_max_cm {
                meter_offer = Some(MeterOffer { price: offer_price });
            }
        }
    }

    if options.container {
        lines.push(CostLine::flat("Protective container", container_price));
    }

    CostBreakdown {
        meter_offer,
        ..CostBreakdown::from_lines(lines)
    }
}

fn price_per_meter_run(
    price_per_meter: f64,
    solution: &PackingSolution,
    options: &PricingOptions,
) -> CostBreakdown {
    let cm = match options.demand {
        DemandSpec::Length { cm } => cm,
        DemandSpec::Quantity(_) => solution.roll.map_or(0.0, |run| run.linear_cm()),
    };
    let meters = ceil_tolerant(cm / 100.0);
    CostBreakdown::from_lines(vec![CostLine::new(
        format!("{} m", meters),
        meters,
        price_per_meter,
    )])
}
