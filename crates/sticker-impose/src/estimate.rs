use crate::layout::{PackingSolution, calculate_layout};
use crate::options::DesignConfig;
use crate::pricing::{CostBreakdown, price};
use crate::schedule::{Clock, WorkCalendar, delivery_for, production_minutes};
use crate::types::*;
use chrono::NaiveDateTime;
use std::fmt;

/// Everything known about an order before it is produced
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionEstimate {
    pub mode: ProductionMode,
    pub item: ItemSpec,
    pub demand: DemandSpec,
    pub solution: PackingSolution,
    pub cost: CostBreakdown,
    /// `None` for batch-delivered modes and infeasible layouts
    pub production_minutes: Option<u32>,
    /// `None` when the layout cannot be produced
    pub delivery: Option<NaiveDateTime>,
}

impl ProductionEstimate {
    pub fn is_feasible(&self) -> bool {
        self.solution.is_feasible()
    }

    /// Plain text order summary for outbound messages
    pub fn quote_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProductionEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.mode.profile();

        writeln!(f, "Mode: {}", profile.name)?;
        writeln!(f, "Size: {} × {} cm", self.item.width_cm, self.item.height_cm)?;

        if !self.is_feasible() {
            return writeln!(f, "This sticker cannot be produced on the selected medium.");
        }

        match self.demand {
            DemandSpec::Quantity(quantity) => writeln!(f, "Quantity: {}", quantity)?,
            DemandSpec::Length { cm } => writeln!(f, "Run length: {} cm", cm)?,
        }
        match self.solution.roll {
            Some(run) => writeln!(
                f,
                "Produced: {} stickers over {:.3} m",
                run.total_produced,
                run.linear_meters()
            )?,
            None => writeln!(
                f,
                "Layout: {} per sheet, {} {}",
                self.solution.per_unit, self.solution.total_units, profile.unit_name
            )?,
        }

        for line in &self.cost.lines {
            writeln!(f, "  {}: {:.2}", line.label, line.amount)?;
        }
        writeln!(f, "Total: {:.2}", self.cost.total)?;
        if let Some(offer) = self.cost.meter_offer {
            writeln!(f, "Complete the meter for {:.2}", offer.price)?;
        }
        if let Some(delivery) = self.delivery {
            writeln!(f, "Ready: {}", delivery.format("%A %Y-%m-%d %H:%M"))?;
        }
        Ok(())
    }
}

/// Lay out, price and schedule a configuration.
///
/// Infeasible layouts are not an error: they yield a zero cost and no
/// delivery time.
pub fn estimate(
    config: &DesignConfig,
    calendar: &WorkCalendar,
    clock: &dyn Clock,
) -> Result<ProductionEstimate> {
    config.validate()?;

    let item = config.item();
    let demand = config.demand();
    let solution = calculate_layout(&item, config.mode, demand, config.spacing_mm);
    if !solution.is_feasible() {
        log::warn!(
            "{}×{} cm does not fit on {}",
            item.width_cm,
            item.height_cm,
            config.mode.name()
        );
    }

    let options = config.pricing_options();
    let cost = price(config.mode, &solution, &options);
    let minutes = production_minutes(config.mode, &solution, options.finish);
    let delivery = delivery_for(config.mode, &solution, options.finish, calendar, clock)?;

    Ok(ProductionEstimate {
        mode: config.mode,
        item,
        demand,
        solution,
        cost,
        production_minutes: minutes,
        delivery,
    })
}
