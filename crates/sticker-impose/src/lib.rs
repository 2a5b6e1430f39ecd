pub mod artwork;
pub mod catalog;
pub mod constants;
mod estimate;
mod io;
pub mod layout;
pub mod marks;
mod options;
pub mod pricing;
pub mod render;
pub mod schedule;
pub mod services;
#[cfg(feature = "serde")]
pub mod store;
mod types;

pub use artwork::Artwork;
pub use catalog::{MediaKind, ModeProfile, SheetTemplate, SpacingRule};
pub use estimate::{ProductionEstimate, estimate};
pub use io::{download_filename, save_svg};
pub use layout::{PackingSolution, RollRun, calculate_layout};
pub use options::*;
pub use pricing::{CostBreakdown, CostLine, MeterOffer, PricingOptions, price};
pub use render::{CutGeometry, StickerArt, render_imposition};
pub use schedule::{Clock, FixedClock, SystemClock, WorkCalendar, WorkWindow};
pub use services::{Advisory, Design, ServiceOutcome};
pub use types::*;
