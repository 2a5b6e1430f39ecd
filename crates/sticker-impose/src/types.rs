use crate::constants::cm_to_mm;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid work calendar: {0}")]
    Calendar(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("The sticker does not fit on the selected medium")]
    Infeasible,
    #[error("Print output requires artwork")]
    MissingArtwork,
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Production technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductionMode {
    /// Sheet-fed digital press
    #[default]
    Press,
    /// Sheet-fed inkjet plotter
    Plotter,
    /// Roll-fed UV printer, DTF film
    DtfUv,
    /// Roll-fed UV printer, holographic film
    HoloUv,
}

impl ProductionMode {
    pub const ALL: [ProductionMode; 4] = [
        ProductionMode::Press,
        ProductionMode::Plotter,
        ProductionMode::DtfUv,
        ProductionMode::HoloUv,
    ];

    /// Whether the mode prints on a continuous roll
    pub fn is_roll_fed(self) -> bool {
        matches!(self, ProductionMode::DtfUv | ProductionMode::HoloUv)
    }

    /// Short identifier used in file names
    pub fn tag(self) -> &'static str {
        self.profile().tag
    }

    pub fn name(self) -> &'static str {
        self.profile().name
    }
}

/// Lamination applied after printing (sheet-fed only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Finish {
    #[default]
    None,
    Gloss,
    Matte,
}

impl Finish {
    pub fn name(self) -> &'static str {
        match self {
            Finish::None => "No finish",
            Finish::Gloss => "Gloss lamination",
            Finish::Matte => "Matte lamination",
        }
    }
}

/// Cut line selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutShape {
    /// Outline path supplied by the contour service
    Contour,
    #[default]
    Rectangle,
    RoundedRectangle,
    /// Ellipse inscribed in the item (a circle for square items)
    Ellipse,
}

/// How the demand of a roll-fed job is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputMode {
    #[default]
    Quantity,
    Length,
}

/// What the emitted document is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputIntent {
    /// Artwork layered under the cut geometry
    Print,
    /// Cut geometry only
    Cut,
}

impl OutputIntent {
    pub fn label(self) -> &'static str {
        match self {
            OutputIntent::Print => "PRINT",
            OutputIntent::Cut => "CUT",
        }
    }
}

/// Physical size of one sticker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpec {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl ItemSpec {
    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self {
            width_cm,
            height_cm,
        }
    }

    pub fn width_mm(&self) -> f64 {
        cm_to_mm(self.width_cm)
    }

    pub fn height_mm(&self) -> f64 {
        cm_to_mm(self.height_cm)
    }

    /// Both dimensions are usable for computation
    pub fn is_valid(&self) -> bool {
        self.width_cm > 0.0 && self.height_cm > 0.0
    }
}

/// The amount of output requested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemandSpec {
    /// A number of stickers
    Quantity(u32),
    /// A run length in centimeters (roll-fed only)
    Length { cm: f64 },
}
