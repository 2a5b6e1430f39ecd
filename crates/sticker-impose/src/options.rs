use crate::constants::{
    MAX_QUANTITY, MAX_RUN_LENGTH_CM, MIN_ITEM_CM, ROLL_DEFAULT_SPACING_MM, ROLL_MAX_SPACING_MM,
    ROLL_MIN_SPACING_MM,
};
use crate::pricing::PricingOptions;
use crate::render::CutGeometry;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A complete sticker design and order configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DesignConfig {
    // Demand
    pub quantity: u32,
    pub input_mode: InputMode,
    /// Requested run length for roll-fed length mode (cm)
    pub run_length_cm: f64,

    // Item size
    pub width_cm: f64,
    pub height_cm: f64,

    // Cut line
    pub shape: CutShape,
    pub corner_radius_mm: f64,
    /// Outline in a normalized 100×100 space, from the contour service
    pub cut_path: Option<String>,
    pub background_color: Option<String>,

    // Production
    pub mode: ProductionMode,
    pub finish: Finish,
    /// Gap between stickers on roll-fed media (mm)
    pub spacing_mm: f64,
    /// Protective container (DTF only)
    pub container: bool,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            quantity: 100,
            input_mode: InputMode::Quantity,
            run_length_cm: 100.0,
            width_cm: 8.0,
            height_cm: 8.0,
            shape: CutShape::Rectangle,
            corner_radius_mm: 5.0,
            cut_path: None,
            background_color: None,
            mode: ProductionMode::Press,
            finish: Finish::None,
            spacing_mm: ROLL_DEFAULT_SPACING_MM,
            container: false,
        }
    }
}

impl DesignConfig {
    pub fn item(&self) -> ItemSpec {
        ItemSpec::new(self.width_cm, self.height_cm)
    }

    /// The demand interpretation active for the current mode.
    ///
    /// Sheet-fed modes always count stickers.
    pub fn demand(&self) -> DemandSpec {
        match self.input_mode {
            InputMode::Length if self.mode.is_roll_fed() => DemandSpec::Length {
                cm: self.run_length_cm,
            },
            _ => DemandSpec::Quantity(self.quantity),
        }
    }

    /// Cut geometry to render; a contour without a path falls back to a rectangle
    pub fn cut_geometry(&self) -> CutGeometry {
        match (self.shape, &self.cut_path) {
            (CutShape::Contour, Some(path)) => CutGeometry::Outline(path.clone()),
            (CutShape::Contour, None) | (CutShape::Rectangle, _) => CutGeometry::Rectangle,
            (CutShape::RoundedRectangle, _) => CutGeometry::Rounded {
                radius_mm: self.corner_radius_mm,
            },
            (CutShape::Ellipse, _) => CutGeometry::Ellipse,
        }
    }

    pub fn pricing_options(&self) -> PricingOptions {
        PricingOptions {
            demand: self.demand(),
            finish: if self.mode.is_roll_fed() {
                Finish::None
            } else {
                self.finish
            },
            container: self.container && self.mode == ProductionMode::DtfUv,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.width_cm > 0.0 && self.height_cm > 0.0) {
            return Err(ImposeError::Config(format!(
                "Sticker size must be positive, got {}×{} cm",
                self.width_cm, self.height_cm
            )));
        }

        if self.width_cm < MIN_ITEM_CM || self.height_cm < MIN_ITEM_CM {
            return Err(ImposeError::Config(format!(
                "Sticker edges must be at least {} cm, got {}×{} cm",
                MIN_ITEM_CM, self.width_cm, self.height_cm
            )));
        }

        if self.corner_radius_mm < 0.0 {
            return Err(ImposeError::Config(
                "Corner radius cannot be negative".to_string(),
            ));
        }

        match self.demand() {
            DemandSpec::Quantity(0) => {
                return Err(ImposeError::Config("Quantity must be at least 1".to_string()));
            }
            DemandSpec::Quantity(quantity) if quantity > MAX_QUANTITY => {
                return Err(ImposeError::Config(format!(
                    "Quantity cannot exceed {}, got {}",
                    MAX_QUANTITY, quantity
                )));
            }
            DemandSpec::Length { cm } if !(cm > 0.0) => {
                return Err(ImposeError::Config(format!(
                    "Run length must be positive, got {} cm",
                    cm
                )));
            }
            DemandSpec::Length { cm } if cm > MAX_RUN_LENGTH_CM => {
                return Err(ImposeError::Config(format!(
                    "Run length cannot exceed {} cm, got {}",
                    MAX_RUN_LENGTH_CM, cm
                )));
            }
            _ => {}
        }

        if self.mode.is_roll_fed()
            && !(ROLL_MIN_SPACING_MM..=ROLL_MAX_SPACING_MM).contains(&self.spacing_mm)
        {
            return Err(ImposeError::Config(format!(
                "Roll spacing must be between {} and {} mm, got {}",
                ROLL_MIN_SPACING_MM, ROLL_MAX_SPACING_MM, self.spacing_mm
            )));
        }

        Ok(())
    }

    /// Serialize to a self-describing JSON record
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Parse a saved record.
    ///
    /// The blob must be an object with a `quantity` field; anything else is
    /// rejected as a whole.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;

        let has_quantity = value
            .as_object()
            .is_some_and(|record| record.contains_key("quantity"));
        if !has_quantity {
            return Err(ImposeError::Config(
                "Saved config is not a record with a quantity".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load a configuration from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Save the configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        tokio::fs::write(path, self.to_json()?).await?;
        Ok(())
    }
}
