//! External collaborators: contour tracing and background removal
//!
//! Both services are fallible and asynchronous. Their outcome is applied to a
//! [`Design`] only on success; an empty or failed outcome leaves the design as
//! it was and produces an [`Advisory`].

use crate::artwork::Artwork;
use crate::options::DesignConfig;
use crate::types::CutShape;
use std::fmt;
use std::future::Future;

/// Resolved result of a collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome<T> {
    Success(T),
    /// The service ran but produced nothing usable
    Empty,
    Failed(String),
}

/// Replacement image returned by background removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Traces the artwork and returns path data in a normalized 100×100 space
pub trait ContourService {
    fn trace(&self, artwork: &Artwork) -> impl Future<Output = ServiceOutcome<String>> + Send;
}

/// Removes the artwork background and returns a new image
pub trait BackgroundRemovalService {
    fn remove_background(
        &self,
        artwork: &Artwork,
    ) -> impl Future<Output = ServiceOutcome<ImagePayload>> + Send;
}

/// Non-fatal notice surfaced next to a quote
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    LowResolution { dpi: f64, recommended: f64 },
    CollaboratorFailed { service: &'static str, reason: String },
    NoResult { service: &'static str },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LowResolution { dpi, recommended } => write!(
                f,
                "Artwork prints at {:.0} dpi; {:.0} dpi is recommended",
                dpi, recommended
            ),
            Advisory::CollaboratorFailed { service, reason } => {
                write!(f, "{} failed: {}", service, reason)
            }
            Advisory::NoResult { service } => write!(f, "{} returned no result", service),
        }
    }
}

const CONTOUR: &str = "Contour tracing";
const BACKGROUND_REMOVAL: &str = "Background removal";

fn soft_failure<T>(service: &'static str, outcome: ServiceOutcome<T>) -> Result<T, Advisory> {
    let advisory = match outcome {
        ServiceOutcome::Success(value) => return Ok(value),
        ServiceOutcome::Empty => Advisory::NoResult { service },
        ServiceOutcome::Failed(reason) => Advisory::CollaboratorFailed { service, reason },
    };
    log::warn!("{}", advisory);
    Err(advisory)
}

/// A configuration together with its current artwork
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub config: DesignConfig,
    pub artwork: Option<Artwork>,
}

impl Design {
    pub fn new(config: DesignConfig, artwork: Option<Artwork>) -> Self {
        Self { config, artwork }
    }

    /// Use a traced outline as the cut line
    pub fn apply_contour(&mut self, outcome: ServiceOutcome<String>) -> Option<Advisory> {
        match soft_failure(CONTOUR, outcome) {
            Ok(path) if !path.trim().is_empty() => {
                self.config.cut_path = Some(path);
                self.config.shape = CutShape::Contour;
                None
            }
            Ok(_) => Some(Advisory::NoResult { service: CONTOUR }),
            Err(advisory) => Some(advisory),
        }
    }

    /// Swap in the cleaned-up image.
    ///
    /// A traced outline no longer matches the new image, so it is dropped.
    pub fn apply_background_removal(
        &mut self,
        outcome: ServiceOutcome<ImagePayload>,
    ) -> Option<Advisory> {
        let payload = match soft_failure(BACKGROUND_REMOVAL, outcome) {
            Ok(payload) => payload,
            Err(advisory) => return Some(advisory),
        };

        match Artwork::from_bytes(&payload.bytes, Some(&payload.mime)) {
            Ok(artwork) => {
                self.artwork = Some(artwork);
                self.config.cut_path = None;
                if self.config.shape == CutShape::Contour {
                    self.config.shape = CutShape::Rectangle;
                }
                None
            }
            Err(e) => {
                let advisory = Advisory::CollaboratorFailed {
                    service: BACKGROUND_REMOVAL,
                    reason: e.to_string(),
                };
                log::warn!("{}", advisory);
                Some(advisory)
            }
        }
    }
}

/// Trace the current artwork and apply the result
pub async fn request_contour<S: ContourService>(
    service: &S,
    design: &mut Design,
) -> Option<Advisory> {
    let outcome = match &design.artwork {
        Some(artwork) => service.trace(artwork).await,
        None => ServiceOutcome::Empty,
    };
    design.apply_contour(outcome)
}

/// Remove the current artwork's background and apply the result
pub async fn request_background_removal<S: BackgroundRemovalService>(
    service: &S,
    design: &mut Design,
) -> Option<Advisory> {
    let outcome = match &design.artwork {
        Some(artwork) => service.remove_background(artwork).await,
        None => ServiceOutcome::Empty,
    };
    design.apply_background_removal(outcome)
}
