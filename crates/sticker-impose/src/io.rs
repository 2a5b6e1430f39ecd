//! Document I/O for imposed output

use crate::layout::PackingSolution;
use crate::options::DesignConfig;
use crate::types::*;
use std::path::Path;
use svg::Document;

/// Save an imposed document
pub async fn save_svg(document: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        svg::write(&mut writer, &document)?;
        Ok::<_, ImposeError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// File name for a downloaded imposition:
/// `{quantity}pcs-{width}x{height}cm-{PRINT|CUT}-{MODE}.svg`.
///
/// Length-mode runs report the number of stickers actually produced.
pub fn download_filename(
    config: &DesignConfig,
    solution: &PackingSolution,
    intent: OutputIntent,
) -> String {
    let quantity = match config.demand() {
        DemandSpec::Quantity(quantity) => quantity,
        DemandSpec::Length { .. } => solution.total_produced(),
    };
    format!(
        "{}pcs-{}x{}cm-{}-{}.svg",
        quantity,
        config.width_cm,
        config.height_cm,
        intent.label(),
        config.mode.tag()
    )
}
