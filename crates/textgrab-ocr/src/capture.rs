use anyhow::{Context, Result};
use image::RgbaImage;
use textgrab_core::{CaptureError, RawImage, ScreenSource};
use xcap::Monitor;

/// Capture the entire primary monitor, falling back to the first one
pub fn capture_primary_screen() -> Result<RawImage> {
    let monitors = Monitor::all().context("Failed to get monitors")?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .or(monitors.first())
        .context("No monitor found")?;

    let image = monitor.capture_image().context("Failed to capture screen")?;
    let (width, height) = (image.width(), image.height());

    // xcap hands back its own image buffer type; rebuild it from raw RGBA
    let pixels = RgbaImage::from_raw(width, height, image.into_raw())
        .context("Screen buffer size does not match its dimensions")?;
    Ok(RawImage::new(pixels))
}

/// The primary display as a [`ScreenSource`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryDisplay;

impl ScreenSource for PrimaryDisplay {
    fn acquire(&self) -> Result<RawImage, CaptureError> {
        let start = std::time::Instant::now();
        let image =
            capture_primary_screen().map_err(|e| CaptureError::Acquisition(format!("{e:#}")))?;
        tracing::debug!(
            "Captured {}x{} in {:?}",
            image.width(),
            image.height(),
            start.elapsed()
        );
        Ok(image)
    }
}
