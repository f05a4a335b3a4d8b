//! Capture the primary screen and run OCR on it:
//! cargo run -p textgrab-ocr --bin test_ocr

use anyhow::Result;
use textgrab_config::Config;
use textgrab_core::Recognizer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::new();

    tracing::info!("Capturing primary screen...");
    let start = std::time::Instant::now();
    let image = textgrab_ocr::capture_primary_screen()?;
    tracing::info!("{}x{} in {:?}", image.width(), image.height(), start.elapsed());

    std::fs::write("test_capture.png", image.to_png()?)?;
    tracing::info!("Saved to test_capture.png");

    tracing::info!("Running OCR ({}, {})...", config.ocr.engine, config.ocr.language);
    let recognizer = textgrab_ocr::build_recognizer(&config.ocr);
    let start = std::time::Instant::now();
    match recognizer.recognize(&image) {
        Some(text) => {
            tracing::info!("{:?} - {} chars", start.elapsed(), text.len());
            for line in text.lines().take(5) {
                tracing::info!("> {}", line);
            }
        }
        None => tracing::info!("No text recognized"),
    }

    Ok(())
}
