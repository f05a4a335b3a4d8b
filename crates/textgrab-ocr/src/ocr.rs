use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result, bail};
use textgrab_config::ocr::{OcrConfig, OcrEngineKind};
use textgrab_core::{ProcessedImage, Recognizer};

/// Runs the `tesseract` CLI, feeding it PNG bytes on stdin.
pub struct TesseractRecognizer {
    program: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(program: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            language: language.into(),
        }
    }

    /// Recognize text from PNG image bytes
    pub fn recognize_png(&self, png: Vec<u8>) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;

        let mut stdin = child.stdin.take().context("tesseract stdin not captured")?;
        // Written from a separate thread so a full stdout pipe cannot deadlock us
        let writer = thread::spawn(move || stdin.write_all(&png));

        let output = child
            .wait_with_output()
            .context("Failed to wait for tesseract")?;
        match writer.join() {
            Ok(result) => result.context("Failed to write image to tesseract")?,
            Err(_) => bail!("tesseract writer thread panicked"),
        }

        if !output.status.success() {
            bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &ProcessedImage) -> Option<String> {
        let start = std::time::Instant::now();
        let result = image
            .to_png()
            .context("Failed to encode PNG")
            .and_then(|png| self.recognize_png(png));

        match result {
            Ok(text) => {
                tracing::debug!("[OCR] tesseract {:?} - {} chars", start.elapsed(), text.len());
                Some(text).filter(|t| !t.trim().is_empty())
            }
            Err(e) => {
                tracing::warn!("[OCR] {:#}", e);
                None
            }
        }
    }
}

#[cfg(windows)]
pub use windows_ocr::WindowsRecognizer;

#[cfg(windows)]
mod windows_ocr {
    use anyhow::{Context, Result};
    use textgrab_core::{ProcessedImage, Recognizer};
    use windows::{
        Globalization::Language,
        Graphics::Imaging::BitmapDecoder,
        Media::Ocr::OcrEngine as WinOcrEngine,
        Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
        core::HSTRING,
    };

    use crate::com::ComGuard;

    /// Windows.Media.Ocr. COM is initialised for the duration of each call
    /// since recognition runs on whichever blocking thread picked it up.
    pub struct WindowsRecognizer {
        language: String,
    }

    impl WindowsRecognizer {
        /// Language tag such as "en" or "ja"
        pub fn new(language: impl Into<String>) -> Self {
            Self {
                language: language.into(),
            }
        }

        fn engine(&self) -> Result<WinOcrEngine> {
            let language = Language::CreateLanguage(&HSTRING::from(self.language.as_str()))
                .context("Failed to create language")?;

            WinOcrEngine::TryCreateFromLanguage(&language)
                .context("Failed to create OCR engine for language")
        }

        /// Recognize text from PNG image bytes
        pub fn recognize_png(&self, image_bytes: &[u8]) -> Result<String> {
            let _com = ComGuard::initialize()?;
            let engine = self.engine()?;

            let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
            let writer =
                DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

            writer
                .WriteBytes(image_bytes)
                .context("Failed to write image bytes")?;
            writer
                .StoreAsync()
                .context("Failed to store async")?
                .get()
                .context("Failed to store data")?;
            writer.FlushAsync().context("Failed to flush")?.get()?;

            stream.Seek(0).context("Failed to seek")?;

            let decoder = BitmapDecoder::CreateAsync(&stream)
                .context("Failed to create decoder async")?
                .get()
                .context("Failed to get decoder")?;

            let bitmap = decoder
                .GetSoftwareBitmapAsync()
                .context("Failed to get bitmap async")?
                .get()
                .context("Failed to get software bitmap")?;

            let result = engine
                .RecognizeAsync(&bitmap)
                .context("Failed to recognize async")?
                .get()
                .context("Failed to get OCR result")?;

            Ok(result.Text().context("Failed to get text")?.to_string())
        }
    }

    impl Recognizer for WindowsRecognizer {
        fn recognize(&self, image: &ProcessedImage) -> Option<String> {
            let result = image
                .to_png()
                .context("Failed to encode PNG")
                .and_then(|png| self.recognize_png(&png));

            match result {
                Ok(text) => Some(text).filter(|t| !t.trim().is_empty()),
                Err(e) => {
                    tracing::warn!("[OCR] {:#}", e);
                    None
                }
            }
        }
    }
}

/// Recognizer selected by `ocr.engine`
pub fn build_recognizer(config: &OcrConfig) -> Arc<dyn Recognizer> {
    match config.engine {
        #[cfg(windows)]
        OcrEngineKind::Windows => Arc::new(WindowsRecognizer::new(config.language.clone())),
        #[cfg(not(windows))]
        OcrEngineKind::Windows => {
            tracing::warn!("Windows OCR is unavailable on this platform, using tesseract");
            Arc::new(TesseractRecognizer::new(
                config.tesseract_path.clone(),
                config.language.clone(),
            ))
        }
        OcrEngineKind::Tesseract => Arc::new(TesseractRecognizer::new(
            config.tesseract_path.clone(),
            config.language.clone(),
        )),
    }
}
