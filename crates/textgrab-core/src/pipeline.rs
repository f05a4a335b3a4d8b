//! Image enhancement ahead of recognition.
//!
//! One pass filters the whole input (desaturate + contrast boost) and then
//! crops it; filtering first keeps the crop edges free of filter artifacts.
//! The first pass crops the full screen to the selection, later passes run
//! on the previous result with the same window moved to the origin.

use std::borrow::Cow;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage, imageops};
use textgrab_config::capture::CaptureConfig;
use textgrab_types::{CaptureRegion, Rectangle};

use crate::error::EnhanceError;

/// RGBA8 pixels with a top-left origin. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    pixels: RgbaImage,
}

/// Output of an enhancement pass; same shape as its input so passes chain.
pub type ProcessedImage = RawImage;

impl RawImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.pixels.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

pub trait ImageFilter: Send + Sync {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, EnhanceError>;
}

/// Saturation and contrast adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorControls {
    pub saturation: f32,
    pub contrast: f32,
}

impl Default for ColorControls {
    fn default() -> Self {
        Self {
            saturation: 0.0,
            contrast: 1.75,
        }
    }
}

impl ColorControls {
    fn adjust(&self, pixel: &Rgba<u8>) -> Rgba<u8> {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        // Rec.709 luma
        let luma = 0.2125 * r + 0.7154 * g + 0.0721 * b;

        let channel = |c: f32| {
            let saturated = luma + self.saturation * (c - luma);
            let contrasted = (saturated - 0.5) * self.contrast + 0.5;
            (contrasted.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        Rgba([channel(r), channel(g), channel(b), a])
    }
}

impl ImageFilter for ColorControls {
    fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, EnhanceError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EnhanceError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        if !self.contrast.is_finite() {
            return Err(EnhanceError::InvalidParameter {
                name: "contrast",
                value: self.contrast,
            });
        }
        if !self.saturation.is_finite() {
            return Err(EnhanceError::InvalidParameter {
                name: "saturation",
                value: self.saturation,
            });
        }

        let mut output = image.clone();
        for pixel in output.pixels_mut() {
            *pixel = self.adjust(pixel);
        }
        Ok(output)
    }
}

/// One enhancement pass: filter the whole image, then crop to `window`.
/// A failing filter degrades to a plain crop of the input.
pub fn crop_and_enhance(
    image: &RawImage,
    window: &Rectangle,
    filter: &dyn ImageFilter,
) -> ProcessedImage {
    let filtered = match filter.apply(image.as_rgba()) {
        Ok(pixels) => Cow::Owned(pixels),
        Err(e) => {
            tracing::warn!("Enhancement degraded, using unfiltered image: {}", e);
            Cow::Borrowed(image.as_rgba())
        }
    };

    crop(&filtered, window)
}

/// Composite `pixels` into a transparent buffer the size of `window`,
/// offset by `-window.origin`.
pub fn crop(pixels: &RgbaImage, window: &Rectangle) -> RawImage {
    let region = CaptureRegion::from(*window);
    let mut canvas = RgbaImage::new(region.width, region.height);
    imageops::replace(
        &mut canvas,
        pixels,
        -i64::from(region.x),
        -i64::from(region.y),
    );
    RawImage::new(canvas)
}

pub struct EnhancementPipeline {
    passes: u32,
    filter: Box<dyn ImageFilter>,
}

impl EnhancementPipeline {
    pub fn new(passes: u32, filter: Box<dyn ImageFilter>) -> Self {
        if passes == 0 {
            tracing::warn!("Enhancement pass count 0 raised to 1");
        }
        Self {
            passes: passes.max(1),
            filter,
        }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(
            config.enhance_passes,
            Box::new(ColorControls {
                saturation: config.saturation,
                contrast: config.contrast,
            }),
        )
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Crop `screen` to `selection` and enhance it `passes` times
    pub fn process(&self, screen: &RawImage, selection: &Rectangle) -> ProcessedImage {
        let mut current = crop_and_enhance(screen, selection, self.filter.as_ref());

        let window = selection.at_origin();
        for _ in 1..self.passes {
            current = crop_and_enhance(&current, &window, self.filter.as_ref());
        }

        tracing::debug!(
            "Enhanced {}x{} selection in {} pass(es)",
            current.width(),
            current.height(),
            self.passes
        );
        current
    }
}
