/// Failures that end the current capture attempt or a distribution step.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Screen acquisition failed: {0}")]
    Acquisition(String),

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Selection overlay unavailable: {0}")]
    Surface(String),
}

/// An enhancement pass could not be applied; the pipeline falls back to
/// the unfiltered image for that pass.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid filter parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("Filter failed: {0}")]
    Filter(String),
}
