use serde::{Deserialize, Serialize};

fn default_enhance_passes() -> u32 {
    3
}

fn default_contrast() -> f32 {
    1.75
}

fn default_saturation() -> f32 {
    0.0
}

fn default_settle_delay_ms() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Number of crop-and-enhance passes, at least 1
    #[serde(default = "default_enhance_passes")]
    pub enhance_passes: u32,
    #[serde(default = "default_contrast")]
    pub contrast: f32,
    #[serde(default = "default_saturation")]
    pub saturation: f32,
    /// Wait after hiding the overlay before grabbing the screen
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enhance_passes: default_enhance_passes(),
            contrast: default_contrast(),
            saturation: default_saturation(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}
