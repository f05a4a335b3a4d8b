use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::history::HistoryConfig;
use self::logging::LoggingConfig;
use self::ocr::{OcrConfig, OcrEngineKind};
use self::speech::SpeechConfig;

pub mod capture;
pub mod history;
pub mod logging;
pub mod ocr;
pub mod settings;
pub mod speech;

pub const APP_DIR_NAME: &str = "textgrab";

fn default_delta_time() -> u64 {
    16
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub speech: SpeechConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,

    /// UI thread poll interval (hotkeys and backend events), in ms
    #[serde(default = "default_delta_time")]
    pub delta_time: u64,
    /// Override for the persisted settings file
    pub settings_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            ocr: OcrConfig::default(),
            speech: SpeechConfig::default(),
            history: HistoryConfig::default(),
            logging: LoggingConfig::default(),
            delta_time: default_delta_time(),
            settings_path: None,
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Some(delta_time) = env::var("DELTA_TIME_MS").ok().and_then(|v| v.parse().ok()) {
            self.delta_time = delta_time;
        }

        if let Ok(engine) = env::var("TEXTGRAB_OCR_ENGINE") {
            match engine.parse::<OcrEngineKind>() {
                Ok(kind) => self.ocr.engine = kind,
                Err(e) => tracing::warn!("Ignoring TEXTGRAB_OCR_ENGINE: {}", e),
            }
        }

        if let Ok(language) = env::var("TEXTGRAB_OCR_LANGUAGE") {
            self.ocr.language = language;
        }

        if let Some(passes) = env::var("TEXTGRAB_ENHANCE_PASSES")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.capture.enhance_passes = passes;
        }
    }

    /// `<config dir>/textgrab`
    pub fn app_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    pub fn settings_file(&self) -> Option<PathBuf> {
        self.settings_path
            .clone()
            .or_else(|| Self::app_dir().map(|dir| dir.join("settings.json")))
    }
}
