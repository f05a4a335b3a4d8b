//! Collaborator doubles and a fully wired backend for the flow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{Rgba, RgbaImage};
use textgrab_config::Config;
use textgrab_config::settings::MemoryStore;
use textgrab_core::{
    CaptureError, ChannelSurface, Clipboard, ProcessedImage, RawImage, Recognizer, ScreenSource,
    Services, Speaker,
};
use textgrab_types::AppEvent;

use crate::controller::{AppController, ChannelSet};
use crate::state::AppState;

pub struct StaticScreen;

impl ScreenSource for StaticScreen {
    fn acquire(&self) -> Result<RawImage, CaptureError> {
        Ok(RawImage::new(RgbaImage::from_pixel(
            640,
            480,
            Rgba([255, 255, 255, 255]),
        )))
    }
}

/// Answers with a fixed string after an optional delay
pub struct SlowRecognizer {
    pub text: Option<String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl Recognizer for SlowRecognizer {
    fn recognize(&self, _image: &ProcessedImage) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.text.clone()
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Mutex<Option<String>>,
    pub writes: AtomicUsize,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), CaptureError> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct MuteSpeaker {
    pub spoken: Mutex<Vec<String>>,
}

impl Speaker for MuteSpeaker {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

pub struct Backend {
    pub state: Arc<AppState>,
    pub controller: AppController,
    pub to_ui: kanal::Receiver<AppEvent>,
    pub recognizer: Arc<SlowRecognizer>,
    pub clipboard: Arc<MemoryClipboard>,
    pub speaker: Arc<MuteSpeaker>,
}

impl Backend {
    pub fn new(text: Option<&str>, delay: Duration) -> Self {
        let mut config = Config::default();
        config.capture.settle_delay_ms = 0;
        config.capture.enhance_passes = 1;

        let channels = ChannelSet::new();
        let recognizer = Arc::new(SlowRecognizer {
            text: text.map(str::to_string),
            delay,
            calls: AtomicUsize::new(0),
        });
        let clipboard = Arc::new(MemoryClipboard::default());
        let speaker = Arc::new(MuteSpeaker::default());
        let services = Services {
            screen: Arc::new(StaticScreen),
            recognizer: recognizer.clone(),
            clipboard: clipboard.clone(),
            speaker: speaker.clone(),
            surface: Arc::new(ChannelSurface::new(channels.app_to_ui.0.clone())),
        };

        let to_ui = channels.app_to_ui.1.clone();
        let state = Arc::new(AppState::new(
            config,
            services,
            Arc::new(MemoryStore::new()),
            Arc::new(channels.app_to_ui.0.clone()),
        ));
        let controller = AppController::with_channels(state.clone(), channels);

        Self {
            state,
            controller,
            to_ui,
            recognizer,
            clipboard,
            speaker,
        }
    }

    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.contents.lock().unwrap().clone()
    }

    pub fn ui_events(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.to_ui.try_recv() {
            events.push(event);
        }
        events
    }

    /// Poll until no capture is in flight
    pub async fn settle(&self) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.state.coordinator.is_capture_in_flight() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("capture never finished");
    }
}
