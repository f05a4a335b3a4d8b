//! Test doubles shared by the unit tests in this crate.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};
use textgrab_config::Config;
use textgrab_config::settings::MemoryStore;
use textgrab_types::AppEvent;

use crate::coordinator::{CaptureCoordinator, Services};
use crate::error::{CaptureError, EnhanceError};
use crate::pipeline::{ImageFilter, ProcessedImage, RawImage};
use crate::services::{Clipboard, EventSink, Recognizer, ScreenSource, Speaker, SurfaceHandle};
use crate::surface::{Feedback, SurfaceWindow};

/// Ordered log of side effects across collaborators.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

pub struct FailingFilter;

impl ImageFilter for FailingFilter {
    fn apply(&self, _image: &RgbaImage) -> Result<RgbaImage, EnhanceError> {
        Err(EnhanceError::Filter("boom".to_string()))
    }
}

pub struct RecordingWindow {
    pub visible: bool,
    pub system_cursor_visible: bool,
    pub show_count: usize,
    pub hide_count: usize,
    pub frames: Vec<Feedback>,
    pub scale: f64,
    pub fail_show: bool,
}

impl Default for RecordingWindow {
    fn default() -> Self {
        Self {
            visible: false,
            system_cursor_visible: true,
            show_count: 0,
            hide_count: 0,
            frames: Vec::new(),
            scale: 1.0,
            fail_show: false,
        }
    }
}

impl SurfaceWindow for RecordingWindow {
    fn show(&mut self) -> Result<(), CaptureError> {
        if self.fail_show {
            return Err(CaptureError::Surface("no display".to_string()));
        }
        self.visible = true;
        self.show_count += 1;
        Ok(())
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_count += 1;
    }

    fn set_system_cursor_visible(&mut self, visible: bool) {
        self.system_cursor_visible = visible;
    }

    fn render(&mut self, feedback: &Feedback) {
        self.frames.push(*feedback);
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }
}

/// Records every event; optionally mirrors them into a [`Journal`].
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<AppEvent>>,
    journal: Option<Journal>,
}

impl EventLog {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            journal: Some(journal),
        }
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&AppEvent) -> bool) -> usize {
        self.events().iter().filter(|e| matches(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: AppEvent) {
        if let (Some(journal), AppEvent::RecentsChanged(entries)) = (&self.journal, &event) {
            journal.record(format!("history:{}", entries.first().cloned().unwrap_or_default()));
        }
        self.events.lock().unwrap().push(event);
    }
}

pub struct FixedScreen {
    pixels: RgbaImage,
    fail: AtomicBool,
    journal: Journal,
}

impl FixedScreen {
    pub fn new(pixels: RgbaImage, journal: Journal) -> Self {
        Self {
            pixels,
            fail: AtomicBool::new(false),
            journal,
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ScreenSource for FixedScreen {
    fn acquire(&self) -> Result<RawImage, CaptureError> {
        self.journal.record("acquire");
        if self.fail.load(Ordering::SeqCst) {
            return Err(CaptureError::Acquisition("display unavailable".to_string()));
        }
        Ok(RawImage::new(self.pixels.clone()))
    }
}

pub struct ScriptedRecognizer {
    result: Mutex<Option<String>>,
    pub calls: AtomicUsize,
    pub last_size: Mutex<Option<(u32, u32)>>,
}

impl ScriptedRecognizer {
    pub fn new(result: Option<&str>) -> Self {
        Self {
            result: Mutex::new(result.map(str::to_string)),
            calls: AtomicUsize::new(0),
            last_size: Mutex::new(None),
        }
    }

    pub fn set_result(&self, result: Option<&str>) {
        *self.result.lock().unwrap() = result.map(str::to_string);
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&self, image: &ProcessedImage) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_size.lock().unwrap() = Some((image.width(), image.height()));
        self.result.lock().unwrap().clone()
    }
}

pub struct RecordingClipboard {
    contents: Mutex<Option<String>>,
    pub writes: AtomicUsize,
    fail: AtomicBool,
    journal: Journal,
}

impl RecordingClipboard {
    pub fn new(journal: Journal) -> Self {
        Self {
            contents: Mutex::new(None),
            writes: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            journal,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Clipboard for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<(), CaptureError> {
        self.journal.record(format!("clipboard:{text}"));
        if self.fail.load(Ordering::SeqCst) {
            return Err(CaptureError::Clipboard("pasteboard locked".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

pub struct RecordingSpeaker {
    journal: Journal,
}

impl RecordingSpeaker {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.journal.record(format!("speak:{text}"));
    }
}

pub struct RecordingSurface {
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
    journal: Journal,
}

impl RecordingSurface {
    pub fn new(journal: Journal) -> Self {
        Self {
            opens: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            journal,
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl SurfaceHandle for RecordingSurface {
    fn open(&self) {
        self.journal.record("open");
        self.opens.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) {
        self.journal.record("close");
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// A coordinator wired to recording doubles.
pub struct Fixture {
    pub journal: Journal,
    pub events: Arc<EventLog>,
    pub store: Arc<MemoryStore>,
    pub screen: Arc<FixedScreen>,
    pub recognizer: Arc<ScriptedRecognizer>,
    pub clipboard: Arc<RecordingClipboard>,
    pub speaker: Arc<RecordingSpeaker>,
    pub surface: Arc<RecordingSurface>,
}

impl Fixture {
    pub fn new(recognized: Option<&str>) -> Self {
        let journal = Journal::default();
        Self {
            events: Arc::new(EventLog::with_journal(journal.clone())),
            store: Arc::new(MemoryStore::new()),
            screen: Arc::new(FixedScreen::new(gradient(400, 300), journal.clone())),
            recognizer: Arc::new(ScriptedRecognizer::new(recognized)),
            clipboard: Arc::new(RecordingClipboard::new(journal.clone())),
            speaker: Arc::new(RecordingSpeaker::new(journal.clone())),
            surface: Arc::new(RecordingSurface::new(journal.clone())),
            journal,
        }
    }

    pub fn services(&self) -> Services {
        Services {
            screen: self.screen.clone(),
            recognizer: self.recognizer.clone(),
            clipboard: self.clipboard.clone(),
            speaker: self.speaker.clone(),
            surface: self.surface.clone(),
        }
    }

    pub fn config() -> Config {
        let mut config = Config::default();
        config.capture.settle_delay_ms = 0;
        config.capture.enhance_passes = 1;
        config
    }

    pub fn coordinator(&self) -> CaptureCoordinator {
        CaptureCoordinator::new(
            &Self::config(),
            self.services(),
            self.store.clone(),
            self.events.clone(),
        )
    }
}
