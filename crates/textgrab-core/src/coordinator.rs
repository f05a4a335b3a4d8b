//! Orchestrates one capture: trigger, surface, pipeline, recognition and
//! distribution (history, then clipboard, then speech).
//!
//! At most one capture runs at a time. A trigger that arrives while a
//! capture is in flight is dropped, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use textgrab_config::Config;
use textgrab_config::settings::SettingsStore;
use textgrab_types::{AppEvent, Rectangle, ShortcutBinding, TriggerSource};

use crate::history::RecentCaptures;
use crate::menu::MenuModel;
use crate::pipeline::EnhancementPipeline;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::services::{Clipboard, EventSink, Recognizer, ScreenSource, Speaker, SurfaceHandle};
use crate::shortcut::ShortcutSelection;
use crate::vocalization::Vocalization;

/// Collaborators injected at start-up.
#[derive(Clone)]
pub struct Services {
    pub screen: Arc<dyn ScreenSource>,
    pub recognizer: Arc<dyn Recognizer>,
    pub clipboard: Arc<dyn Clipboard>,
    pub speaker: Arc<dyn Speaker>,
    pub surface: Arc<dyn SurfaceHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Text was recognized and distributed
    Delivered(String),
    /// Recognition found nothing; nothing was distributed
    Empty,
    /// Screen acquisition failed
    Failed(String),
    /// No capture was in flight, the selection is stale
    Ignored,
}

/// Clears the in-flight flag on every exit path, unwinding included.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct CaptureCoordinator {
    services: Services,
    pipeline: EnhancementPipeline,
    preprocessor: Box<dyn Preprocessor>,
    history: RecentCaptures,
    vocalization: Vocalization,
    shortcut: ShortcutSelection,
    events: Arc<dyn EventSink>,
    settle_delay: Duration,
    in_flight: AtomicBool,
}

impl CaptureCoordinator {
    pub fn new(
        config: &Config,
        services: Services,
        store: Arc<dyn SettingsStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            pipeline: EnhancementPipeline::from_config(&config.capture),
            preprocessor: Box::new(DefaultPreprocessor),
            history: RecentCaptures::load(config.history.capacity, store.clone(), events.clone()),
            vocalization: Vocalization::load(store.clone(), events.clone()),
            shortcut: ShortcutSelection::load(store, events.clone()),
            settle_delay: Duration::from_millis(config.capture.settle_delay_ms),
            in_flight: AtomicBool::new(false),
            services,
            events,
        }
    }

    pub fn history(&self) -> &RecentCaptures {
        &self.history
    }

    pub fn vocalization(&self) -> &Vocalization {
        &self.vocalization
    }

    pub fn shortcut(&self) -> ShortcutBinding {
        self.shortcut.current()
    }

    pub fn is_capture_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn menu(&self) -> MenuModel {
        MenuModel::build(
            &self.history.entries(),
            self.vocalization.is_enabled(),
            self.shortcut.current(),
        )
    }

    /// Sends the full model once so a fresh UI can render it
    pub fn publish_state(&self) {
        self.events.emit(AppEvent::RecentsChanged(self.history.entries()));
        self.events
            .emit(AppEvent::VocalizationChanged(self.vocalization.is_enabled()));
        self.events.emit(AppEvent::ShortcutChanged(self.shortcut.current()));
    }

    /// Opens the surface unless a capture is already in flight. Returns
    /// whether the trigger was accepted.
    pub fn trigger_capture(&self, source: TriggerSource) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("[CAPTURE] {:?} trigger ignored, capture in flight", source);
            return false;
        }

        tracing::info!("[CAPTURE] Triggered from {:?}", source);
        self.status("Select a region", true);
        self.services.surface.open();
        true
    }

    /// Runs the pipeline for a committed selection. Blocking: acquisition
    /// and recognition may take a while.
    pub fn on_region_selected(&self, selection: Rectangle) -> CaptureOutcome {
        if !self.is_capture_in_flight() {
            tracing::warn!("[CAPTURE] Selection {:?} arrived with no capture in flight", selection);
            return CaptureOutcome::Ignored;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let span = tracing::info_span!("capture", id = %uuid::Uuid::new_v4());
        let _enter = span.enter();

        self.services.surface.close();
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        let outcome = self.run_pipeline(&selection);
        match &outcome {
            CaptureOutcome::Delivered(text) => {
                self.status(&format!("Copied {} chars", text.chars().count()), false)
            }
            CaptureOutcome::Empty => self.status("No text found", false),
            CaptureOutcome::Failed(e) => self.status(&format!("Failed: {e}"), false),
            CaptureOutcome::Ignored => {}
        }
        outcome
    }

    /// The surface closed without a selection
    pub fn on_selection_dismissed(&self) {
        if !self.is_capture_in_flight() {
            return;
        }
        self.services.surface.close();
        self.in_flight.store(false, Ordering::SeqCst);
        tracing::debug!("[CAPTURE] Selection dismissed");
        self.status("Ready", false);
    }

    /// Copies a history entry back to the clipboard. Out-of-range indices
    /// are ignored.
    pub fn copy_recent(&self, index: usize) -> bool {
        let Some(text) = self.history.get(index) else {
            tracing::debug!("Recent capture {} does not exist", index);
            return false;
        };

        match self.services.clipboard.set_text(&text) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    pub fn clear_recents(&self) {
        self.history.clear();
    }

    pub fn toggle_vocalization(&self) -> bool {
        self.vocalization.toggle()
    }

    pub fn select_shortcut(&self, code: i32) -> ShortcutBinding {
        self.shortcut.select(code)
    }

    fn run_pipeline(&self, selection: &Rectangle) -> CaptureOutcome {
        if selection.is_empty() {
            tracing::info!("Selection {:?} covers no pixels", selection);
            return CaptureOutcome::Empty;
        }

        let screen = match self.services.screen.acquire() {
            Ok(screen) => screen,
            Err(e) => {
                tracing::error!("{}", e);
                return CaptureOutcome::Failed(e.to_string());
            }
        };
        tracing::debug!(
            "Acquired {}x{} screen, selection {:?}",
            screen.width(),
            screen.height(),
            selection
        );

        let image = self.pipeline.process(&screen, selection);

        let text = self
            .services
            .recognizer
            .recognize(&image)
            .map(|raw| self.preprocessor.process(&raw))
            .unwrap_or_default();

        if text.is_empty() {
            tracing::info!("No text recognized");
            return CaptureOutcome::Empty;
        }

        tracing::info!("Recognized {} chars", text.chars().count());
        self.distribute(&text);
        CaptureOutcome::Delivered(text)
    }

    fn distribute(&self, text: &str) {
        self.history.add(text.to_string());

        if let Err(e) = self.services.clipboard.set_text(text) {
            tracing::error!("{}", e);
        }

        self.vocalization.say(text, self.services.speaker.as_ref());
    }

    fn status(&self, status: &str, capturing: bool) {
        self.events.emit(AppEvent::CaptureStatusUpdate {
            status: status.to_string(),
            capturing,
        });
    }
}
