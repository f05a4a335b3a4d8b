use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use textgrab_config::settings::{self, SettingsStore, VOCALIZATION_KEY};
use textgrab_types::AppEvent;

use crate::services::{EventSink, Speaker};

/// Persistent "speak on capture" toggle.
pub struct Vocalization {
    enabled: AtomicBool,
    store: Arc<dyn SettingsStore>,
    events: Arc<dyn EventSink>,
}

impl Vocalization {
    /// Restore the persisted flag, off when never saved
    pub fn load(store: Arc<dyn SettingsStore>, events: Arc<dyn EventSink>) -> Self {
        let enabled = settings::load_as::<bool>(store.as_ref(), VOCALIZATION_KEY).unwrap_or(false);
        Self {
            enabled: AtomicBool::new(enabled),
            store,
            events,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) == enabled {
            return;
        }
        self.commit(enabled);
    }

    /// Flip the flag and return the new value
    pub fn toggle(&self) -> bool {
        let enabled = !self.enabled.fetch_xor(true, Ordering::SeqCst);
        self.commit(enabled);
        enabled
    }

    /// Speak `text` when enabled
    pub fn say(&self, text: &str, speaker: &dyn Speaker) {
        if self.is_enabled() {
            speaker.speak(text);
        }
    }

    fn commit(&self, enabled: bool) {
        if let Err(e) = settings::save_as(self.store.as_ref(), VOCALIZATION_KEY, &enabled) {
            tracing::warn!("Failed to persist vocalization toggle: {}", e);
        }
        self.events.emit(AppEvent::VocalizationChanged(enabled));
    }
}
