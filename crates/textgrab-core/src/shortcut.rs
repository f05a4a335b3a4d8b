use std::sync::{Arc, Mutex, PoisonError};

use textgrab_config::settings::{self, SHORTCUT_KEY, SettingsStore};
use textgrab_types::{AppEvent, ShortcutBinding};

use crate::services::EventSink;

/// Map a stored or requested code to a legal binding, falling back to the
/// default when it is out of range.
pub fn resolve_binding(code: i32) -> ShortcutBinding {
    ShortcutBinding::try_from(code).unwrap_or_else(|conflict| {
        let fallback = ShortcutBinding::default();
        tracing::warn!("{}, using {}", conflict, fallback.label());
        fallback
    })
}

/// Which of the four capture shortcuts is active. The platform
/// registration follows `ShortcutChanged` notifications.
pub struct ShortcutSelection {
    current: Mutex<ShortcutBinding>,
    store: Arc<dyn SettingsStore>,
    events: Arc<dyn EventSink>,
}

impl ShortcutSelection {
    pub fn load(store: Arc<dyn SettingsStore>, events: Arc<dyn EventSink>) -> Self {
        let stored = settings::load_as::<i32>(store.as_ref(), SHORTCUT_KEY);
        let binding = stored.map(resolve_binding).unwrap_or_default();

        if stored != Some(binding.code()) {
            if let Err(e) = settings::save_as(store.as_ref(), SHORTCUT_KEY, &binding.code()) {
                tracing::warn!("Failed to persist shortcut: {}", e);
            }
        }

        Self {
            current: Mutex::new(binding),
            store,
            events,
        }
    }

    pub fn current(&self) -> ShortcutBinding {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select by code; returns the binding now in effect
    pub fn select(&self, code: i32) -> ShortcutBinding {
        let binding = resolve_binding(code);
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == binding {
                return binding;
            }
            *current = binding;
        }

        if let Err(e) = settings::save_as(self.store.as_ref(), SHORTCUT_KEY, &binding.code()) {
            tracing::warn!("Failed to persist shortcut: {}", e);
        }
        self.events.emit(AppEvent::ShortcutChanged(binding));
        binding
    }
}
