use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use textgrab_config::settings::{self, RECENT_CAPTURES_KEY, SettingsStore};
use textgrab_types::AppEvent;

use crate::services::EventSink;

pub const DEFAULT_CAPACITY: usize = 8;

/// Recently captured strings, newest first. Duplicates are kept.
pub struct RecentCaptures {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
    store: Arc<dyn SettingsStore>,
    events: Arc<dyn EventSink>,
}

impl RecentCaptures {
    /// Restore the persisted list, trimmed to `capacity` (at least 1)
    pub fn load(
        capacity: usize,
        store: Arc<dyn SettingsStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        if capacity == 0 {
            tracing::warn!("History capacity 0 raised to 1");
        }
        let capacity = capacity.max(1);

        let mut entries: VecDeque<String> =
            settings::load_as::<Vec<String>>(store.as_ref(), RECENT_CAPTURES_KEY)
                .unwrap_or_default()
                .into();
        entries.truncate(capacity);

        Self {
            entries: Mutex::new(entries),
            capacity,
            store,
            events,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn add(&self, text: String) {
        let snapshot = {
            let mut entries = self.lock();
            entries.push_front(text);
            entries.truncate(self.capacity);
            Vec::from(entries.clone())
        };
        self.commit(snapshot);
    }

    pub fn clear(&self) {
        let snapshot = {
            let mut entries = self.lock();
            if entries.is_empty() {
                return;
            }
            entries.clear();
            Vec::new()
        };
        self.commit(snapshot);
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn get(&self, index: usize) -> Option<String> {
        self.lock().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist, then notify exactly once
    fn commit(&self, snapshot: Vec<String>) {
        if let Err(e) = settings::save_as(self.store.as_ref(), RECENT_CAPTURES_KEY, &snapshot) {
            tracing::warn!("Failed to persist recent captures: {}", e);
        }
        self.events.emit(AppEvent::RecentsChanged(snapshot));
    }
}
