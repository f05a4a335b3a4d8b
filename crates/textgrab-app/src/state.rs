use std::sync::Arc;

use textgrab_config::Config;
use textgrab_config::settings::SettingsStore;
use textgrab_core::{CaptureCoordinator, EventSink, Services};

use crate::status::AppStatus;

pub struct AppState {
    pub config: Config,
    pub coordinator: Arc<CaptureCoordinator>,
    pub status: AppStatus,
}

impl AppState {
    pub fn new(
        config: Config,
        services: Services,
        store: Arc<dyn SettingsStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let coordinator = Arc::new(CaptureCoordinator::new(&config, services, store, events));
        Self {
            config,
            coordinator,
            status: AppStatus::new(),
        }
    }
}
