use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use textgrab_core::CaptureOutcome;

/// Capture statistics for the session
#[derive(Clone, Debug, Default)]
pub struct CaptureStats {
    pub capture_count: u64,
    pub empty_count: u64,
    pub error_count: u64,
    pub last_capture_time: Option<SystemTime>,
}

/// Application status
#[derive(Default)]
pub struct AppStatus {
    stats: Mutex<CaptureStats>,
}

impl AppStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: &CaptureOutcome) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        match outcome {
            CaptureOutcome::Delivered(_) => {
                stats.capture_count += 1;
                stats.last_capture_time = Some(SystemTime::now());
            }
            CaptureOutcome::Empty => stats.empty_count += 1,
            CaptureOutcome::Failed(_) => stats.error_count += 1,
            CaptureOutcome::Ignored => {}
        }
    }

    /// The capture task died before producing an outcome
    pub fn record_error(&self) {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .error_count += 1;
    }

    pub fn snapshot(&self) -> CaptureStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
