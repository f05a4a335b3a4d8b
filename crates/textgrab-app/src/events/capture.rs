use std::sync::Arc;

use textgrab_types::{Rectangle, TriggerSource};
use tokio::task::JoinHandle;

use crate::state::AppState;

pub fn handle_trigger(state: &AppState, source: TriggerSource) {
    if !state.coordinator.trigger_capture(source) {
        tracing::debug!(">>> [CAPTURE] Busy, {:?} trigger dropped", source);
    }
}

/// Runs the blocking pipeline off the event loop. The returned handle
/// resolves once the outcome has been recorded.
pub fn handle_region_selected(state: Arc<AppState>, rect: Rectangle) -> JoinHandle<()> {
    tracing::debug!(">>> [CAPTURE] Region {:?}", rect);
    tokio::spawn(async move {
        let coordinator = state.coordinator.clone();
        let result =
            tokio::task::spawn_blocking(move || coordinator.on_region_selected(rect)).await;

        match result {
            Ok(outcome) => {
                tracing::debug!(">>> [CAPTURE] Outcome {:?}", outcome);
                state.status.record(&outcome);
            }
            Err(e) => {
                tracing::error!(">>> [CAPTURE] Task error: {}", e);
                state.status.record_error();
            }
        }
    })
}

pub fn handle_selection_dismissed(state: &AppState) {
    state.coordinator.on_selection_dismissed();
}
