use std::sync::Arc;

use kanal::AsyncReceiver;
use textgrab_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod capture;
pub mod menu;

use capture::{handle_region_selected, handle_selection_dismissed, handle_trigger};
use menu::{
    handle_clear_recents, handle_copy_recent, handle_select_shortcut, handle_toggle_vocalization,
};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(e) => {
                    tracing::info!("[EVENT_LOOP] UI channel closed: {}", e);
                    break;
                }
            },
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        if !handle_events(state.clone(), event) {
            break;
        }
    }

    Ok(())
}

/// Returns false when the loop should stop
pub fn handle_events(state: Arc<AppState>, event: AppEvent) -> bool {
    match event {
        AppEvent::TriggerCapture { source } => handle_trigger(&state, source),
        AppEvent::RegionSelected(rect) => {
            // not awaited: triggers arriving meanwhile must see the capture
            // in flight and be dropped
            handle_region_selected(state, rect);
        }
        AppEvent::SelectionDismissed => handle_selection_dismissed(&state),
        AppEvent::CopyRecent(index) => handle_copy_recent(&state, index),
        AppEvent::ClearRecents => handle_clear_recents(&state),
        AppEvent::ToggleVocalization => handle_toggle_vocalization(&state),
        AppEvent::SelectShortcut(code) => handle_select_shortcut(&state, code),
        AppEvent::Quit => {
            tracing::info!("[EVENT_LOOP] Quit requested");
            return false;
        }
        AppEvent::OpenSurface
        | AppEvent::CloseSurface
        | AppEvent::RecentsChanged(_)
        | AppEvent::VocalizationChanged(_)
        | AppEvent::ShortcutChanged(_)
        | AppEvent::CaptureStatusUpdate { .. } => {
            // UI-only event, ignore in backend
        }
    }
    true
}
