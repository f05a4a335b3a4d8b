use crate::state::AppState;

pub fn handle_copy_recent(state: &AppState, index: usize) {
    if state.coordinator.copy_recent(index) {
        tracing::info!("Recent capture {} copied", index);
    }
}

pub fn handle_clear_recents(state: &AppState) {
    state.coordinator.clear_recents();
    tracing::info!("Recent captures cleared");
}

pub fn handle_toggle_vocalization(state: &AppState) {
    let enabled = state.coordinator.toggle_vocalization();
    tracing::info!("Speak on capture: {}", enabled);
}

pub fn handle_select_shortcut(state: &AppState, code: i32) {
    let binding = state.coordinator.select_shortcut(code);
    tracing::info!("Shortcut {}", binding.label());
}
