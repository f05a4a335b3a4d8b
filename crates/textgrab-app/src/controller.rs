use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender, Receiver, Sender};
use textgrab_types::AppEvent;
use textgrab_ui::UiBridge;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    /// Drained by the UI timer; never blocks the sender
    pub app_to_ui: (Sender<AppEvent>, Receiver<AppEvent>),
    /// UI interactions
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::unbounded(),
            ui_to_app: kanal::unbounded_async(),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    /// `channels.app_to_ui` must be the sender already wired into `state`
    pub fn with_channels(state: Arc<AppState>, channels: ChannelSet) -> Self {
        Self {
            channels,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// The UI thread's end of both channels
    pub fn ui_bridge(&self) -> UiBridge {
        UiBridge::new(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone_sync(),
        )
    }

    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Must be called inside a tokio runtime context
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Wait for the backend tasks, aborting whatever is left after `limit`
pub async fn join_tasks(mut tasks: JoinSet<anyhow::Result<()>>, limit: Duration) {
    let drained = tokio::time::timeout(limit, async {
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Backend task failed: {:#}", e),
                Err(e) => tracing::error!("Backend task panicked: {}", e),
            }
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!("Backend tasks still running after {:?}, aborting", limit);
        tasks.abort_all();
    }
}
