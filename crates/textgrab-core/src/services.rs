//! Collaborator capabilities consumed by the coordinator.

use textgrab_types::AppEvent;

use crate::error::CaptureError;
use crate::pipeline::{ProcessedImage, RawImage};

/// Grabs the whole primary display.
pub trait ScreenSource: Send + Sync {
    fn acquire(&self) -> Result<RawImage, CaptureError>;
}

/// Text recognition. Returns `None` when nothing readable was found or the
/// engine failed; it never reports "no text" as an error.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &ProcessedImage) -> Option<String>;
}

pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with plain text
    fn set_text(&self, text: &str) -> Result<(), CaptureError>;
}

/// Fire-and-forget speech, failures are swallowed by the implementation.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str);
}

/// Remote control of the capture surface, which lives on the UI thread.
pub trait SurfaceHandle: Send + Sync {
    fn open(&self);
    fn close(&self);
}

/// Model-to-UI notifications.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AppEvent);
}

impl EventSink for kanal::Sender<AppEvent> {
    fn emit(&self, event: AppEvent) {
        if let Err(e) = self.send(event) {
            tracing::warn!("Dropping UI notification: {}", e);
        }
    }
}

/// Surface commands travel over the same channel as other UI events.
pub struct ChannelSurface {
    tx: kanal::Sender<AppEvent>,
}

impl ChannelSurface {
    pub fn new(tx: kanal::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl SurfaceHandle for ChannelSurface {
    fn open(&self) {
        self.tx.emit(AppEvent::OpenSurface);
    }

    fn close(&self) {
        self.tx.emit(AppEvent::CloseSurface);
    }
}
