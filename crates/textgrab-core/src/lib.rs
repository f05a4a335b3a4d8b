pub mod coordinator;
pub mod error;
pub mod history;
pub mod menu;
pub mod pipeline;
pub mod preprocess;
pub mod services;
pub mod session;
pub mod shortcut;
pub mod surface;
pub mod vocalization;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{CaptureCoordinator, CaptureOutcome, Services};
pub use error::{CaptureError, EnhanceError};
pub use pipeline::{ColorControls, EnhancementPipeline, ImageFilter, ProcessedImage, RawImage};
pub use history::RecentCaptures;
pub use menu::MenuModel;
pub use preprocess::{DefaultPreprocessor, Preprocessor};
pub use services::{
    ChannelSurface, Clipboard, EventSink, Recognizer, ScreenSource, Speaker, SurfaceHandle,
};
pub use session::{CaptureSession, SessionState};
pub use shortcut::ShortcutSelection;
pub use surface::{CaptureSurface, Feedback, SurfaceEvent, SurfaceWindow};
pub use vocalization::Vocalization;
