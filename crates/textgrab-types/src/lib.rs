pub mod geometry;
pub mod types;

pub use geometry::{CaptureRegion, Point, Rectangle, normalize};
pub use types::{AppEvent, ShortcutBinding, ShortcutConflict, TriggerSource};
