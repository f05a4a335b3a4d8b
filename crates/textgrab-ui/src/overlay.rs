use slint::ComponentHandle;
use textgrab_core::{CaptureError, Feedback, SurfaceWindow};

use crate::OverlayWindow;

/// The slint overlay behind the capture surface.
pub struct SlintSurface {
    window: OverlayWindow,
}

impl SlintSurface {
    pub fn new(window: OverlayWindow) -> Self {
        Self { window }
    }
}

impl SurfaceWindow for SlintSurface {
    fn show(&mut self) -> Result<(), CaptureError> {
        self.window.window().set_fullscreen(true);
        self.window
            .show()
            .map_err(|e| CaptureError::Surface(e.to_string()))?;
        self.window.invoke_focus_input();
        Ok(())
    }

    fn hide(&mut self) {
        if let Err(e) = self.window.hide() {
            tracing::warn!("[SLINT] Failed to hide overlay: {}", e);
        }
    }

    fn set_system_cursor_visible(&mut self, visible: bool) {
        self.window.set_hide_system_pointer(!visible);
    }

    fn render(&mut self, feedback: &Feedback) {
        match feedback.cursor {
            Some(cursor) => {
                self.window.set_cursor_x(cursor.x as f32);
                self.window.set_cursor_y(cursor.y as f32);
                self.window.set_cursor_visible(true);
            }
            None => self.window.set_cursor_visible(false),
        }

        match feedback.selection {
            Some(rect) => {
                self.window.set_selection_x(rect.x as f32);
                self.window.set_selection_y(rect.y as f32);
                self.window.set_selection_width(rect.width as f32);
                self.window.set_selection_height(rect.height as f32);
                self.window.set_selection_visible(true);
            }
            None => self.window.set_selection_visible(false),
        }
    }

    fn scale_factor(&self) -> f64 {
        f64::from(self.window.window().scale_factor())
    }
}
