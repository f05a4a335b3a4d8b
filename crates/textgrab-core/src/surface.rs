//! Full-screen selection surface hosting one [`CaptureSession`] at a time.
//!
//! The surface owns the platform window through [`SurfaceWindow`] and turns
//! raw pointer input into session transitions. Feedback is rendered inside
//! the pointer callback that caused it.

use textgrab_types::{Point, Rectangle};

use crate::error::CaptureError;
use crate::session::{CaptureSession, SessionState};

/// What the overlay draws: crosshair and live selection, logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Feedback {
    pub cursor: Option<Point>,
    pub selection: Option<Rectangle>,
}

/// Platform window backing the surface.
pub trait SurfaceWindow {
    fn show(&mut self) -> Result<(), CaptureError>;
    fn hide(&mut self);
    fn set_system_cursor_visible(&mut self, visible: bool);
    fn render(&mut self, feedback: &Feedback);

    /// Physical pixels per logical pixel
    fn scale_factor(&self) -> f64 {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Physical-pixel rectangle on the captured display
    RegionSelected(Rectangle),
    /// Closed without a selection (click without drag, or cancelled)
    Dismissed,
}

pub struct CaptureSurface<W: SurfaceWindow> {
    window: W,
    session: Option<CaptureSession>,
}

impl<W: SurfaceWindow> CaptureSurface<W> {
    pub fn new(window: W) -> Self {
        Self {
            window,
            session: None,
        }
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_state(&self) -> Option<SessionState> {
        self.session.as_ref().map(CaptureSession::state)
    }

    /// Show the overlay with a freshly armed session. No-op when open.
    /// If the window cannot be shown the surface stays closed and reports
    /// `Dismissed`, since no input could ever end the session.
    pub fn open(&mut self) -> Option<SurfaceEvent> {
        if self.is_open() {
            tracing::debug!("[SURFACE] open ignored, already open");
            return None;
        }

        self.window.render(&Feedback::default());
        self.window.set_system_cursor_visible(false);
        if let Err(e) = self.window.show() {
            tracing::error!("[SURFACE] {}", e);
            self.window.set_system_cursor_visible(true);
            return Some(SurfaceEvent::Dismissed);
        }

        self.session = Some(CaptureSession::armed());
        tracing::debug!("[SURFACE] opened");
        None
    }

    /// Hide the overlay and drop the session, whatever state it was in.
    pub fn close(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.deactivate();

        self.window.hide();
        self.window.set_system_cursor_visible(true);
        self.window.render(&Feedback::default());
        tracing::debug!("[SURFACE] closed");
    }

    pub fn pointer_down(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pointer_down(p);
        let feedback = Feedback {
            cursor: Some(p),
            selection: session.selection(),
        };
        self.window.render(&feedback);
    }

    pub fn pointer_move(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let selection = session.pointer_move(p);
        self.window.render(&Feedback {
            cursor: Some(p),
            selection,
        });
    }

    /// Finishes the interaction if a drag was in progress. The surface closes
    /// itself on either outcome so the overlay is gone before anything else
    /// reacts to the event. The scale factor is read here since some
    /// platforms only know it once the window is on screen.
    pub fn pointer_up(&mut self, p: Point) -> Option<SurfaceEvent> {
        let session = self.session.as_mut()?;
        let selected = session.pointer_up(p);

        let event = match (session.state(), selected) {
            (SessionState::Completed, Some(rect)) => {
                SurfaceEvent::RegionSelected(rect.scaled(self.window.scale_factor()))
            }
            (SessionState::Aborted, _) => SurfaceEvent::Dismissed,
            _ => return None,
        };

        self.close();
        Some(event)
    }

    /// Escape or any other external cancellation
    pub fn cancel(&mut self) -> Option<SurfaceEvent> {
        if !self.is_open() {
            return None;
        }
        self.close();
        Some(SurfaceEvent::Dismissed)
    }
}
