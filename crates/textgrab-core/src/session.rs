//! Region-selection state machine.
//!
//! ```text
//! Idle --arm--> Armed --down--> Dragging --up(moved)--> Completed
//!                 |               |      \--up(same)--> Aborted
//!                 \--deactivate---+--> Idle
//! ```
//!
//! `Completed` and `Aborted` are terminal; a new interaction needs a new
//! session.

use textgrab_types::{Point, Rectangle, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Armed,
    Dragging,
    Completed,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct CaptureSession {
    state: SessionState,
    start: Option<Point>,
    current: Option<Point>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            start: None,
            current: None,
        }
    }

    /// A fresh session already accepting input
    pub fn armed() -> Self {
        let mut session = Self::new();
        session.arm();
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn current(&self) -> Option<Point> {
        self.current
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Completed | SessionState::Aborted)
    }

    /// Live rectangle while dragging
    pub fn selection(&self) -> Option<Rectangle> {
        match (self.state, self.start, self.current) {
            (SessionState::Dragging, Some(start), Some(current)) => Some(normalize(start, current)),
            _ => None,
        }
    }

    pub fn arm(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::Armed;
        } else {
            tracing::trace!("arm ignored in {:?}", self.state);
        }
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.state != SessionState::Armed {
            tracing::trace!("pointer down ignored in {:?}", self.state);
            return;
        }
        self.state = SessionState::Dragging;
        self.start = Some(p);
        self.current = Some(p);
    }

    /// Returns the rectangle to draw as feedback
    pub fn pointer_move(&mut self, p: Point) -> Option<Rectangle> {
        if self.state != SessionState::Dragging {
            return None;
        }
        self.current = Some(p);
        self.selection()
    }

    /// Ends the drag. Yields the selection only when the pointer ended up
    /// somewhere other than where it went down and the snapped rectangle
    /// covers at least one pixel; anything else aborts.
    pub fn pointer_up(&mut self, p: Point) -> Option<Rectangle> {
        if self.state != SessionState::Dragging {
            tracing::trace!("pointer up ignored in {:?}", self.state);
            return None;
        }
        self.current = Some(p);

        let selection = self
            .start
            .filter(|start| *start != p)
            .map(|start| normalize(start, p))
            .filter(|rect| !rect.is_empty());

        self.state = match selection {
            Some(_) => SessionState::Completed,
            None => SessionState::Aborted,
        };
        selection
    }

    /// External cancellation, back to Idle with no points kept
    pub fn deactivate(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.state = SessionState::Idle;
        self.start = None;
        self.current = None;
    }
}
