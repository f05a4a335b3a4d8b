//! Point and rectangle helpers.
//!
//! All coordinates use a top-left origin with y growing downward. Overlay
//! input arrives in logical pixels; [`Rectangle::scaled`] maps it into the
//! physical pixel space of the captured display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of two opposite corners, snapped outward to whole pixels.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x0 = a.x.min(b.x).floor();
        let y0 = a.y.min(b.y).floor();
        let x1 = a.x.max(b.x).ceil();
        let y1 = a.y.max(b.y).ceil();

        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn far_corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Same size, moved to (0, 0).
    pub fn at_origin(&self) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            ..*self
        }
    }

    /// Scale both corners and re-snap outward.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_corners(self.origin().scaled(factor), self.far_corner().scaled(factor))
    }
}

/// Normalized rectangle spanned by two arbitrary points.
pub fn normalize(a: Point, b: Point) -> Rectangle {
    Rectangle::from_corners(a, b)
}

/// Integer pixel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl From<Rectangle> for CaptureRegion {
    fn from(rect: Rectangle) -> Self {
        // `as` saturates for floats, negative sizes land on 0
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width.max(0.0) as u32,
            height: rect.height.max(0.0) as u32,
        }
    }
}
