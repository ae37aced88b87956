// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// A pointer position in image coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer bounds in image coordinates (min inclusive, max exclusive).
///
/// Used for the image canvas, drawables and constraint limits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bounds of an item placed at `(x, y)` with the given size.
    pub fn from_offset(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// The rectangle as seen by collaborators, rounded per precision mode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PublicRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PublicRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Edges are part of the rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// The visible part of the canvas, in screen pixels with the origin at the
/// image origin (i.e. already scaled).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Size of the intersection with the given screen-space rectangle.
    /// Disjoint rectangles yield `(0, 0)`.
    pub fn visible_size(&self, x: i32, y: i32, w: i32, h: i32) -> (i32, i32) {
        let left = x.max(self.x);
        let top = y.max(self.y);
        let right = (x + w).min(self.x + self.width);
        let bottom = (y + h).min(self.y + self.height);

        if right <= left || bottom <= top {
            (0, 0)
        } else {
            (right - left, bottom - top)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_size_clips_to_viewport() {
        let vp = Viewport::new(0, 0, 100, 80);
        assert_eq!(vp.visible_size(50, 50, 100, 100), (50, 30));
        assert_eq!(vp.visible_size(-20, 10, 40, 10), (20, 10));
    }

    #[test]
    fn visible_size_of_disjoint_rect_is_empty() {
        let vp = Viewport::new(0, 0, 100, 80);
        assert_eq!(vp.visible_size(200, 0, 10, 10), (0, 0));
    }

    #[test]
    fn public_rect_contains_its_edges() {
        let r = PublicRect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(10.0, 5.0));
        assert!(r.contains(0.0, 0.0));
        assert!(!r.contains(10.5, 2.0));
    }
}
