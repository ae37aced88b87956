// Author: Dustin Pilgrim
// License: MIT

//! Handle hit-boxes and pointer classification.
//!
//! Sizes are screen pixels; positions are image coordinates. Hit tests
//! scale both into screen space, so the canvas offset cancels out.

use serde::{Deserialize, Serialize};

use crate::function::Function;
use crate::rect::{Point, PublicRect, Viewport};

pub const MIN_HANDLE_SIZE: i32 = 15;
pub const MAX_HANDLE_SIZE: i32 = 50;
pub const NARROW_MODE_HANDLE_SIZE: i32 = 15;
pub const NARROW_MODE_THRESHOLD: i32 = 45;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandleAnchor {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    West,
    East,
    North,
    South,
    Center,
}

/// Classification order. Corners win over edges, edges over the center.
const ORDER: [(HandleAnchor, Function); 9] = [
    (HandleAnchor::NorthWest, Function::ResizingUpperLeft),
    (HandleAnchor::SouthEast, Function::ResizingLowerRight),
    (HandleAnchor::NorthEast, Function::ResizingUpperRight),
    (HandleAnchor::SouthWest, Function::ResizingLowerLeft),
    (HandleAnchor::West, Function::ResizingLeft),
    (HandleAnchor::East, Function::ResizingRight),
    (HandleAnchor::North, Function::ResizingTop),
    (HandleAnchor::South, Function::ResizingBottom),
    (HandleAnchor::Center, Function::Moving),
];

impl HandleAnchor {
    /// Outward direction used to push handles out of narrow rectangles.
    fn narrow_dir(self) -> (f64, f64) {
        match self {
            HandleAnchor::NorthWest => (-1.0, -1.0),
            HandleAnchor::SouthEast => (1.0, 1.0),
            HandleAnchor::NorthEast => (1.0, -1.0),
            HandleAnchor::SouthWest => (-1.0, 1.0),
            HandleAnchor::West => (-1.0, 0.0),
            HandleAnchor::East => (1.0, 0.0),
            HandleAnchor::North => (0.0, -1.0),
            HandleAnchor::South => (0.0, 1.0),
            HandleAnchor::Center => (0.0, 0.0),
        }
    }

    /// Top-left corner of a `w`×`h` box anchored at `(x, y)`.
    fn shift_to_north_west(self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        match self {
            HandleAnchor::NorthWest => (x, y),
            HandleAnchor::NorthEast => (x - w, y),
            HandleAnchor::SouthWest => (x, y - h),
            HandleAnchor::SouthEast => (x - w, y - h),
            HandleAnchor::North => (x - w / 2.0, y),
            HandleAnchor::South => (x - w / 2.0, y - h),
            HandleAnchor::West => (x, y - h / 2.0),
            HandleAnchor::East => (x - w, y - h / 2.0),
            HandleAnchor::Center => (x - w / 2.0, y - h / 2.0),
        }
    }
}

/// On-screen handle dimensions for the current rectangle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandleSizes {
    pub corner_w: i32,
    pub corner_h: i32,
    pub top_bottom_w: i32,
    pub left_right_h: i32,
    /// Handles sit outside the rectangle body.
    pub narrow: bool,
}

impl HandleSizes {
    /// Size the handles from the visible part of the rectangle.
    pub fn compute(
        rect: &PublicRect,
        scale: (f64, f64),
        viewport: Viewport,
        force_narrow: bool,
    ) -> Self {
        let (sx, sy) = scale;

        let x = (rect.x1 * sx) as i32;
        let y = (rect.y1 * sy) as i32;
        let w = (rect.width() * sx) as i32;
        let h = (rect.height() * sy) as i32;

        let (vis_w, vis_h) = viewport.visible_size(x, y, w, h);

        let narrow =
            force_narrow || vis_w < NARROW_MODE_THRESHOLD || vis_h < NARROW_MODE_THRESHOLD;

        if narrow {
            Self {
                corner_w: NARROW_MODE_HANDLE_SIZE,
                corner_h: NARROW_MODE_HANDLE_SIZE,
                top_bottom_w: w.max((w - 2).min(NARROW_MODE_HANDLE_SIZE)),
                left_right_h: h.max((h - 2).min(NARROW_MODE_HANDLE_SIZE)),
                narrow,
            }
        } else {
            let corner_w = (vis_w / 4).clamp(MIN_HANDLE_SIZE, MAX_HANDLE_SIZE);
            let corner_h = (vis_h / 4).clamp(MIN_HANDLE_SIZE, MAX_HANDLE_SIZE);

            Self {
                corner_w,
                corner_h,
                top_bottom_w: (w - 3 * corner_w).max(MIN_HANDLE_SIZE),
                left_right_h: (h - 3 * corner_h).max(MIN_HANDLE_SIZE),
                narrow,
            }
        }
    }

    /// Whether `p` falls outside the rectangle, counting the margin the
    /// outward handles occupy in narrow mode.
    pub fn is_outside(&self, p: Point, rect: &PublicRect, scale: (f64, f64)) -> bool {
        let (mx, my) = if self.narrow {
            (self.corner_w as f64 / scale.0, self.corner_h as f64 / scale.1)
        } else {
            (0.0, 0.0)
        };

        p.x < rect.x1 - mx || p.x > rect.x2 + mx || p.y < rect.y1 - my || p.y > rect.y2 + my
    }

    /// Whether `p` lies on the handle at `anchor`. Edges count.
    pub fn on_handle(
        &self,
        p: Point,
        anchor: HandleAnchor,
        rect: &PublicRect,
        scale: (f64, f64),
    ) -> bool {
        let (sx, sy) = scale;
        let (rw, rh) = (rect.width(), rect.height());
        let (mid_x, mid_y) = (rect.x1 + rw / 2.0, rect.y1 + rh / 2.0);

        let corner = (self.corner_w as f64, self.corner_h as f64);

        let (mut hx, mut hy, hw, hh) = match anchor {
            HandleAnchor::NorthWest => (rect.x1, rect.y1, corner.0, corner.1),
            HandleAnchor::SouthEast => (rect.x2, rect.y2, corner.0, corner.1),
            HandleAnchor::NorthEast => (rect.x2, rect.y1, corner.0, corner.1),
            HandleAnchor::SouthWest => (rect.x1, rect.y2, corner.0, corner.1),
            HandleAnchor::West => (rect.x1, mid_y, corner.0, self.left_right_h as f64),
            HandleAnchor::East => (rect.x2, mid_y, corner.0, self.left_right_h as f64),
            HandleAnchor::North => (mid_x, rect.y1, self.top_bottom_w as f64, corner.1),
            HandleAnchor::South => (mid_x, rect.y2, self.top_bottom_w as f64, corner.1),
            HandleAnchor::Center if self.narrow => (mid_x, mid_y, rw * sx, rh * sy),
            HandleAnchor::Center => (
                mid_x,
                mid_y,
                rw * sx - corner.0 * 2.0,
                rh * sy - corner.1 * 2.0,
            ),
        };

        if self.narrow {
            let (dx, dy) = anchor.narrow_dir();
            hx += dx * hw / sx;
            hy += dy * hh / sy;
        }

        let (tx, ty) = anchor.shift_to_north_west(hx * sx, hy * sy, hw, hh);
        let (px, py) = (p.x * sx, p.y * sy);

        px >= tx && px <= tx + hw && py >= ty && py <= ty + hh
    }

    /// Map a pointer position to the function it would start.
    pub fn classify(
        &self,
        p: Point,
        proximity: bool,
        rect: &PublicRect,
        scale: (f64, f64),
    ) -> Function {
        if !proximity {
            return Function::Dead;
        }

        if self.is_outside(p, rect, scale) {
            return Function::Creating;
        }

        ORDER
            .iter()
            .find(|(anchor, _)| self.on_handle(p, *anchor, rect, scale))
            .map(|(_, f)| *f)
            .unwrap_or(Function::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        x: 0,
        y: 0,
        width: 1000,
        height: 1000,
    };

    fn sizes(rect: &PublicRect) -> HandleSizes {
        HandleSizes::compute(rect, (1.0, 1.0), VIEW, false)
    }

    #[test]
    fn large_rectangle_is_not_narrow() {
        let r = PublicRect::new(0.0, 0.0, 200.0, 100.0);
        let s = sizes(&r);
        assert!(!s.narrow);
        assert_eq!((s.corner_w, s.corner_h), (50, 25));
        assert_eq!((s.top_bottom_w, s.left_right_h), (50, 25));
    }

    #[test]
    fn small_rectangle_is_narrow() {
        let r = PublicRect::new(0.0, 0.0, 40.0, 100.0);
        let s = sizes(&r);
        assert!(s.narrow);
        assert_eq!((s.corner_w, s.corner_h), (15, 15));
        assert_eq!((s.top_bottom_w, s.left_right_h), (40, 100));
    }

    #[test]
    fn visible_part_decides_narrow_mode() {
        let r = PublicRect::new(980.0, 0.0, 1200.0, 200.0);
        let s = sizes(&r);
        assert!(s.narrow);
    }

    #[test]
    fn classify_corners_edges_and_center() {
        let r = PublicRect::new(0.0, 0.0, 200.0, 200.0);
        let s = sizes(&r);
        let at = |x, y| s.classify(Point::new(x, y), true, &r, (1.0, 1.0));

        assert_eq!(at(2.0, 2.0), Function::ResizingUpperLeft);
        assert_eq!(at(198.0, 198.0), Function::ResizingLowerRight);
        assert_eq!(at(198.0, 2.0), Function::ResizingUpperRight);
        assert_eq!(at(2.0, 198.0), Function::ResizingLowerLeft);
        assert_eq!(at(2.0, 100.0), Function::ResizingLeft);
        assert_eq!(at(198.0, 100.0), Function::ResizingRight);
        assert_eq!(at(100.0, 2.0), Function::ResizingTop);
        assert_eq!(at(100.0, 198.0), Function::ResizingBottom);
        assert_eq!(at(100.0, 100.0), Function::Moving);
        assert_eq!(at(300.0, 100.0), Function::Creating);
    }

    #[test]
    fn gap_between_handles_is_dead() {
        let r = PublicRect::new(0.0, 0.0, 200.0, 200.0);
        let s = sizes(&r);
        // Past the corner handle but before the top handle starts.
        let f = s.classify(Point::new(60.0, 2.0), true, &r, (1.0, 1.0));
        assert_eq!(f, Function::Dead);
    }

    #[test]
    fn no_proximity_is_dead() {
        let r = PublicRect::new(0.0, 0.0, 200.0, 200.0);
        let s = sizes(&r);
        assert_eq!(s.classify(Point::new(100.0, 100.0), false, &r, (1.0, 1.0)), Function::Dead);
    }

    #[test]
    fn narrow_handles_sit_outside() {
        let r = PublicRect::new(100.0, 100.0, 110.0, 110.0);
        let s = sizes(&r);
        assert!(s.narrow);

        let at = |x, y| s.classify(Point::new(x, y), true, &r, (1.0, 1.0));
        assert_eq!(at(92.0, 92.0), Function::ResizingUpperLeft);
        assert_eq!(at(118.0, 118.0), Function::ResizingLowerRight);
        assert_eq!(at(105.0, 105.0), Function::Moving);
        assert_eq!(at(80.0, 80.0), Function::Creating);
    }

    #[test]
    fn zoom_scales_hit_boxes() {
        let r = PublicRect::new(0.0, 0.0, 100.0, 100.0);
        let s = HandleSizes::compute(&r, (2.0, 2.0), VIEW, false);
        assert_eq!((s.corner_w, s.corner_h), (50, 50));

        // 50 screen px is 25 image px at 2x.
        let f = s.classify(Point::new(24.0, 24.0), true, &r, (2.0, 2.0));
        assert_eq!(f, Function::ResizingUpperLeft);
        let f = s.classify(Point::new(26.0, 26.0), true, &r, (2.0, 2.0));
        assert_eq!(f, Function::Moving);
    }
}
