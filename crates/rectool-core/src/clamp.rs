// Author: Dustin Pilgrim
// License: MIT

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::geometry::RectangleState;
use crate::options::Constraint;
use crate::rect::Bounds;

bitflags! {
    /// Sides pushed back by a clamp. The aspect resolver must not grow
    /// these sides outwards again.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[repr(transparent)]
    pub struct ClampedSides: u8 {
        const LEFT   = 0b0000_0001;
        const RIGHT  = 0b0000_0010;
        const TOP    = 0b0000_0100;
        const BOTTOM = 0b0000_1000;
    }
}

/// Bounds for a constraint, or `None` when nothing should be clamped.
///
/// Drawable bounds are the union of the selected drawables, with the
/// minimum seeded from the first drawable and the maximum from zero.
pub fn constraint_bounds(
    constraint: Constraint,
    image_size: (i32, i32),
    drawables: &[Bounds],
) -> Option<Bounds> {
    match constraint {
        Constraint::None => None,

        Constraint::Image => Some(Bounds::new(0, 0, image_size.0, image_size.1)),

        Constraint::Drawable => {
            let mut b = Bounds::default();
            if let Some(first) = drawables.first() {
                b.x1 = first.x1;
                b.y1 = first.y1;
            }
            for d in drawables {
                b.x1 = b.x1.min(d.x1);
                b.y1 = b.y1.min(d.y1);
                b.x2 = b.x2.max(d.x2);
                b.y2 = b.y2.max(d.y2);
            }
            Some(b)
        }
    }
}

/// Clamp both axes. With `symmetric`, a side pushed in moves the
/// opposite side by the same amount (fixed-center resizing).
pub fn clamp(rect: &mut RectangleState, bounds: Bounds, symmetric: bool) -> ClampedSides {
    clamp_width(rect, bounds, symmetric) | clamp_height(rect, bounds, symmetric)
}

pub fn clamp_width(rect: &mut RectangleState, bounds: Bounds, symmetric: bool) -> ClampedSides {
    let mut sides = ClampedSides::empty();
    let min_x = bounds.x1 as f64;
    let max_x = bounds.x2 as f64;

    if rect.x1 < min_x {
        let dx = min_x - rect.x1;
        rect.x1 += dx;
        if symmetric {
            rect.x2 -= dx;
        }
        if rect.x2 < min_x {
            rect.x2 = min_x;
        }
        sides |= ClampedSides::LEFT;
    }

    if rect.x2 > max_x {
        let dx = max_x - rect.x2;
        rect.x2 += dx;
        if symmetric {
            rect.x1 -= dx;
        }
        if rect.x1 > max_x {
            rect.x1 = max_x;
        }
        sides |= ClampedSides::RIGHT;
    }

    sides
}

pub fn clamp_height(rect: &mut RectangleState, bounds: Bounds, symmetric: bool) -> ClampedSides {
    let mut sides = ClampedSides::empty();
    let min_y = bounds.y1 as f64;
    let max_y = bounds.y2 as f64;

    if rect.y1 < min_y {
        let dy = min_y - rect.y1;
        rect.y1 += dy;
        if symmetric {
            rect.y2 -= dy;
        }
        if rect.y2 < min_y {
            rect.y2 = min_y;
        }
        sides |= ClampedSides::TOP;
    }

    if rect.y2 > max_y {
        let dy = max_y - rect.y2;
        rect.y2 += dy;
        if symmetric {
            rect.y1 -= dy;
        }
        if rect.y1 > max_y {
            rect.y1 = max_y;
        }
        sides |= ClampedSides::BOTTOM;
    }

    sides
}

/// Translate the rectangle inside the bounds. A rectangle larger than the
/// bounds along an axis is made to fill that axis exactly.
pub fn keep_inside(rect: &mut RectangleState, bounds: Bounds) {
    keep_inside_horizontally(rect, bounds);
    keep_inside_vertically(rect, bounds);
}

pub fn keep_inside_horizontally(rect: &mut RectangleState, bounds: Bounds) {
    let (min_x, max_x) = (bounds.x1 as f64, bounds.x2 as f64);

    if max_x - min_x < rect.x2 - rect.x1 {
        rect.x1 = min_x;
        rect.x2 = max_x;
        return;
    }

    if rect.x1 < min_x {
        let dx = min_x - rect.x1;
        rect.x1 += dx;
        rect.x2 += dx;
    }
    if rect.x2 > max_x {
        let dx = max_x - rect.x2;
        rect.x1 += dx;
        rect.x2 += dx;
    }
}

pub fn keep_inside_vertically(rect: &mut RectangleState, bounds: Bounds) {
    let (min_y, max_y) = (bounds.y1 as f64, bounds.y2 as f64);

    if max_y - min_y < rect.y2 - rect.y1 {
        rect.y1 = min_y;
        rect.y2 = max_y;
        return;
    }

    if rect.y1 < min_y {
        let dy = min_y - rect.y1;
        rect.y1 += dy;
        rect.y2 += dy;
    }
    if rect.y2 > max_y {
        let dy = max_y - rect.y2;
        rect.y1 += dy;
        rect.y2 += dy;
    }
}
