// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::function::Function;
use crate::rect::PublicRect;

/// General float comparison tolerance.
pub const EPSILON: f64 = 0.0001;

/// Tolerance for values that round-trip through integer precision.
pub const PIXEL_EPSILON: f64 = 0.5;

pub fn fequal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn pixel_fequal(a: f64, b: f64) -> bool {
    (a - b).abs() < PIXEL_EPSILON
}

/// Round half away from zero.
pub fn signed_round(v: f64) -> i32 {
    v.round() as i32
}

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Precision {
    #[default]
    Int,
    Double,
}

impl Precision {
    /// Transforms a pointer coordinate to match the public rectangle.
    pub fn adjust(self, v: f64) -> f64 {
        match self {
            Precision::Int => v.round_ties_even(),
            Precision::Double => v,
        }
    }
}

/// One of the four corner coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorField {
    X1,
    Y1,
    X2,
    Y2,
}

/// The authoritative rectangle geometry.
///
/// Settled rectangles satisfy `x1 <= x2` and `y1 <= y2`; the invariant is
/// broken mid-update and restored by [`RectangleState::fix_flip`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RectangleState {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,

    pub x1_int: i32,
    pub y1_int: i32,
    pub width_int: i32,
    pub height_int: i32,
}

impl RectangleState {
    pub fn corners(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn set_corners(&mut self, [x1, y1, x2, y2]: [f64; 4]) {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Recompute the integer view. The rounded size only follows the
    /// corners while rubber-banding, so moving never perturbs it.
    pub fn update_int_rect(&mut self, function: Function) {
        self.x1_int = signed_round(self.x1);
        self.y1_int = signed_round(self.y1);

        if function.is_rubber_banding() {
            self.width_int = signed_round(self.x2) - self.x1_int;
            self.height_int = signed_round(self.y2) - self.y1_int;
        }
    }

    pub fn public_rect(&self, precision: Precision) -> PublicRect {
        match precision {
            Precision::Int => PublicRect::new(
                self.x1_int as f64,
                self.y1_int as f64,
                (self.x1_int + self.width_int) as f64,
                (self.y1_int + self.height_int) as f64,
            ),
            Precision::Double => PublicRect::new(self.x1, self.y1, self.x2, self.y2),
        }
    }

    /// Restore `x1 <= x2` and `y1 <= y2` after a drag pushed a side past
    /// its opposite, returning the function relabelled to follow the swap.
    pub fn fix_flip(&mut self, function: Function) -> Function {
        let mut function = function;

        if self.x2 < self.x1 {
            std::mem::swap(&mut self.x1, &mut self.x2);
            function = function.flipped_horizontally();
        }

        if self.y2 < self.y1 {
            std::mem::swap(&mut self.y1, &mut self.y2);
            function = function.flipped_vertically();
        }

        function
    }

    pub fn get(&self, field: AnchorField) -> f64 {
        match field {
            AnchorField::X1 => self.x1,
            AnchorField::Y1 => self.y1,
            AnchorField::X2 => self.x2,
            AnchorField::Y2 => self.y2,
        }
    }

    pub fn set(&mut self, field: AnchorField, v: f64) {
        match field {
            AnchorField::X1 => self.x1 = v,
            AnchorField::Y1 => self.y1 = v,
            AnchorField::X2 => self.x2 = v,
            AnchorField::Y2 => self.y2 = v,
        }
    }
}

/// The coordinates opposite to the grabbed handle: the opposite corner
/// needs two, the opposite side one.
pub fn other_side(function: Function) -> (Option<AnchorField>, Option<AnchorField>) {
    let x = if function.grabs_right() {
        Some(AnchorField::X1)
    } else if function.grabs_left() {
        Some(AnchorField::X2)
    } else {
        None
    };

    let y = if function.grabs_bottom() {
        Some(AnchorField::Y1)
    } else if function.grabs_top() {
        Some(AnchorField::Y2)
    } else {
        None
    };

    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> RectangleState {
        let mut r = RectangleState::default();
        r.set_corners([x1, y1, x2, y2]);
        r
    }

    #[test]
    fn signed_round_is_half_away_from_zero() {
        assert_eq!(signed_round(2.5), 3);
        assert_eq!(signed_round(-2.5), -3);
        assert_eq!(signed_round(-2.4), -2);
    }

    #[test]
    fn int_precision_adjust_rounds_half_to_even() {
        assert_eq!(Precision::Int.adjust(2.5), 2.0);
        assert_eq!(Precision::Int.adjust(3.5), 4.0);
        assert_eq!(Precision::Double.adjust(2.5), 2.5);
    }

    #[test]
    fn moving_keeps_rounded_size() {
        let mut r = rect(0.4, 0.4, 10.4, 10.4);
        r.update_int_rect(Function::Creating);
        assert_eq!((r.width_int, r.height_int), (10, 10));

        r.set_corners([0.6, 0.6, 10.6, 10.6]);
        r.update_int_rect(Function::Moving);
        assert_eq!((r.x1_int, r.y1_int), (1, 1));
        assert_eq!((r.width_int, r.height_int), (10, 10));
    }

    #[test]
    fn public_rect_follows_precision() {
        let mut r = rect(0.4, 1.6, 10.2, 5.5);
        r.update_int_rect(Function::ResizingLowerRight);
        assert_eq!(r.public_rect(Precision::Int), PublicRect::new(0.0, 2.0, 10.0, 6.0));
        assert_eq!(r.public_rect(Precision::Double), PublicRect::new(0.4, 1.6, 10.2, 5.5));
    }

    #[test]
    fn fix_flip_swaps_and_relabels() {
        let mut r = rect(20.0, 20.0, 10.0, 10.0);
        let f = r.fix_flip(Function::ResizingUpperLeft);
        assert_eq!(r.corners(), [10.0, 10.0, 20.0, 20.0]);
        assert_eq!(f, Function::ResizingLowerRight);
    }

    #[test]
    fn fix_flip_single_axis() {
        let mut r = rect(0.0, 8.0, 10.0, 4.0);
        let f = r.fix_flip(Function::ResizingTop);
        assert_eq!(r.corners(), [0.0, 4.0, 10.0, 8.0]);
        assert_eq!(f, Function::ResizingBottom);
    }

    #[test]
    fn other_side_of_corner_and_edge() {
        assert_eq!(
            other_side(Function::ResizingUpperLeft),
            (Some(AnchorField::X2), Some(AnchorField::Y2))
        );
        assert_eq!(other_side(Function::ResizingRight), (Some(AnchorField::X1), None));
        assert_eq!(other_side(Function::ResizingBottom), (None, Some(AnchorField::Y1)));
        assert_eq!(other_side(Function::Moving), (None, None));
    }

    #[test]
    fn epsilons_differ() {
        assert!(!fequal(1.0, 1.3));
        assert!(pixel_fequal(1.0, 1.3));
        assert!(!pixel_fequal(1.0, 1.5));
    }
}
