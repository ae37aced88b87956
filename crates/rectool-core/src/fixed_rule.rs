// Author: Dustin Pilgrim
// License: MIT

//! Enforcement of the fixed aspect / width / height / size rules on top of
//! a raw drag update.

use crate::clamp::{self, ClampedSides};
use crate::function::Function;
use crate::geometry::RectangleState;
use crate::options::{FixedRule, RectangleOptions};
use crate::rect::Bounds;

/// Which side(s) the aspect solver moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideToResize {
    None,
    Left,
    Right,
    Top,
    Bottom,
    LeftAndRightSymmetrically,
    TopAndBottomSymmetrically,
}

/// Per-update inputs the resolver needs besides the rectangle itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext {
    pub function: Function,
    pub fixed_center: bool,
    /// Pivot used by symmetric adjustments.
    pub center: (f64, f64),
}

/// The target aspect, kept away from 0 and infinity by the image size.
/// An undefined ratio falls to the lower bound.
pub fn target_aspect(numerator: f64, denominator: f64, image_size: (i32, i32)) -> f64 {
    let ratio = numerator / denominator;
    let lo = 1.0 / image_size.1 as f64;
    let hi = image_size.0 as f64;

    if ratio.is_nan() || ratio < lo {
        lo
    } else if ratio > hi {
        hi
    } else {
        ratio
    }
}

/// Pick the side(s) to move so the rectangle reaches `aspect`.
///
/// With a fixed center only symmetric pairs are allowed. Otherwise a side
/// that shrinks the rectangle is always safe; a side that grows it is only
/// used when it has not been clamped.
pub fn side_to_resize(
    function: Function,
    fixed_center: bool,
    current_aspect: f64,
    aspect: f64,
    clamped: ClampedSides,
) -> SideToResize {
    use Function as F;
    use SideToResize as S;

    let free = |sides: ClampedSides| !clamped.intersects(sides);

    if fixed_center {
        if current_aspect > aspect {
            // Prefer top/bottom unless that is what is grabbed.
            match function {
                F::ResizingLeft
                | F::ResizingRight
                | F::ResizingUpperLeft
                | F::ResizingUpperRight
                | F::ResizingLowerLeft
                | F::ResizingLowerRight => {
                    if free(ClampedSides::TOP | ClampedSides::BOTTOM) {
                        S::TopAndBottomSymmetrically
                    } else {
                        S::LeftAndRightSymmetrically
                    }
                }
                _ => S::LeftAndRightSymmetrically,
            }
        } else {
            match function {
                F::ResizingTop
                | F::ResizingBottom
                | F::ResizingUpperLeft
                | F::ResizingUpperRight
                | F::ResizingLowerLeft
                | F::ResizingLowerRight => {
                    if free(ClampedSides::LEFT | ClampedSides::RIGHT) {
                        S::LeftAndRightSymmetrically
                    } else {
                        S::TopAndBottomSymmetrically
                    }
                }
                _ => S::TopAndBottomSymmetrically,
            }
        }
    } else if current_aspect > aspect {
        // Too wide: left/right shrink, top/bottom grow.
        match function {
            F::ResizingUpperLeft if free(ClampedSides::TOP) => S::Top,
            F::ResizingUpperLeft => S::Left,
            F::ResizingUpperRight if free(ClampedSides::TOP) => S::Top,
            F::ResizingUpperRight => S::Right,
            F::ResizingLowerLeft if free(ClampedSides::BOTTOM) => S::Bottom,
            F::ResizingLowerLeft => S::Left,
            F::ResizingLowerRight if free(ClampedSides::BOTTOM) => S::Bottom,
            F::ResizingLowerRight => S::Right,
            F::ResizingLeft if free(ClampedSides::TOP | ClampedSides::BOTTOM) => {
                S::TopAndBottomSymmetrically
            }
            F::ResizingLeft => S::Left,
            F::ResizingRight if free(ClampedSides::TOP | ClampedSides::BOTTOM) => {
                S::TopAndBottomSymmetrically
            }
            F::ResizingRight => S::Right,
            F::ResizingTop | F::ResizingBottom => S::LeftAndRightSymmetrically,
            _ => first_free_side(clamped),
        }
    } else {
        // Too tall (or degenerate): top/bottom shrink, left/right grow.
        match function {
            F::ResizingUpperLeft if free(ClampedSides::LEFT) => S::Left,
            F::ResizingUpperLeft => S::Top,
            F::ResizingUpperRight if free(ClampedSides::RIGHT) => S::Right,
            F::ResizingUpperRight => S::Top,
            F::ResizingLowerLeft if free(ClampedSides::LEFT) => S::Left,
            F::ResizingLowerLeft => S::Bottom,
            F::ResizingLowerRight if free(ClampedSides::RIGHT) => S::Right,
            F::ResizingLowerRight => S::Bottom,
            F::ResizingTop if free(ClampedSides::LEFT | ClampedSides::RIGHT) => {
                S::LeftAndRightSymmetrically
            }
            F::ResizingTop => S::Top,
            F::ResizingBottom if free(ClampedSides::LEFT | ClampedSides::RIGHT) => {
                S::LeftAndRightSymmetrically
            }
            F::ResizingBottom => S::Bottom,
            F::ResizingLeft | F::ResizingRight => S::TopAndBottomSymmetrically,
            _ => first_free_side(clamped),
        }
    }
}

fn first_free_side(clamped: ClampedSides) -> SideToResize {
    if !clamped.contains(ClampedSides::BOTTOM) {
        SideToResize::Bottom
    } else if !clamped.contains(ClampedSides::RIGHT) {
        SideToResize::Right
    } else if !clamped.contains(ClampedSides::TOP) {
        SideToResize::Top
    } else if !clamped.contains(ClampedSides::LEFT) {
        SideToResize::Left
    } else {
        SideToResize::None
    }
}

/// Solve the aspect equation for the side(s) picked by [`side_to_resize`].
pub fn apply_aspect(
    rect: &mut RectangleState,
    ctx: &ResolveContext,
    aspect: f64,
    clamped: ClampedSides,
) {
    let current_w = rect.width();
    let current_h = rect.height();
    let current_aspect = current_w / current_h;

    if current_aspect == aspect {
        return;
    }

    let side = side_to_resize(ctx.function, ctx.fixed_center, current_aspect, aspect, clamped);

    match side {
        SideToResize::None => {}
        SideToResize::Left => rect.x1 = rect.x2 - aspect * current_h,
        SideToResize::Right => rect.x2 = rect.x1 + aspect * current_h,
        SideToResize::Top => rect.y1 = rect.y2 - current_w / aspect,
        SideToResize::Bottom => rect.y2 = rect.y1 + current_w / aspect,
        SideToResize::TopAndBottomSymmetrically => {
            let correct_h = current_w / aspect;
            rect.y1 = ctx.center.1 - correct_h / 2.0;
            rect.y2 = rect.y1 + correct_h;
        }
        SideToResize::LeftAndRightSymmetrically => {
            let correct_w = current_h * aspect;
            rect.x1 = ctx.center.0 - correct_w / 2.0;
            rect.x2 = rect.x1 + correct_w;
        }
    }
}

/// Force the width, centred on the pivot with a fixed center and anchored
/// on the opposite side otherwise. Bounds only ever translate the result.
pub fn apply_fixed_width(
    rect: &mut RectangleState,
    ctx: &ResolveContext,
    width: f64,
    bounds: Option<Bounds>,
) {
    if ctx.function.grabs_left() || ctx.function.grabs_right() {
        if ctx.fixed_center {
            rect.x1 = ctx.center.0 - width / 2.0;
            rect.x2 = rect.x1 + width;
        } else if ctx.function.grabs_left() {
            rect.x1 = rect.x2 - width;
        } else {
            rect.x2 = rect.x1 + width;
        }
    }

    if let Some(b) = bounds {
        clamp::keep_inside_horizontally(rect, b);
    }
}

pub fn apply_fixed_height(
    rect: &mut RectangleState,
    ctx: &ResolveContext,
    height: f64,
    bounds: Option<Bounds>,
) {
    if ctx.function.grabs_top() || ctx.function.grabs_bottom() {
        if ctx.fixed_center {
            rect.y1 = ctx.center.1 - height / 2.0;
            rect.y2 = rect.y1 + height;
        } else if ctx.function.grabs_top() {
            rect.y1 = rect.y2 - height;
        } else {
            rect.y2 = rect.y1 + height;
        }
    }

    if let Some(b) = bounds {
        clamp::keep_inside_vertically(rect, b);
    }
}

/// Apply the active fixed rule. Aspect under a bounds constraint runs in
/// two passes: solve, clamp while recording the clamped sides, solve
/// again without growing those sides. The second pass is accepted as is,
/// even when no rectangle can satisfy both the aspect and the bounds.
pub fn apply_fixed_rule(
    rect: &mut RectangleState,
    ctx: &ResolveContext,
    options: &RectangleOptions,
    image_size: (i32, i32),
    bounds: Option<Bounds>,
) {
    match options.active_rule() {
        None => {}

        Some(FixedRule::Aspect) => {
            let aspect = target_aspect(
                options.aspect_numerator,
                options.aspect_denominator,
                image_size,
            );

            apply_aspect(rect, ctx, aspect, ClampedSides::empty());

            if let Some(b) = bounds {
                let clamped = clamp::clamp(rect, b, ctx.fixed_center);
                apply_aspect(rect, ctx, aspect, clamped);
            }
        }

        Some(FixedRule::Size) => {
            apply_fixed_width(rect, ctx, options.desired_fixed_size_width, bounds);
            apply_fixed_height(rect, ctx, options.desired_fixed_size_height, bounds);
        }

        Some(FixedRule::Width) => {
            apply_fixed_width(rect, ctx, options.desired_fixed_width, bounds);
        }

        Some(FixedRule::Height) => {
            apply_fixed_height(rect, ctx, options.desired_fixed_height, bounds);
        }
    }
}
