// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// What the user is currently doing with the rectangle.
///
/// Exactly one function is active at a time. It identifies the grabbed
/// handle and selects which clamping and constraint path runs on update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Function {
    Creating,
    Moving,
    ResizingUpperLeft,
    ResizingUpperRight,
    ResizingLowerLeft,
    ResizingLowerRight,
    ResizingLeft,
    ResizingRight,
    ResizingTop,
    ResizingBottom,
    AutoShrink,
    Executing,
    Dead,
}

/// How strongly a pointer position engages the rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Hit {
    /// On a resize handle.
    Direct,
    /// Inside (move) or outside (create).
    Indirect,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CursorKind {
    Crosshair,
    Move,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
    SideLeft,
    SideRight,
    SideTop,
    SideBottom,
}

impl Function {
    /// Creating, any resize, or auto-shrink: the rectangle's shape changes.
    pub fn is_rubber_banding(self) -> bool {
        matches!(
            self,
            Function::Creating
                | Function::ResizingLeft
                | Function::ResizingRight
                | Function::ResizingTop
                | Function::ResizingBottom
                | Function::ResizingUpperLeft
                | Function::ResizingUpperRight
                | Function::ResizingLowerLeft
                | Function::ResizingLowerRight
                | Function::AutoShrink
        )
    }

    /// Rubber-banding or moving.
    pub fn is_adjusting(self) -> bool {
        self.is_rubber_banding() || self == Function::Moving
    }

    /// The function grabs x1.
    pub fn grabs_left(self) -> bool {
        matches!(
            self,
            Function::ResizingUpperLeft | Function::ResizingLowerLeft | Function::ResizingLeft
        )
    }

    /// The function grabs x2.
    pub fn grabs_right(self) -> bool {
        matches!(
            self,
            Function::ResizingUpperRight | Function::ResizingLowerRight | Function::ResizingRight
        )
    }

    /// The function grabs y1.
    pub fn grabs_top(self) -> bool {
        matches!(
            self,
            Function::ResizingUpperLeft | Function::ResizingUpperRight | Function::ResizingTop
        )
    }

    /// The function grabs y2.
    pub fn grabs_bottom(self) -> bool {
        matches!(
            self,
            Function::ResizingLowerLeft | Function::ResizingLowerRight | Function::ResizingBottom
        )
    }

    /// Relabel after x1 and x2 were swapped.
    pub fn flipped_horizontally(self) -> Self {
        match self {
            Function::ResizingUpperLeft => Function::ResizingUpperRight,
            Function::ResizingUpperRight => Function::ResizingUpperLeft,
            Function::ResizingLowerLeft => Function::ResizingLowerRight,
            Function::ResizingLowerRight => Function::ResizingLowerLeft,
            Function::ResizingLeft => Function::ResizingRight,
            Function::ResizingRight => Function::ResizingLeft,
            other => other,
        }
    }

    /// Relabel after y1 and y2 were swapped.
    pub fn flipped_vertically(self) -> Self {
        match self {
            Function::ResizingUpperLeft => Function::ResizingLowerLeft,
            Function::ResizingUpperRight => Function::ResizingLowerRight,
            Function::ResizingLowerLeft => Function::ResizingUpperLeft,
            Function::ResizingLowerRight => Function::ResizingUpperRight,
            Function::ResizingTop => Function::ResizingBottom,
            Function::ResizingBottom => Function::ResizingTop,
            other => other,
        }
    }

    /// Corner function for the first drag of a fresh rectangle, from the
    /// direction of the pointer delta. A zero delta keeps `Creating`.
    pub fn from_drag_direction(dx: f64, dy: f64) -> Self {
        if dx < 0.0 {
            if dy < 0.0 {
                Function::ResizingUpperLeft
            } else {
                Function::ResizingLowerLeft
            }
        } else if dx > 0.0 {
            if dy < 0.0 {
                Function::ResizingUpperRight
            } else {
                Function::ResizingLowerRight
            }
        } else if dy < 0.0 {
            Function::ResizingUpperRight
        } else if dy > 0.0 {
            Function::ResizingLowerRight
        } else {
            Function::Creating
        }
    }

    pub fn hit(self) -> Hit {
        match self {
            Function::ResizingUpperLeft
            | Function::ResizingUpperRight
            | Function::ResizingLowerLeft
            | Function::ResizingLowerRight
            | Function::ResizingLeft
            | Function::ResizingRight
            | Function::ResizingTop
            | Function::ResizingBottom => Hit::Direct,

            Function::Creating | Function::Moving => Hit::Indirect,

            Function::Dead | Function::AutoShrink | Function::Executing => Hit::None,
        }
    }

    pub fn cursor(self) -> Option<CursorKind> {
        let cursor = match self {
            Function::Creating => CursorKind::Crosshair,
            Function::Moving => CursorKind::Move,
            Function::ResizingUpperLeft => CursorKind::CornerTopLeft,
            Function::ResizingUpperRight => CursorKind::CornerTopRight,
            Function::ResizingLowerLeft => CursorKind::CornerBottomLeft,
            Function::ResizingLowerRight => CursorKind::CornerBottomRight,
            Function::ResizingLeft => CursorKind::SideLeft,
            Function::ResizingRight => CursorKind::SideRight,
            Function::ResizingTop => CursorKind::SideTop,
            Function::ResizingBottom => CursorKind::SideBottom,
            _ => return None,
        };
        Some(cursor)
    }
}
