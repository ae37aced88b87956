// Author: Dustin Pilgrim
// License: MIT

pub mod clamp;
pub mod error;
pub mod fixed_rule;
pub mod function;
pub mod geometry;
pub mod handles;
pub mod host;
pub mod options;
pub mod rect;
pub mod tool;

pub use clamp::ClampedSides;
pub use error::RectoolError;
pub use function::{CursorKind, Function, Hit};
pub use geometry::{Precision, RectangleState};
pub use handles::{HandleAnchor, HandleSizes};
pub use host::{RectangleEvent, Response, SnapOffsets, StaticHost, ToolHost};
pub use options::{Constraint, FixedRule, RectangleOptions};
pub use rect::{Bounds, Point, PublicRect, Viewport};
pub use tool::{ArrowKey, Modifier, ReleaseType, ToolRectangle};
