// Author: Dustin Pilgrim
// License: MIT

//! The boundary between the rectangle engine and whatever hosts it.

use serde::{Deserialize, Serialize};

use crate::error::{RectoolError, Result};
use crate::rect::{Bounds, PublicRect, Viewport};

/// Offsets added to raw pointer coordinates so the grabbed handle, not
/// the pointer, follows snapping. Width/height are non-zero only when the
/// whole rectangle snaps (moving).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapOffsets {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SnapOffsets {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Response {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RectangleEvent {
    /// Geometry or visual state changed; redraw.
    Changed,
    /// A rectangle edit was committed.
    ChangeComplete(PublicRect),
    Response(Response),
    /// Status bar text, or `None` to clear it.
    Status(Option<String>),
}

/// Services the engine needs from its environment.
pub trait ToolHost {
    /// Image pixels to screen pixels, per axis.
    fn display_scale(&self) -> (f64, f64);

    fn scaled_viewport(&self) -> Viewport;

    fn image_size(&self) -> (i32, i32);

    /// Bounds of the selected drawables in image coordinates.
    fn selected_drawables(&self) -> Vec<Bounds>;

    fn set_snap_offsets(&mut self, offsets: SnapOffsets);

    fn emit(&mut self, event: RectangleEvent);

    /// Shrink `area` to the non-empty content it covers. `merged` shrinks
    /// against the composited image instead of the selected drawables.
    fn auto_shrink(&mut self, _area: Bounds, _merged: bool) -> Option<Bounds> {
        None
    }
}

/// A host with fixed geometry that records what the engine tells it.
#[derive(Debug, Clone)]
pub struct StaticHost {
    image_size: (i32, i32),
    scale: (f64, f64),
    viewport: Viewport,
    drawables: Vec<Bounds>,
    content: Option<Bounds>,

    snap_offsets: SnapOffsets,
    events: Vec<RectangleEvent>,
}

impl StaticHost {
    /// The viewport defaults to the whole image at the given scale.
    pub fn new(image_width: i32, image_height: i32, scale: (f64, f64)) -> Result<Self> {
        if image_width <= 0 || image_height <= 0 {
            return Err(RectoolError::EmptyImage {
                width: image_width,
                height: image_height,
            });
        }

        let (sx, sy) = scale;
        if !(sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0) {
            return Err(RectoolError::InvalidScale { x: sx, y: sy });
        }

        let viewport = Viewport::new(
            0,
            0,
            (image_width as f64 * sx) as i32,
            (image_height as f64 * sy) as i32,
        );

        Ok(Self {
            image_size: (image_width, image_height),
            scale,
            viewport,
            drawables: Vec::new(),
            content: None,
            snap_offsets: SnapOffsets::default(),
            events: Vec::new(),
        })
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_drawables(mut self, drawables: Vec<Bounds>) -> Self {
        self.drawables = drawables;
        self
    }

    /// Region treated as non-empty by [`ToolHost::auto_shrink`].
    pub fn with_content(mut self, content: Bounds) -> Self {
        self.content = Some(content);
        self
    }

    pub fn snap_offsets(&self) -> SnapOffsets {
        self.snap_offsets
    }

    pub fn events(&self) -> &[RectangleEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RectangleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn responses(&self) -> Vec<Response> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RectangleEvent::Response(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn completed(&self) -> Vec<PublicRect> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RectangleEvent::ChangeComplete(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// The status text currently shown, if any.
    pub fn status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            RectangleEvent::Status(s) => Some(s.as_deref()),
            _ => None,
        })?
    }
}

impl ToolHost for StaticHost {
    fn display_scale(&self) -> (f64, f64) {
        self.scale
    }

    fn scaled_viewport(&self) -> Viewport {
        self.viewport
    }

    fn image_size(&self) -> (i32, i32) {
        self.image_size
    }

    fn selected_drawables(&self) -> Vec<Bounds> {
        self.drawables.clone()
    }

    fn set_snap_offsets(&mut self, offsets: SnapOffsets) {
        self.snap_offsets = offsets;
    }

    fn emit(&mut self, event: RectangleEvent) {
        self.events.push(event);
    }

    fn auto_shrink(&mut self, area: Bounds, _merged: bool) -> Option<Bounds> {
        let content = self.content?;

        let shrunk = Bounds::new(
            area.x1.max(content.x1),
            area.y1.max(content.y1),
            area.x2.min(content.x2),
            area.y2.min(content.y2),
        );

        (shrunk.width() > 0 && shrunk.height() > 0).then_some(shrunk)
    }
}
