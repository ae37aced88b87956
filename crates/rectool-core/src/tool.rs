// Author: Dustin Pilgrim
// License: MIT

//! The interactive rectangle: pointer, keyboard and option events in,
//! geometry and [`RectangleEvent`]s out.

use crate::clamp;
use crate::error::Result;
use crate::fixed_rule::{self, ResolveContext};
use crate::function::{CursorKind, Function, Hit};
use crate::geometry::{self, Precision, RectangleState, fequal, pixel_fequal};
use crate::handles::HandleSizes;
use crate::host::{RectangleEvent, Response, SnapOffsets, ToolHost};
use crate::options::{Constraint, FixedRule, RectangleOptions, check_aspect, check_fixed_size};
use crate::rect::{Bounds, Point, PublicRect};

/// Pixels moved per arrow key press with the accelerator held.
pub const ARROW_VELOCITY: f64 = 25.0;

pub const DEFAULT_STATUS_TITLE: &str = "Rectangle: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// Modifier keys with a meaning while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Toggles the fixed rule.
    ExtendSelection,
    /// Toggles resizing around the center.
    ToggleBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Normal,
    /// Released without the pointer having moved since the press.
    NoMotion,
    Cancel,
    /// A click on an existing rectangle.
    Click,
}

/// One rectangle editing session.
#[derive(Debug)]
pub struct ToolRectangle<H: ToolHost> {
    host: H,
    options: RectangleOptions,
    precision: Precision,
    force_narrow_mode: bool,
    status_title: String,

    rect: RectangleState,
    saved: [f64; 4],
    function: Function,
    handles: HandleSizes,
    snap: SnapOffsets,

    center: (f64, f64),
    other_side: (f64, f64),
    last: (f64, f64),

    is_first: bool,
    is_new: bool,
    rect_adjusting: bool,
    suppress_updates: u8,

    fixed_center_copy: bool,
    fixed_rule_active_copy: bool,
    modifier_toggle_allowed: bool,

    // Position and size as last published to the options.
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl<H: ToolHost> ToolRectangle<H> {
    pub fn new(host: H, options: RectangleOptions) -> Result<Self> {
        options.validate()?;

        let mut tool = Self {
            host,
            options,
            precision: Precision::default(),
            force_narrow_mode: false,
            status_title: DEFAULT_STATUS_TITLE.to_string(),

            rect: RectangleState::default(),
            saved: [0.0; 4],
            function: Function::Creating,
            handles: HandleSizes::default(),
            snap: SnapOffsets::default(),

            center: (0.0, 0.0),
            other_side: (0.0, 0.0),
            last: (0.0, 0.0),

            is_first: true,
            is_new: false,
            rect_adjusting: false,
            suppress_updates: 0,

            fixed_center_copy: false,
            fixed_rule_active_copy: false,
            modifier_toggle_allowed: false,

            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };

        tool.update_handle_sizes();
        Ok(tool)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &RectangleOptions {
        &self.options
    }

    pub fn state(&self) -> &RectangleState {
        &self.rect
    }

    pub fn function(&self) -> Function {
        self.function
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn handle_sizes(&self) -> HandleSizes {
        self.handles
    }

    pub fn is_first_rectangle(&self) -> bool {
        self.is_first
    }

    /// Whether the current edit started from scratch. Only meaningful
    /// between press and release.
    pub fn is_new_rectangle(&self) -> bool {
        self.is_new
    }

    /// Position and size mirrored into the options: `(x, y, width, height)`.
    pub fn position_and_size(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }

    /// The pivot used while resizing around the center.
    pub fn pivot(&self) -> (f64, f64) {
        self.center
    }

    pub fn cursor(&self) -> Option<CursorKind> {
        self.function.cursor()
    }

    /// The rectangle as collaborators see it, rounded in integer precision.
    pub fn public_rect(&self) -> PublicRect {
        self.rect.public_rect(self.precision)
    }

    // ---------------------------------------------------------------------
    // Pointer and keyboard
    // ---------------------------------------------------------------------

    pub fn button_press(&mut self, p: Point) {
        // Modifier toggles only last for this press.
        self.fixed_center_copy = self.options.fixed_center;
        self.fixed_rule_active_copy = self.options.fixed_rule_active;
        self.modifier_toggle_allowed = true;

        self.saved = self.rect.corners();

        self.setup_snap_offsets(p);

        let snapped = (p.x + self.snap.x as f64, p.y + self.snap.y as f64);
        self.last = snapped;

        if self.function == Function::Creating {
            self.is_new = true;
            self.rect
                .set_corners([snapped.0, snapped.1, snapped.0, snapped.1]);
            self.center = snapped;
            self.other_side = snapped;
        } else {
            self.is_new = false;
            self.center = self.rect.center();
            self.other_side = self.other_side_coord();
        }

        self.rect.update_int_rect(self.function);

        self.rect_adjusting = self.function.is_adjusting();

        self.changed();
        self.update_status();
    }

    pub fn button_release(&mut self, release: ReleaseType) {
        self.host.emit(RectangleEvent::Status(None));

        self.rect_adjusting = false;
        self.set_snap_offsets(SnapOffsets::default());

        self.modifier_toggle_allowed = false;
        self.options.fixed_center = self.fixed_center_copy;
        self.options.fixed_rule_active = self.fixed_rule_active_copy;

        let response = match release {
            ReleaseType::NoMotion if self.is_first => {
                self.restore_saved();
                Some(Response::Cancel)
            }

            ReleaseType::NoMotion | ReleaseType::Normal => {
                if self.rect.x1 != self.rect.x2 && self.rect.y1 != self.rect.y2 {
                    self.change_complete();
                    None
                } else {
                    self.restore_saved();
                    self.is_first.then_some(Response::Cancel)
                }
            }

            ReleaseType::Cancel => {
                self.restore_saved();
                self.is_first.then_some(Response::Cancel)
            }

            ReleaseType::Click => {
                (self.function != Function::Dead).then_some(Response::Confirm)
            }
        };

        self.recalculate_center();
        self.update_options();
        self.changed();

        self.is_first = false;

        if let Some(response) = response {
            self.host.emit(RectangleEvent::Response(response));
        }
    }

    pub fn motion(&mut self, p: Point) {
        if matches!(self.function, Function::Executing | Function::Dead) {
            return;
        }

        let snapped = (p.x + self.snap.x as f64, p.y + self.snap.y as f64);

        // The first drag of a new rectangle grabs the corner it heads for.
        let creating = self.function == Function::Creating;
        if creating {
            let f =
                Function::from_drag_direction(snapped.0 - self.last.0, snapped.1 - self.last.1);
            self.set_function(f);
        }

        self.update_with_coord(snapped.0, snapped.1);
        self.update_status();

        if creating
            && self.function != Function::Creating
            && self.options.active_rule() == Some(FixedRule::Size)
        {
            // A fixed size cannot be resized; carry it centred on the pointer.
            let w = self.rect.width();
            let h = self.rect.height();
            self.set_snap_offsets(SnapOffsets::new(
                (-w / 2.0) as i32,
                (-h / 2.0) as i32,
                w as i32,
                h as i32,
            ));
            self.set_function(Function::Moving);
        }

        self.update_options();
        self.changed();

        self.last = snapped;
    }

    /// How the pointer engages the rectangle, without changing state.
    pub fn hit(&self, p: Point, proximity: bool) -> Hit {
        let function = if self.suppress_updates > 0 {
            self.function
        } else {
            self.calc_function(p, proximity)
        };

        function.hit()
    }

    pub fn hover(&mut self, p: Point, proximity: bool) {
        if self.suppress_updates > 0 {
            self.suppress_updates -= 1;
            return;
        }

        let f = self.calc_function(p, proximity);
        self.set_function(f);
    }

    pub fn leave(&mut self) {
        self.set_function(Function::Dead);
    }

    /// Nudge the grabbed corner or edge, or the whole rectangle when
    /// moving. Returns `false` when the current function has nothing to
    /// nudge.
    pub fn key_press(&mut self, key: ArrowKey, accelerated: bool) -> bool {
        let (mut dx, mut dy) = match key {
            ArrowKey::Up => (0.0, -1.0),
            ArrowKey::Down => (0.0, 1.0),
            ArrowKey::Left => (-1.0, 0.0),
            ArrowKey::Right => (1.0, 0.0),
        };

        if accelerated {
            dx *= ARROW_VELOCITY;
            dy *= ARROW_VELOCITY;
        }

        self.set_snap_offsets(SnapOffsets::default());

        let r = self.rect;
        let (new_x, new_y) = match self.function {
            Function::Moving | Function::ResizingUpperLeft => {
                let p = (r.x1 + dx, r.y1 + dy);
                self.last = p;
                p
            }
            Function::ResizingUpperRight => {
                let p = (r.x2 + dx, r.y1 + dy);
                self.last = p;
                p
            }
            Function::ResizingLowerLeft => {
                let p = (r.x1 + dx, r.y2 + dy);
                self.last = p;
                p
            }
            Function::ResizingLowerRight => {
                let p = (r.x2 + dx, r.y2 + dy);
                self.last = p;
                p
            }
            Function::ResizingLeft => {
                self.last.0 = r.x1 + dx;
                (r.x1 + dx, 0.0)
            }
            Function::ResizingRight => {
                self.last.0 = r.x2 + dx;
                (r.x2 + dx, 0.0)
            }
            Function::ResizingTop => {
                self.last.1 = r.y1 + dy;
                (0.0, r.y1 + dy)
            }
            Function::ResizingBottom => {
                self.last.1 = r.y2 + dy;
                (0.0, r.y2 + dy)
            }
            _ => return false,
        };

        self.update_with_coord(new_x, new_y);
        self.recalculate_center();
        self.update_options();
        self.change_complete();
        self.changed();

        // Keep hover events from reclassifying the nudged handle.
        self.suppress_updates = 2;

        true
    }

    /// A modifier was pressed or released. Either edge toggles, but only
    /// between button press and release.
    pub fn motion_modifier(&mut self, modifier: Modifier, button_down: bool) {
        match modifier {
            Modifier::ExtendSelection => {
                if self.modifier_toggle_allowed {
                    self.options.fixed_rule_active = !self.options.fixed_rule_active;
                }

                if button_down {
                    if !self.options.fixed_rule_active {
                        self.set_other_side_coord(self.other_side);
                    }
                    self.update_with_coord(self.last.0, self.last.1);
                }
            }

            Modifier::ToggleBehavior => {
                if self.modifier_toggle_allowed {
                    self.options.fixed_center = !self.options.fixed_center;
                }

                if self.options.fixed_center {
                    self.update_with_coord(self.last.0, self.last.1);

                    // A held button commits on release instead.
                    if !button_down {
                        self.change_complete();
                    }
                } else if button_down {
                    self.set_other_side_coord(self.other_side);
                }
            }
        }

        self.update_options();
        self.changed();
    }

    // ---------------------------------------------------------------------
    // Option setters
    // ---------------------------------------------------------------------

    /// Replace every option at once. Nothing is re-solved.
    pub fn set_options(&mut self, options: RectangleOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn set_precision(&mut self, precision: Precision) {
        if self.precision != precision {
            self.precision = precision;
            self.update_options();
            self.changed();
        }
    }

    pub fn set_force_narrow_mode(&mut self, force: bool) {
        self.force_narrow_mode = force;
        self.changed();
    }

    /// `None` restores the default title.
    pub fn set_status_title(&mut self, title: Option<String>) {
        self.status_title = title.unwrap_or_else(|| DEFAULT_STATUS_TITLE.to_string());
    }

    pub fn set_fixed_rule(&mut self, rule: FixedRule) {
        self.options.fixed_rule = rule;
    }

    pub fn set_fixed_rule_active(&mut self, active: bool) {
        self.options.fixed_rule_active = active;
    }

    pub fn set_fixed_center(&mut self, fixed_center: bool) {
        self.options.fixed_center = fixed_center;
    }

    pub fn set_fixed_width(&mut self, width: f64) -> Result<()> {
        check_fixed_size(width, self.options.desired_fixed_height)?;
        self.options.desired_fixed_width = width;
        Ok(())
    }

    pub fn set_fixed_height(&mut self, height: f64) -> Result<()> {
        check_fixed_size(self.options.desired_fixed_width, height)?;
        self.options.desired_fixed_height = height;
        Ok(())
    }

    /// Set the fixed size. Asking for the current size transposed turns
    /// the rectangle around its top-left corner.
    pub fn set_fixed_size(&mut self, width: f64, height: f64) -> Result<()> {
        check_fixed_size(width, height)?;

        self.options.desired_fixed_size_width = width;
        self.options.desired_fixed_size_height = height;

        let w = self.rect.width();
        let h = self.rect.height();

        if self.options.fixed_rule_active && fequal(width, h) && fequal(height, w) {
            let (x, y) = (self.rect.x1, self.rect.y1);

            self.synthesize_motion(Function::ResizingLowerRight, self.rect.x2, self.rect.y2);

            self.set_x(x);
            self.set_y(y);
        }

        Ok(())
    }

    /// Set the aspect ratio. Asking for roughly the inverse of the current
    /// ratio swaps the rectangle's width and height.
    pub fn set_aspect(&mut self, numerator: f64, denominator: f64) -> Result<()> {
        check_aspect(numerator, denominator)?;

        self.options.aspect_numerator = numerator;
        self.options.aspect_denominator = denominator;

        let w = self.rect.width();
        let h = self.rect.height();
        let inverse = denominator / numerator;

        // Small rectangles get a wider tolerance.
        let (lower, higher) = if w > h && h > 1.0 {
            (w / (h + 1.0), w / (h - 1.0))
        } else {
            ((w - 1.0) / h, (w + 1.0) / h)
        };

        if self.options.fixed_rule_active && lower < inverse && higher > inverse {
            let new_x2 = self.rect.x1 + h;
            let new_y2 = self.rect.y1 + w;
            self.synthesize_motion(Function::ResizingLowerRight, new_x2, new_y2);
        }

        Ok(())
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
        if !pixel_fequal(self.rect.x1, x) {
            self.synthesize_motion(Function::Moving, x, self.rect.y1);
        }
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
        if !pixel_fequal(self.rect.y1, y) {
            self.synthesize_motion(Function::Moving, self.rect.x1, y);
        }
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        if pixel_fequal(self.rect.width(), width) {
            return;
        }

        let x2 = if self.options.fixed_center {
            self.center.0 + width / 2.0
        } else {
            self.rect.x1 + width
        };

        self.synthesize_motion(Function::ResizingRight, x2, self.rect.y2);
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        if pixel_fequal(self.rect.height(), height) {
            return;
        }

        let y2 = if self.options.fixed_center {
            self.center.1 + height / 2.0
        } else {
            self.rect.y1 + height
        };

        self.synthesize_motion(Function::ResizingBottom, self.rect.x2, y2);
    }

    /// Store corners as given, without running constraints.
    pub fn set_corners(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.rect.set_corners([x1, y1, x2, y2]);

        self.rect.update_int_rect(self.function);
        self.recalculate_center();
        self.update_options();
        self.changed();
    }

    /// Switch constraints, pulling the rectangle into the new bounds.
    pub fn set_constraint(&mut self, constraint: Constraint) {
        if constraint == self.options.constraint {
            return;
        }

        self.options.constraint = constraint;

        if let Some(bounds) = self.constraint_bounds() {
            clamp::clamp(&mut self.rect, bounds, false);
            self.rect.update_int_rect(self.function);
        }

        self.change_complete();
    }

    pub fn set_function(&mut self, function: Function) {
        if self.function != function {
            self.function = function;
            self.changed();
        }
    }

    // ---------------------------------------------------------------------
    // Utilities
    // ---------------------------------------------------------------------

    /// Whether `(x, y)` lies on or inside the public rectangle.
    pub fn point_in_rectangle(&self, x: f64, y: f64) -> bool {
        self.public_rect().contains(x, y)
    }

    /// Size of the pending rectangle, never below one pixel.
    pub fn pending_size(&self) -> (f64, f64) {
        (self.rect.width().max(1.0), self.rect.height().max(1.0))
    }

    /// The size a constrained rectangle may reach: the common size of the
    /// selected drawables under a drawable constraint, else the image.
    pub fn constraint_size(&self) -> (f64, f64) {
        let (iw, ih) = self.host.image_size();
        let image = (iw as f64, ih as f64);

        if self.options.constraint != Constraint::Drawable {
            return image;
        }

        let mut common: Option<(i32, i32)> = None;
        for d in self.host.selected_drawables() {
            let size = (d.width(), d.height());
            match common {
                None => common = Some(size),
                Some(c) if c != size => {
                    common = None;
                    break;
                }
                Some(_) => {}
            }
        }

        match common {
            Some((w, h)) if w > 0 && h > 0 => (w as f64, h as f64),
            _ => image,
        }
    }

    /// Frame an item exactly, dropping any constraint.
    pub fn frame_item(&mut self, item: Bounds) {
        let old = self.function;
        self.set_function(Function::Creating);

        self.set_corners(
            item.x1 as f64,
            item.y1 as f64,
            item.x2 as f64,
            item.y2 as f64,
        );

        self.set_constraint(Constraint::None);
        self.set_function(old);
    }

    /// Shrink the rectangle to the content the host finds inside it.
    pub fn auto_shrink(&mut self, merged: bool) {
        let area = Bounds::new(
            self.rect.x1 as i32,
            self.rect.y1 as i32,
            self.rect.x2 as i32,
            self.rect.y2 as i32,
        );

        let Some(shrunk) = self.host.auto_shrink(area, merged) else {
            return;
        };

        let old = self.function;
        self.function = Function::AutoShrink;

        self.rect.set_corners([
            shrunk.x1 as f64,
            shrunk.y1 as f64,
            shrunk.x2 as f64,
            shrunk.y2 as f64,
        ]);
        self.rect.update_int_rect(self.function);
        self.change_complete();

        self.function = old;
        self.update_options();
        self.changed();
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn calc_function(&self, p: Point, proximity: bool) -> Function {
        let scale = self.host.display_scale();
        self.handles
            .classify(p, proximity, &self.public_rect(), scale)
    }

    /// The update pipeline: move the grabbed part, follow flips, clamp,
    /// enforce the fixed rule, refresh the integer view.
    fn update_with_coord(&mut self, x: f64, y: f64) {
        self.apply_coord(x, y);
        self.function = self.rect.fix_flip(self.function);
        self.handle_general_clamping();

        if self.function != Function::Moving {
            let ctx = ResolveContext {
                function: self.function,
                fixed_center: self.options.fixed_center,
                center: self.center,
            };
            let bounds = self.constraint_bounds();
            fixed_rule::apply_fixed_rule(
                &mut self.rect,
                &ctx,
                &self.options,
                self.host.image_size(),
                bounds,
            );
        }

        self.rect.update_int_rect(self.function);
    }

    fn apply_coord(&mut self, x: f64, y: f64) {
        let f = self.function;
        let r = &mut self.rect;

        if f == Function::Moving {
            let (w, h) = (r.width(), r.height());
            r.set_corners([x, y, x + w, y + h]);
            return;
        }

        let fixed_center = self.options.fixed_center;
        let (cx, cy) = self.center;

        if f.grabs_left() {
            r.x1 = x;
            if fixed_center {
                r.x2 = 2.0 * cx - r.x1;
            }
        } else if f.grabs_right() {
            r.x2 = x;
            if fixed_center {
                r.x1 = 2.0 * cx - r.x2;
            }
        }

        if f.grabs_top() {
            r.y1 = y;
            if fixed_center {
                r.y2 = 2.0 * cy - r.y1;
            }
        } else if f.grabs_bottom() {
            r.y2 = y;
            if fixed_center {
                r.y1 = 2.0 * cy - r.y2;
            }
        }
    }

    fn handle_general_clamping(&mut self) {
        let Some(bounds) = self.constraint_bounds() else {
            return;
        };

        if self.function != Function::Moving {
            clamp::clamp(&mut self.rect, bounds, self.options.fixed_center);
        } else {
            clamp::keep_inside(&mut self.rect, bounds);
        }
    }

    fn constraint_bounds(&self) -> Option<Bounds> {
        clamp::constraint_bounds(
            self.options.constraint,
            self.host.image_size(),
            &self.host.selected_drawables(),
        )
    }

    /// Offsets from the precision-adjusted pointer to the grabbed part.
    fn setup_snap_offsets(&mut self, p: Point) {
        let r = self.public_rect();
        let cx = self.precision.adjust(p.x);
        let cy = self.precision.adjust(p.y);

        let (x, y, w, h) = match self.function {
            Function::Creating => (0.0, 0.0, 0.0, 0.0),
            Function::ResizingUpperLeft => (r.x1 - cx, r.y1 - cy, 0.0, 0.0),
            Function::ResizingUpperRight => (r.x2 - cx, r.y1 - cy, 0.0, 0.0),
            Function::ResizingLowerLeft => (r.x1 - cx, r.y2 - cy, 0.0, 0.0),
            Function::ResizingLowerRight => (r.x2 - cx, r.y2 - cy, 0.0, 0.0),
            Function::ResizingLeft => (r.x1 - cx, 0.0, 0.0, 0.0),
            Function::ResizingRight => (r.x2 - cx, 0.0, 0.0, 0.0),
            Function::ResizingTop => (0.0, r.y1 - cy, 0.0, 0.0),
            Function::ResizingBottom => (0.0, r.y2 - cy, 0.0, 0.0),
            Function::Moving => (r.x1 - cx, r.y1 - cy, r.width(), r.height()),
            _ => return,
        };

        self.set_snap_offsets(SnapOffsets::new(x as i32, y as i32, w as i32, h as i32));
    }

    fn set_snap_offsets(&mut self, offsets: SnapOffsets) {
        self.snap = offsets;
        self.host.set_snap_offsets(offsets);
    }

    fn other_side_coord(&self) -> (f64, f64) {
        let (fx, fy) = geometry::other_side(self.function);
        let mut coord = self.other_side;

        if let Some(fx) = fx {
            coord.0 = self.rect.get(fx);
        }
        if let Some(fy) = fy {
            coord.1 = self.rect.get(fy);
        }

        coord
    }

    fn set_other_side_coord(&mut self, (x, y): (f64, f64)) {
        let (fx, fy) = geometry::other_side(self.function);

        if let Some(fx) = fx {
            self.rect.set(fx, x);
        }
        if let Some(fy) = fy {
            self.rect.set(fy, y);
        }

        self.function = self.rect.fix_flip(self.function);
        self.rect.update_int_rect(self.function);
    }

    fn restore_saved(&mut self) {
        self.rect.set_corners(self.saved);
        self.rect.update_int_rect(self.function);
    }

    fn recalculate_center(&mut self) {
        self.center = self.rect.center();
    }

    fn synthesize_motion(&mut self, function: Function, x: f64, y: f64) {
        // A drag in progress updates through motion events.
        if self.rect_adjusting {
            return;
        }

        let old = self.function;
        self.set_function(function);

        self.update_with_coord(x, y);
        self.recalculate_center();
        self.update_options();

        self.set_function(old);
        self.change_complete();
    }

    fn update_options(&mut self) {
        let r = self.public_rect();

        if !fequal(self.x, r.x1) {
            self.x = r.x1;
        }
        if !fequal(self.y, r.y1) {
            self.y = r.y1;
        }
        if !fequal(self.width, r.width()) {
            self.width = r.width();
        }
        if !fequal(self.height, r.height()) {
            self.height = r.height();
        }
    }

    fn update_handle_sizes(&mut self) {
        self.handles = HandleSizes::compute(
            &self.public_rect(),
            self.host.display_scale(),
            self.host.scaled_viewport(),
            self.force_narrow_mode,
        );
    }

    fn changed(&mut self) {
        self.update_handle_sizes();
        self.host.emit(RectangleEvent::Changed);
    }

    fn change_complete(&mut self) {
        let rect = self.public_rect();
        self.host.emit(RectangleEvent::ChangeComplete(rect));
    }

    fn update_status(&mut self) {
        let r = self.public_rect();

        let text = if self.function == Function::Moving {
            format!("Position: {}, {}", r.x1, r.y1)
        } else {
            let w = r.width() as i32;
            let h = r.height() as i32;

            let mut text = format!("{}{} × {}", self.status_title, w, h);
            if w > 0 && h > 0 {
                text.push_str(&format!("  ({:.2}:1)", w as f64 / h as f64));
            }
            text
        };

        self.host.emit(RectangleEvent::Status(Some(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticHost;

    fn tool() -> ToolRectangle<StaticHost> {
        let host = StaticHost::new(200, 200, (1.0, 1.0)).unwrap();
        ToolRectangle::new(host, RectangleOptions::default()).unwrap()
    }

    fn drag(t: &mut ToolRectangle<StaticHost>, from: (f64, f64), to: (f64, f64)) {
        t.button_press(Point::new(from.0, from.1));
        t.motion(Point::new(to.0, to.1));
        t.button_release(ReleaseType::Normal);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let host = StaticHost::new(10, 10, (1.0, 1.0)).unwrap();
        let opts = RectangleOptions {
            aspect_numerator: -1.0,
            ..Default::default()
        };
        assert!(ToolRectangle::new(host, opts).is_err());
    }

    #[test]
    fn status_shows_size_and_ratio() {
        let mut t = tool();
        t.button_press(Point::new(0.0, 0.0));
        t.motion(Point::new(40.0, 20.0));
        assert_eq!(t.host().status(), Some("Rectangle: 40 × 20  (2.00:1)"));
    }

    #[test]
    fn status_while_moving_shows_position() {
        let mut t = tool();
        drag(&mut t, (10.0, 10.0), (60.0, 60.0));

        t.hover(Point::new(35.0, 35.0), true);
        assert_eq!(t.function(), Function::Moving);

        t.button_press(Point::new(35.0, 35.0));
        t.motion(Point::new(45.0, 40.0));
        assert_eq!(t.host().status(), Some("Position: 20, 15"));
    }

    #[test]
    fn release_clears_status() {
        let mut t = tool();
        drag(&mut t, (0.0, 0.0), (10.0, 10.0));
        assert_eq!(t.host().status(), None);
    }

    #[test]
    fn moving_snap_offsets_follow_grab_point() {
        let mut t = tool();
        drag(&mut t, (10.0, 10.0), (60.0, 60.0));

        t.hover(Point::new(30.0, 40.0), true);
        t.button_press(Point::new(30.0, 40.0));
        assert_eq!(t.host().snap_offsets(), SnapOffsets::new(-20, -30, 50, 50));

        t.motion(Point::new(40.0, 40.0));
        assert_eq!(t.public_rect(), PublicRect::new(20.0, 10.0, 70.0, 60.0));

        t.button_release(ReleaseType::Normal);
        assert_eq!(t.host().snap_offsets(), SnapOffsets::default());
    }

    #[test]
    fn key_press_suppresses_two_hovers() {
        let mut t = tool();
        drag(&mut t, (10.0, 10.0), (110.0, 110.0));
        t.hover(Point::new(108.0, 108.0), true);
        assert_eq!(t.function(), Function::ResizingLowerRight);

        assert!(t.key_press(ArrowKey::Right, true));
        assert_eq!(t.public_rect(), PublicRect::new(10.0, 10.0, 135.0, 110.0));

        t.hover(Point::new(60.0, 60.0), true);
        t.hover(Point::new(60.0, 60.0), true);
        assert_eq!(t.function(), Function::ResizingLowerRight);

        t.hover(Point::new(60.0, 60.0), true);
        assert_eq!(t.function(), Function::Moving);
    }

    #[test]
    fn key_press_without_grab_does_nothing() {
        let mut t = tool();
        t.leave();
        assert!(!t.key_press(ArrowKey::Up, false));
    }

    #[test]
    fn pending_size_is_at_least_one() {
        let t = tool();
        assert_eq!(t.pending_size(), (1.0, 1.0));
    }

    #[test]
    fn options_mirror_public_rect() {
        let mut t = tool();
        drag(&mut t, (10.0, 20.0), (40.0, 60.0));
        assert_eq!(t.position_and_size(), (10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn set_options_validates_and_keeps_old_on_error() {
        let mut t = tool();
        let bad = RectangleOptions {
            desired_fixed_size_width: f64::INFINITY,
            ..Default::default()
        };
        assert!(t.set_options(bad).is_err());
        assert_eq!(t.options(), &RectangleOptions::default());

        let good = RectangleOptions {
            constraint: Constraint::Image,
            fixed_center: true,
            ..Default::default()
        };
        t.set_options(good.clone()).unwrap();
        assert_eq!(t.options(), &good);
    }

    #[test]
    fn custom_status_title() {
        let mut t = tool();
        t.set_status_title(Some("Crop: ".to_string()));
        t.button_press(Point::new(0.0, 0.0));
        t.motion(Point::new(30.0, 10.0));
        assert_eq!(t.host().status(), Some("Crop: 30 × 10  (3.00:1)"));

        t.set_status_title(None);
        t.motion(Point::new(20.0, 10.0));
        assert_eq!(t.host().status(), Some("Rectangle: 20 × 10  (2.00:1)"));
    }

    #[test]
    fn into_host_hands_back_the_recording() {
        let mut t = tool();
        drag(&mut t, (10.0, 10.0), (20.0, 30.0));

        let host = t.into_host();
        assert_eq!(host.completed(), vec![PublicRect::new(10.0, 10.0, 20.0, 30.0)]);
    }

    #[test]
    fn handle_sizes_follow_visible_part_of_viewport() {
        let full = StaticHost::new(400, 400, (1.0, 1.0)).unwrap();
        let mut t = ToolRectangle::new(full, RectangleOptions::default()).unwrap();
        t.set_corners(0.0, 0.0, 200.0, 200.0);
        let h = t.handle_sizes();
        assert!(!h.narrow);
        assert_eq!((h.corner_w, h.top_bottom_w), (50, 50));

        let clipped = StaticHost::new(400, 400, (1.0, 1.0))
            .unwrap()
            .with_viewport(crate::rect::Viewport::new(0, 0, 120, 120));
        let mut t = ToolRectangle::new(clipped, RectangleOptions::default()).unwrap();
        t.set_corners(0.0, 0.0, 200.0, 200.0);
        let h = t.handle_sizes();
        assert!(!h.narrow);
        assert_eq!((h.corner_w, h.corner_h), (30, 30));
        assert_eq!(h.top_bottom_w, 110, "side handles are sized from the full width");

        let sliver = StaticHost::new(400, 400, (1.0, 1.0))
            .unwrap()
            .with_viewport(crate::rect::Viewport::new(170, 0, 200, 400));
        let mut t = ToolRectangle::new(sliver, RectangleOptions::default()).unwrap();
        t.set_corners(0.0, 0.0, 200.0, 200.0);
        assert!(t.handle_sizes().narrow, "30 px visible is below the threshold");
    }
}
