// Author: Dustin Pilgrim
// License: MIT

use rectool_core::{
    Bounds, Constraint, FixedRule, Function, Point, PublicRect, RectangleOptions, ReleaseType,
    StaticHost, ToolRectangle,
};

const RESIZES: [Function; 8] = [
    Function::ResizingUpperLeft,
    Function::ResizingUpperRight,
    Function::ResizingLowerLeft,
    Function::ResizingLowerRight,
    Function::ResizingLeft,
    Function::ResizingRight,
    Function::ResizingTop,
    Function::ResizingBottom,
];

fn image_tool(options: RectangleOptions) -> ToolRectangle<StaticHost> {
    let host = StaticHost::new(100, 100, (1.0, 1.0)).unwrap();
    ToolRectangle::new(host, options).unwrap()
}

/// Where the handle of `f` sits on `(x1, y1, x2, y2)`.
fn handle_point(f: Function, [x1, y1, x2, y2]: [f64; 4]) -> Point {
    let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    let x = if f.grabs_left() {
        x1
    } else if f.grabs_right() {
        x2
    } else {
        mx
    };
    let y = if f.grabs_top() {
        y1
    } else if f.grabs_bottom() {
        y2
    } else {
        my
    };
    Point::new(x, y)
}

#[test]
fn test_image_constraint_clamps_resize() {
    let mut t = image_tool(RectangleOptions {
        constraint: Constraint::Image,
        ..Default::default()
    });

    t.button_press(Point::new(10.0, 10.0));
    t.motion(Point::new(500.0, 500.0));

    assert_eq!(t.state().corners(), [10.0, 10.0, 100.0, 100.0]);
}

#[test]
fn test_image_constraint_translates_move() {
    let mut t = image_tool(RectangleOptions {
        constraint: Constraint::Image,
        ..Default::default()
    });
    t.set_corners(80.0, 80.0, 130.0, 130.0);

    t.set_function(Function::Moving);
    t.button_press(Point::new(105.0, 105.0));
    t.motion(Point::new(150.0, 20.0));

    assert_eq!(t.state().corners(), [50.0, 0.0, 100.0, 50.0]);
}

#[test]
fn test_aspect_lock_for_every_resize_handle() {
    let options = RectangleOptions {
        fixed_rule_active: true,
        fixed_rule: FixedRule::Aspect,
        aspect_numerator: 2.0,
        aspect_denominator: 1.0,
        ..Default::default()
    };
    let host = StaticHost::new(400, 400, (1.0, 1.0)).unwrap();
    let mut t = ToolRectangle::new(host, options).unwrap();

    let start = [50.0, 50.0, 150.0, 100.0];

    for f in RESIZES {
        t.set_corners(start[0], start[1], start[2], start[3]);
        t.set_function(f);

        let p = handle_point(f, start);
        t.button_press(p);
        t.motion(Point::new(p.x + 37.0, p.y + 23.0));

        let s = t.state();
        let ratio = s.width() / s.height();
        assert!(
            (ratio - 2.0).abs() < 1e-9,
            "{f:?}: expected 2:1, got {ratio} for {:?}",
            s.corners()
        );

        t.button_release(ReleaseType::Normal);
    }
}

#[test]
fn test_aspect_with_fixed_center_keeps_pivot() {
    let options = RectangleOptions {
        fixed_rule_active: true,
        fixed_rule: FixedRule::Aspect,
        aspect_numerator: 1.0,
        aspect_denominator: 1.0,
        fixed_center: true,
        ..Default::default()
    };
    let host = StaticHost::new(400, 400, (1.0, 1.0)).unwrap();
    let mut t = ToolRectangle::new(host, options).unwrap();
    t.set_corners(100.0, 100.0, 200.0, 200.0);

    t.set_function(Function::ResizingLowerRight);
    t.button_press(Point::new(200.0, 200.0));
    t.motion(Point::new(260.0, 220.0));

    let s = t.state();
    assert_eq!(s.center(), (150.0, 150.0));
    assert!((s.width() - s.height()).abs() < 1e-9, "got {:?}", s.corners());
}

#[test]
fn test_aspect_reclamped_inside_image() {
    let mut t = image_tool(RectangleOptions {
        constraint: Constraint::Image,
        fixed_rule_active: true,
        fixed_rule: FixedRule::Aspect,
        aspect_numerator: 1.0,
        aspect_denominator: 2.0,
        ..Default::default()
    });

    t.button_press(Point::new(0.0, 0.0));
    t.motion(Point::new(60.0, 10.0));

    assert_eq!(
        t.state().corners(),
        [0.0, 0.0, 50.0, 100.0],
        "the clamped bottom should be traded for a narrower width"
    );
}

#[test]
fn test_extreme_aspect_is_limited_by_image() {
    let mut t = image_tool(RectangleOptions {
        constraint: Constraint::Image,
        fixed_rule_active: true,
        fixed_rule: FixedRule::Aspect,
        aspect_numerator: 1000.0,
        aspect_denominator: 1.0,
        ..Default::default()
    });

    t.button_press(Point::new(0.0, 0.0));
    t.motion(Point::new(50.0, 50.0));

    assert_eq!(t.state().corners(), [0.0, 0.0, 100.0, 1.0]);
}

#[test]
fn test_fixed_width_is_translated_not_resized() {
    let mut t = image_tool(RectangleOptions {
        constraint: Constraint::Image,
        fixed_rule_active: true,
        fixed_rule: FixedRule::Width,
        desired_fixed_width: 40.0,
        ..Default::default()
    });

    t.button_press(Point::new(80.0, 10.0));
    t.motion(Point::new(90.0, 30.0));

    assert_eq!(t.state().corners(), [60.0, 10.0, 100.0, 30.0]);
}

#[test]
fn test_fixed_height_follows_drag_side() {
    let mut t = image_tool(RectangleOptions {
        fixed_rule_active: true,
        fixed_rule: FixedRule::Height,
        desired_fixed_height: 25.0,
        ..Default::default()
    });

    t.button_press(Point::new(50.0, 50.0));
    t.motion(Point::new(40.0, 45.0));

    assert_eq!(t.function(), Function::ResizingUpperLeft);
    assert_eq!(t.state().corners(), [40.0, 25.0, 50.0, 50.0]);
}

#[test]
fn test_drawable_constraint_uses_union() {
    let host = StaticHost::new(200, 200, (1.0, 1.0))
        .unwrap()
        .with_drawables(vec![
            Bounds::from_offset(20, 20, 50, 50),
            Bounds::from_offset(40, 60, 60, 30),
        ]);
    let mut t = ToolRectangle::new(
        host,
        RectangleOptions {
            constraint: Constraint::Drawable,
            ..Default::default()
        },
    )
    .unwrap();

    t.button_press(Point::new(30.0, 30.0));
    t.motion(Point::new(0.0, 150.0));

    assert_eq!(t.state().corners(), [20.0, 30.0, 30.0, 90.0]);
}

#[test]
fn test_set_constraint_clamps_and_completes() {
    let mut t = image_tool(RectangleOptions::default());
    t.set_corners(-10.0, 20.0, 50.0, 150.0);
    t.host_mut().take_events();

    t.set_constraint(Constraint::Image);

    assert_eq!(t.state().corners(), [0.0, 20.0, 50.0, 100.0]);
    assert_eq!(
        t.host().completed(),
        vec![PublicRect::new(0.0, 20.0, 50.0, 100.0)]
    );

    // Same constraint again is a no-op.
    t.set_constraint(Constraint::Image);
    assert_eq!(t.host().completed().len(), 1);
}

#[test]
fn test_frame_item_drops_constraint() {
    let mut t = image_tool(RectangleOptions {
        constraint: Constraint::Image,
        ..Default::default()
    });
    t.set_function(Function::Moving);

    t.frame_item(Bounds::from_offset(-20, 10, 200, 30));

    assert_eq!(t.state().corners(), [-20.0, 10.0, 180.0, 40.0]);
    assert_eq!(t.options().constraint, Constraint::None);
    assert_eq!(t.function(), Function::Moving);
}

#[test]
fn test_constraint_size() {
    let same = StaticHost::new(300, 200, (1.0, 1.0))
        .unwrap()
        .with_drawables(vec![
            Bounds::from_offset(0, 0, 40, 30),
            Bounds::from_offset(10, 10, 40, 30),
        ]);
    let opts = RectangleOptions {
        constraint: Constraint::Drawable,
        ..Default::default()
    };
    let t = ToolRectangle::new(same, opts.clone()).unwrap();
    assert_eq!(t.constraint_size(), (40.0, 30.0));

    let mixed = StaticHost::new(300, 200, (1.0, 1.0))
        .unwrap()
        .with_drawables(vec![
            Bounds::from_offset(0, 0, 40, 30),
            Bounds::from_offset(10, 10, 41, 30),
        ]);
    let t = ToolRectangle::new(mixed, opts).unwrap();
    assert_eq!(t.constraint_size(), (300.0, 200.0));
}

#[test]
fn test_auto_shrink_commits_host_bounds() {
    let host = StaticHost::new(100, 100, (1.0, 1.0))
        .unwrap()
        .with_content(Bounds::new(20, 30, 60, 70));
    let mut t = ToolRectangle::new(host, RectangleOptions::default()).unwrap();
    t.set_corners(0.0, 0.0, 100.0, 100.0);
    t.set_function(Function::Moving);
    t.host_mut().take_events();

    t.auto_shrink(false);

    assert_eq!(t.public_rect(), PublicRect::new(20.0, 30.0, 60.0, 70.0));
    assert_eq!(t.function(), Function::Moving);
    assert_eq!(t.host().completed().len(), 1);
    assert_eq!(t.position_and_size(), (20.0, 30.0, 40.0, 40.0));
}

#[test]
fn test_point_in_rectangle_includes_edges() {
    let mut t = image_tool(RectangleOptions::default());
    t.set_corners(10.0, 10.0, 20.0, 20.0);

    assert!(t.point_in_rectangle(10.0, 20.0));
    assert!(t.point_in_rectangle(15.0, 15.0));
    assert!(!t.point_in_rectangle(21.0, 15.0));
}
