// Author: Dustin Pilgrim
// License: MIT

use rectool_core::{CursorKind, Function, Hit, PublicRect};

use crate::config::RectoolConfig;
use crate::replay::{Outcome, StepReport};

pub fn format_rect(r: &PublicRect) -> String {
    format!(
        "({}, {}) - ({}, {}) [{} x {}]",
        r.x1,
        r.y1,
        r.x2,
        r.y2,
        r.width(),
        r.height()
    )
}

pub fn print_step(step: &StepReport) {
    println!(
        "{:>4}: {:<20} {}",
        step.line,
        format!("{:?}", step.function),
        format_rect(&step.rect)
    );

    for r in step.committed() {
        println!("      committed {}", format_rect(r));
    }
    for resp in step.responses() {
        println!("      response {resp:?}");
    }
}

pub fn print_outcome(out: &Outcome) {
    match out.responses.as_slice() {
        [] => println!("responses: none"),
        list => println!("responses: {list:?}"),
    }
    if let Some(status) = &out.status {
        println!("status: {status}");
    }
    println!("function: {:?}", out.function);
    println!("rectangle: {}", format_rect(&out.rect));
}

pub fn print_hit(function: Function, hit: Hit, cursor: Option<CursorKind>) {
    println!("function: {function:?}");
    println!("hit: {hit:?}");
    match cursor {
        Some(c) => println!("cursor: {c:?}"),
        None => println!("cursor: default"),
    }
}

pub fn print_config(cfg: &RectoolConfig) {
    let o = &cfg.options;

    println!("image: {}x{}", cfg.image_width, cfg.image_height);
    println!("scale: {}, {}", cfg.scale.0, cfg.scale.1);
    println!("precision: {:?}", cfg.precision);
    println!("force_narrow_mode: {}", cfg.force_narrow_mode);
    println!("constraint: {:?}", o.constraint);

    match o.active_rule() {
        Some(rule) => println!("fixed_rule: {rule:?}"),
        None => println!("fixed_rule: off ({:?})", o.fixed_rule),
    }

    println!("aspect: {}:{}", o.aspect_numerator, o.aspect_denominator);
    println!("fixed_width: {}", o.desired_fixed_width);
    println!("fixed_height: {}", o.desired_fixed_height);
    println!(
        "fixed_size: {}x{}",
        o.desired_fixed_size_width, o.desired_fixed_size_height
    );
    println!("fixed_center: {}", o.fixed_center);

    if cfg.drawables.is_empty() {
        println!("drawables: none");
    } else {
        for (i, d) in cfg.drawables.iter().enumerate() {
            println!(
                "drawable #{i}: ({}, {}) {}x{}",
                d.x1,
                d.y1,
                d.width(),
                d.height()
            );
        }
    }

    if let Some(c) = cfg.content {
        println!("content: ({}, {}) {}x{}", c.x1, c.y1, c.width(), c.height());
    }
}
