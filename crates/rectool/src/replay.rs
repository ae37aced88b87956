// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

use rectool_core::{
    Function, PublicRect, RectangleEvent, RectoolError, Response, StaticHost, ToolRectangle,
};

use crate::script::{Line, Setting, Step};

/// A script line the engine refused.
#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {source}")]
pub struct ReplayError {
    pub line: usize,
    pub source: RectoolError,
}

/// What one script line did to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub line: usize,
    pub step: Step,
    pub function: Function,
    pub rect: PublicRect,
    pub events: Vec<RectangleEvent>,
}

impl StepReport {
    pub fn committed(&self) -> impl Iterator<Item = &PublicRect> {
        self.events.iter().filter_map(|e| match e {
            RectangleEvent::ChangeComplete(r) => Some(r),
            _ => None,
        })
    }

    pub fn responses(&self) -> impl Iterator<Item = Response> + '_ {
        self.events.iter().filter_map(|e| match e {
            RectangleEvent::Response(r) => Some(*r),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub steps: Vec<StepReport>,
    pub responses: Vec<Response>,
    pub status: Option<String>,
    pub function: Function,
    pub rect: PublicRect,
}

/// Feed every line to `tool`, collecting what the host saw after each.
/// Stops at the first line the engine rejects.
pub fn replay(
    tool: &mut ToolRectangle<StaticHost>,
    lines: &[Line],
) -> Result<Outcome, ReplayError> {
    let mut steps = Vec::with_capacity(lines.len());
    let mut responses = Vec::new();

    tool.host_mut().take_events();

    for line in lines {
        apply(tool, &line.step).map_err(|source| ReplayError {
            line: line.number,
            source,
        })?;

        let report = StepReport {
            line: line.number,
            step: line.step.clone(),
            function: tool.function(),
            rect: tool.public_rect(),
            events: tool.host_mut().take_events(),
        };

        responses.extend(report.responses());
        steps.push(report);
    }

    let status = steps
        .iter()
        .flat_map(|s| s.events.iter())
        .rev()
        .find_map(|e| match e {
            RectangleEvent::Status(s) => Some(s.clone()),
            _ => None,
        })
        .flatten();

    Ok(Outcome {
        steps,
        responses,
        status,
        function: tool.function(),
        rect: tool.public_rect(),
    })
}

fn apply(tool: &mut ToolRectangle<StaticHost>, step: &Step) -> Result<(), RectoolError> {
    match *step {
        Step::Press(p) => tool.button_press(p),
        Step::Motion(p) => tool.motion(p),
        Step::Release(r) => tool.button_release(r),
        Step::Hover { at, proximity } => tool.hover(at, proximity),
        Step::Leave => tool.leave(),
        Step::Key { key, accelerated } => {
            tool.key_press(key, accelerated);
        }
        Step::Modifier {
            modifier,
            button_down,
            ..
        } => tool.motion_modifier(modifier, button_down),
        Step::Set(ref setting) => return apply_setting(tool, setting),
        Step::Frame(bounds) => tool.frame_item(bounds),
        Step::Shrink { merged } => tool.auto_shrink(merged),
    }

    Ok(())
}

fn apply_setting(
    tool: &mut ToolRectangle<StaticHost>,
    setting: &Setting,
) -> Result<(), RectoolError> {
    match *setting {
        Setting::X(v) => tool.set_x(v),
        Setting::Y(v) => tool.set_y(v),
        Setting::Width(v) => tool.set_width(v),
        Setting::Height(v) => tool.set_height(v),
        Setting::Aspect(n, d) => return tool.set_aspect(n, d),
        Setting::FixedRule(Some(rule)) => {
            tool.set_fixed_rule(rule);
            tool.set_fixed_rule_active(true);
        }
        Setting::FixedRule(None) => tool.set_fixed_rule_active(false),
        Setting::FixedWidth(v) => return tool.set_fixed_width(v),
        Setting::FixedHeight(v) => return tool.set_fixed_height(v),
        Setting::FixedSize(w, h) => return tool.set_fixed_size(w, h),
        Setting::FixedCenter(on) => tool.set_fixed_center(on),
        Setting::Constraint(c) => tool.set_constraint(c),
        Setting::Precision(p) => tool.set_precision(p),
    }

    Ok(())
}
