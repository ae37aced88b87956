// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::error::{RectoolError, Result};

/// Which bounds the rectangle is clamped against.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Constraint {
    #[default]
    None,
    /// The whole image canvas.
    Image,
    /// The union of the selected drawables.
    Drawable,
}

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FixedRule {
    #[default]
    Aspect,
    Width,
    Height,
    Size,
}

/// Externally supplied configuration, read-only during a drag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RectangleOptions {
    pub constraint: Constraint,

    pub fixed_rule_active: bool,
    pub fixed_rule: FixedRule,

    pub aspect_numerator: f64,
    pub aspect_denominator: f64,

    pub desired_fixed_width: f64,
    pub desired_fixed_height: f64,
    pub desired_fixed_size_width: f64,
    pub desired_fixed_size_height: f64,

    /// Resize symmetrically around the press-time center.
    pub fixed_center: bool,
}

impl Default for RectangleOptions {
    fn default() -> Self {
        Self {
            constraint: Constraint::None,
            fixed_rule_active: false,
            fixed_rule: FixedRule::Aspect,
            aspect_numerator: 1.0,
            aspect_denominator: 1.0,
            desired_fixed_width: 100.0,
            desired_fixed_height: 100.0,
            desired_fixed_size_width: 100.0,
            desired_fixed_size_height: 100.0,
            fixed_center: false,
        }
    }
}

impl RectangleOptions {
    pub fn validate(&self) -> Result<()> {
        check_aspect(self.aspect_numerator, self.aspect_denominator)?;
        check_fixed_size(self.desired_fixed_width, self.desired_fixed_height)?;
        check_fixed_size(self.desired_fixed_size_width, self.desired_fixed_size_height)
    }

    /// The rule in effect, if any.
    pub fn active_rule(&self) -> Option<FixedRule> {
        self.fixed_rule_active.then_some(self.fixed_rule)
    }
}

/// Both parts finite and positive.
pub fn check_aspect(numerator: f64, denominator: f64) -> Result<()> {
    let (n, d) = (numerator, denominator);
    if n.is_finite() && d.is_finite() && n > 0.0 && d > 0.0 {
        Ok(())
    } else {
        Err(RectoolError::InvalidAspect {
            numerator: n,
            denominator: d,
        })
    }
}

/// Both parts finite and non-negative.
pub fn check_fixed_size(width: f64, height: f64) -> Result<()> {
    let (w, h) = (width, height);
    if w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0 {
        Ok(())
    } else {
        Err(RectoolError::InvalidFixedSize {
            width: w,
            height: h,
        })
    }
}
