// Author: Dustin Pilgrim
// License: MIT

//! Session scripts: one interaction per line, `#` starts a comment.

use std::path::Path;
use std::str::SplitWhitespace;

use thiserror::Error;

use rectool_core::{
    ArrowKey, Bounds, Constraint, FixedRule, Modifier, Point, Precision, ReleaseType,
};

use crate::config;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command \"{command}\"")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` is missing its {argument}")]
    MissingArgument {
        line: usize,
        command: String,
        argument: &'static str,
    },

    #[error("line {line}: expected a number, got \"{value}\"")]
    BadNumber { line: usize, value: String },

    #[error("line {line}: expected {expected}, got \"{value}\"")]
    BadValue {
        line: usize,
        value: String,
        expected: &'static str,
    },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// Which edge of a modifier key a `modifier` line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Press,
    Release,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    X(f64),
    Y(f64),
    Width(f64),
    Height(f64),
    Aspect(f64, f64),
    /// `None` switches the rule off.
    FixedRule(Option<FixedRule>),
    FixedWidth(f64),
    FixedHeight(f64),
    FixedSize(f64, f64),
    FixedCenter(bool),
    Constraint(Constraint),
    Precision(Precision),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Press(Point),
    Motion(Point),
    Release(ReleaseType),
    Hover {
        at: Point,
        proximity: bool,
    },
    Leave,
    Key {
        key: ArrowKey,
        accelerated: bool,
    },
    Modifier {
        modifier: Modifier,
        edge: KeyEdge,
        button_down: bool,
    },
    Set(Setting),
    Frame(Bounds),
    Shrink {
        merged: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based, as shown in error messages.
    pub number: usize,
    pub step: Step,
}

pub fn load(path: &Path) -> Result<Vec<Line>, ScriptError> {
    let src = std::fs::read_to_string(path)?;
    parse(&src)
}

pub fn parse(src: &str) -> Result<Vec<Line>, ScriptError> {
    let mut out = Vec::new();

    for (i, raw) in src.lines().enumerate() {
        let number = i + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let mut words = text.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let mut w = Words {
            line: number,
            command,
            words,
        };
        let step = parse_step(&mut w)?;
        w.finish()?;

        out.push(Line { number, step });
    }

    Ok(out)
}

fn parse_step(w: &mut Words<'_>) -> Result<Step, ScriptError> {
    let step = match w.command {
        "press" => Step::Press(w.point()?),
        "motion" => Step::Motion(w.point()?),
        "release" => Step::Release(w.choice(
            "release type",
            "normal|no-motion|cancel|click",
            &[
                ("normal", ReleaseType::Normal),
                ("no-motion", ReleaseType::NoMotion),
                ("cancel", ReleaseType::Cancel),
                ("click", ReleaseType::Click),
            ],
        )?),
        "hover" => {
            let at = w.point()?;
            let far = w.flag("far")?;
            Step::Hover {
                at,
                proximity: !far,
            }
        }
        "leave" => Step::Leave,
        "key" => {
            let key = w.choice(
                "direction",
                "up|down|left|right",
                &[
                    ("up", ArrowKey::Up),
                    ("down", ArrowKey::Down),
                    ("left", ArrowKey::Left),
                    ("right", ArrowKey::Right),
                ],
            )?;
            let accelerated = w.flag("accel")?;
            Step::Key { key, accelerated }
        }
        "modifier" => {
            let modifier = w.choice(
                "modifier",
                "extend|toggle",
                &[
                    ("extend", Modifier::ExtendSelection),
                    ("toggle", Modifier::ToggleBehavior),
                ],
            )?;
            let edge = w.choice(
                "key edge",
                "press|release",
                &[("press", KeyEdge::Press), ("release", KeyEdge::Release)],
            )?;
            let button_down = w.flag("held")?;
            Step::Modifier {
                modifier,
                edge,
                button_down,
            }
        }
        "set" => Step::Set(parse_setting(w)?),
        "frame" => {
            let x1 = w.integer("x1")?;
            let y1 = w.integer("y1")?;
            let x2 = w.integer("x2")?;
            let y2 = w.integer("y2")?;
            Step::Frame(Bounds::new(x1, y1, x2, y2))
        }
        "shrink" => Step::Shrink {
            merged: w.flag("merged")?,
        },
        other => {
            return Err(ScriptError::UnknownCommand {
                line: w.line,
                command: other.to_string(),
            });
        }
    };

    Ok(step)
}

fn parse_setting(w: &mut Words<'_>) -> Result<Setting, ScriptError> {
    let line = w.line;
    let name = w.word("setting")?;

    let setting = match name {
        "x" => Setting::X(w.number("value")?),
        "y" => Setting::Y(w.number("value")?),
        "width" => Setting::Width(w.number("value")?),
        "height" => Setting::Height(w.number("value")?),
        "aspect" => Setting::Aspect(w.number("numerator")?, w.number("denominator")?),
        "fixed-rule" => {
            let v = w.word("rule")?;
            let rule = config::parse_fixed_rule(v).map_err(|_| ScriptError::BadValue {
                line,
                value: v.to_string(),
                expected: "off|aspect|width|height|size",
            })?;
            Setting::FixedRule(rule)
        }
        "fixed-width" => Setting::FixedWidth(w.number("value")?),
        "fixed-height" => Setting::FixedHeight(w.number("value")?),
        "fixed-size" => Setting::FixedSize(w.number("width")?, w.number("height")?),
        "fixed-center" => Setting::FixedCenter(w.choice(
            "state",
            "on|off",
            &[("on", true), ("off", false)],
        )?),
        "constraint" => {
            let v = w.word("constraint")?;
            let c = config::parse_constraint(v).map_err(|_| ScriptError::BadValue {
                line,
                value: v.to_string(),
                expected: "none|image|drawable",
            })?;
            Setting::Constraint(c)
        }
        "precision" => {
            let v = w.word("precision")?;
            let p = config::parse_precision(v).map_err(|_| ScriptError::BadValue {
                line,
                value: v.to_string(),
                expected: "int|double",
            })?;
            Setting::Precision(p)
        }
        other => {
            return Err(ScriptError::BadValue {
                line,
                value: other.to_string(),
                expected: "a setting name",
            });
        }
    };

    Ok(setting)
}

/// The remaining words of one script line.
struct Words<'a> {
    line: usize,
    command: &'a str,
    words: SplitWhitespace<'a>,
}

impl<'a> Words<'a> {
    fn word(&mut self, argument: &'static str) -> Result<&'a str, ScriptError> {
        self.words.next().ok_or_else(|| ScriptError::MissingArgument {
            line: self.line,
            command: self.command.to_string(),
            argument,
        })
    }

    fn number(&mut self, argument: &'static str) -> Result<f64, ScriptError> {
        let v = self.word(argument)?;
        match v.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(ScriptError::BadNumber {
                line: self.line,
                value: v.to_string(),
            }),
        }
    }

    fn integer(&mut self, argument: &'static str) -> Result<i32, ScriptError> {
        let v = self.word(argument)?;
        v.parse::<i32>().map_err(|_| ScriptError::BadNumber {
            line: self.line,
            value: v.to_string(),
        })
    }

    fn point(&mut self) -> Result<Point, ScriptError> {
        Ok(Point::new(self.number("x")?, self.number("y")?))
    }

    fn choice<T: Copy>(
        &mut self,
        argument: &'static str,
        expected: &'static str,
        table: &[(&str, T)],
    ) -> Result<T, ScriptError> {
        let v = self.word(argument)?;
        table
            .iter()
            .find(|(name, _)| *name == v)
            .map(|(_, value)| *value)
            .ok_or_else(|| ScriptError::BadValue {
                line: self.line,
                value: v.to_string(),
                expected,
            })
    }

    /// An optional trailing keyword.
    fn flag(&mut self, keyword: &'static str) -> Result<bool, ScriptError> {
        match self.words.next() {
            None => Ok(false),
            Some(v) if v == keyword => Ok(true),
            Some(v) => Err(ScriptError::BadValue {
                line: self.line,
                value: v.to_string(),
                expected: keyword,
            }),
        }
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        match self.words.next() {
            None => Ok(()),
            Some(v) => Err(ScriptError::BadValue {
                line: self.line,
                value: v.to_string(),
                expected: "end of line",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_session() {
        let src = "\
# draw, then nudge
press 10 10
motion 60.5 40   # drag
release normal

hover 30 30 far
key left accel
modifier extend press held
set fixed-rule aspect
set aspect 16 9
frame 0 0 50 50
shrink merged
";
        let lines = parse(src).unwrap();
        let steps: Vec<&Step> = lines.iter().map(|l| &l.step).collect();

        assert_eq!(lines[0].number, 2);
        assert_eq!(
            steps,
            vec![
                &Step::Press(Point::new(10.0, 10.0)),
                &Step::Motion(Point::new(60.5, 40.0)),
                &Step::Release(ReleaseType::Normal),
                &Step::Hover {
                    at: Point::new(30.0, 30.0),
                    proximity: false
                },
                &Step::Key {
                    key: ArrowKey::Left,
                    accelerated: true
                },
                &Step::Modifier {
                    modifier: Modifier::ExtendSelection,
                    edge: KeyEdge::Press,
                    button_down: true
                },
                &Step::Set(Setting::FixedRule(Some(FixedRule::Aspect))),
                &Step::Set(Setting::Aspect(16.0, 9.0)),
                &Step::Frame(Bounds::new(0, 0, 50, 50)),
                &Step::Shrink { merged: true },
            ]
        );
    }

    #[test]
    fn reports_unknown_command_with_line() {
        let err = parse("press 1 1\njump 3 4\n").unwrap_err();
        assert!(
            matches!(err, ScriptError::UnknownCommand { line: 2, ref command } if command == "jump"),
            "got {err:?}"
        );
    }

    #[test]
    fn reports_missing_argument() {
        let err = parse("motion 5").unwrap_err();
        assert!(
            matches!(err, ScriptError::MissingArgument { line: 1, argument: "y", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn reports_bad_number() {
        let err = parse("set width wide").unwrap_err();
        assert!(
            matches!(err, ScriptError::BadNumber { line: 1, ref value } if value == "wide"),
            "got {err:?}"
        );

        assert!(matches!(
            parse("press inf 0"),
            Err(ScriptError::BadNumber { .. })
        ));
    }

    #[test]
    fn reports_bad_values() {
        assert!(matches!(
            parse("release sideways"),
            Err(ScriptError::BadValue { expected: "normal|no-motion|cancel|click", .. })
        ));
        assert!(matches!(
            parse("set constraint canvas"),
            Err(ScriptError::BadValue { expected: "none|image|drawable", .. })
        ));
        assert!(matches!(
            parse("leave now"),
            Err(ScriptError::BadValue { expected: "end of line", .. })
        ));
    }

    #[test]
    fn fixed_rule_off_disables() {
        let lines = parse("set fixed-rule off").unwrap();
        assert_eq!(lines[0].step, Step::Set(Setting::FixedRule(None)));
    }
}
