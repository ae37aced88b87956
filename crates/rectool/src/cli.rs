// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use rectool_core::{Constraint, Precision};

use crate::config::{self, RectoolConfig};

#[derive(Debug, Parser)]
#[command(name = "rectool", version, about = "Rectangle tool session runner.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/rectool/rectool.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override config path (default: $XDG_CONFIG_HOME/rectool/rectool.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Run a session script and print what the rectangle did
    Replay {
        script: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Classify a point against a rectangle
    #[command(allow_negative_numbers = true)]
    Hit {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        px: f64,
        py: f64,

        /// Classify as if the pointer were away from the canvas
        #[arg(long)]
        far: bool,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Print the effective configuration
    Config {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Per-run values that take precedence over the config file.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct Overrides {
    #[arg(long, value_enum)]
    pub constraint: Option<Constraint>,

    #[arg(long, value_enum)]
    pub precision: Option<Precision>,

    /// Image size as WxH
    #[arg(long, value_parser = config::parse_image_size)]
    pub image: Option<(i32, i32)>,
}

impl Overrides {
    pub fn apply(&self, cfg: RectoolConfig) -> RectoolConfig {
        cfg.with_overrides(self.constraint, self.precision, self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_hit_with_negative_point() {
        let args = Args::try_parse_from([
            "rectool", "hit", "0", "0", "10", "10", "-3", "5", "--image", "64x48",
        ])
        .unwrap();

        match args.cmd {
            Cmd::Hit {
                px, py, overrides, ..
            } => {
                assert_eq!((px, py), (-3.0, 5.0));
                assert_eq!(overrides.image, Some((64, 48)));
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn parses_replay_overrides() {
        let args = Args::try_parse_from([
            "rectool",
            "-v",
            "replay",
            "session.txt",
            "--constraint",
            "image",
            "--precision",
            "double",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.cmd {
            Cmd::Replay { script, overrides } => {
                assert_eq!(script, PathBuf::from("session.txt"));
                assert_eq!(overrides.constraint, Some(Constraint::Image));
                assert_eq!(overrides.precision, Some(Precision::Double));
            }
            other => panic!("expected replay, got {other:?}"),
        }
    }
}
