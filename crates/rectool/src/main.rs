// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod logging;
mod paths;
mod print;
mod replay;
mod script;

use clap::Parser;

use eventline::{debug, error, info};

use rectool_core::{Point, RectangleEvent};

use crate::cli::{Args, Cmd};

fn main() {
    let args = Args::parse();

    let plan = logging::LogPlan::new(args.log_file.as_deref(), args.verbose);
    if let Err(e) = logging::init_logging(&plan) {
        eprintln!("rectool: failed to init logging: {e}");
    }

    if let Err(e) = run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    info!("starting rectool");
    debug!("parsed args: {:?}", args.cmd);

    let cfg = config::load(args.config.as_deref()).map_err(|e| {
        error!("{e}");
        e
    })?;

    match args.cmd {
        Cmd::Replay { script, overrides } => {
            let cfg = overrides.apply(cfg);

            let lines = script::load(&script).map_err(|e| {
                error!("script {}: {e}", script.display());
                format!("{}: {e}", script.display())
            })?;
            debug!("loaded {} script lines from {}", lines.len(), script.display());

            let mut tool = cfg.tool()?;
            let outcome = replay::replay(&mut tool, &lines).map_err(|e| {
                error!("script {}: {e}", script.display());
                format!("{}: {e}", script.display())
            })?;

            for step in &outcome.steps {
                debug!("line {}: {:?} -> {:?}", step.line, step.step, step.function);

                for event in &step.events {
                    match event {
                        RectangleEvent::ChangeComplete(r) => {
                            info!("line {}: committed {}", step.line, print::format_rect(r));
                        }
                        RectangleEvent::Response(r) => {
                            info!("line {}: response {:?}", step.line, r);
                        }
                        _ => {}
                    }
                }

                print::print_step(step);
            }

            print::print_outcome(&outcome);
        }

        Cmd::Hit {
            x1,
            y1,
            x2,
            y2,
            px,
            py,
            far,
            overrides,
        } => {
            let cfg = overrides.apply(cfg);
            let mut tool = cfg.tool()?;

            tool.set_corners(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2));

            let p = Point::new(px, py);
            tool.hover(p, !far);
            let hit = tool.hit(p, !far);
            debug!("hit ({px}, {py}) -> {:?}", tool.function());

            print::print_hit(tool.function(), hit, tool.cursor());
        }

        Cmd::Config { overrides } => {
            let cfg = overrides.apply(cfg);
            print::print_config(&cfg);
        }
    }

    info!("rectool done");
    Ok(())
}
