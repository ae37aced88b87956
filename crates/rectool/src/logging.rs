// Author: Dustin Pilgrim
// License: MIT

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use eventline::runtime::{self, LogLevel};

use crate::paths::{self, ensure_parent_dir};

pub const LOG_FILE_NAME: &str = "rectool.log";

/// Where and how loudly a rectool run logs.
///
/// The file always receives records. `--verbose` mirrors them to the
/// console and lowers the level to debug, which is where replay steps go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPlan {
    pub path: PathBuf,
    pub console: bool,
    pub debug: bool,
}

impl LogPlan {
    pub fn new(log_file: Option<&Path>, verbose: bool) -> Self {
        let path = log_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| paths::default_log_path(LOG_FILE_NAME));

        Self {
            path,
            console: verbose,
            debug: verbose,
        }
    }

    fn level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

pub fn init_logging(plan: &LogPlan) -> Result<(), String> {
    ensure_parent_dir(&plan.path)
        .map_err(|e| format!("create log dir {}: {e}", plan.path.display()))?;

    block_on(runtime::init());

    runtime::enable_file_output(&plan.path).map_err(|e| format!("enable file output: {e}"))?;
    runtime::enable_console_output(plan.console);
    runtime::enable_console_color(plan.console);
    runtime::set_log_level(plan.level());

    Ok(())
}

// eventline's init is the only future rectool ever polls.
fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());

    loop {
        if let Poll::Ready(v) = fut.as_mut().poll(&mut cx) {
            return v;
        }
        std::thread::yield_now();
    }
}
