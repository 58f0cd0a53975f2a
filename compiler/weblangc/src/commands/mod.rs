//! Command handlers for the `weblang` CLI.
//!
//! Each handler reads its input, runs one pipeline stage and prints the
//! result. Any failure is reported through [`report_error`] and ends the
//! process with status 1.

mod debug;
mod run;

pub use debug::{format_file, lex_file, parse_file};
pub use run::{parse_run_options, run_file, RunOptions};

use crate::Error;

/// Read `path` (or stdin for `-`), exiting on failure.
fn read_file(path: &str) -> String {
    match crate::read_source(path) {
        Ok(content) => content,
        Err(err) => exit_with(path, &err),
    }
}

/// Print an error to stderr with its location and backtrace.
pub fn report_error(path: &str, err: &Error) {
    eprintln!("error: {err}");
    if let (Error::Eval(_), Some(position)) = (err, err.position()) {
        eprintln!("  --> {path}:{position}");
    }
    for frame in err.backtrace() {
        eprintln!("  {frame}");
    }
}

fn exit_with(path: &str, err: &Error) -> ! {
    report_error(path, err);
    std::process::exit(1);
}
