//! The `run` command: parse and evaluate a Weblang program.

use std::time::Instant;

use weblang_eval::{stdout_handler, Interpreter, Value};

use super::{exit_with, read_file};

/// Options accepted after `weblang run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Closure call depth limit (`--max-depth=<n>`).
    pub max_call_depth: Option<usize>,
    /// Print total wall time to stderr (`--time`).
    pub time: bool,
}

/// Split `run` arguments into options and the source path.
///
/// `-` is a path (standard input), not a flag.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Option<String>), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse::<usize>()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
            options.max_call_depth = Some(depth);
        } else if arg == "--time" {
            options.time = true;
        } else if arg == "-" || !arg.starts_with('-') {
            if path.is_none() {
                path = Some(arg.clone());
            }
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }
    Ok((options, path))
}

/// Evaluate a program, printing its final value unless it is `false`.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_file(path);

    let mut builder = Interpreter::builder().print_handler(stdout_handler());
    if let Some(depth) = options.max_call_depth {
        builder = builder.max_call_depth(depth);
    }
    let interp = builder.build();

    let start = Instant::now();
    let result = crate::run_source(&content, &interp);
    let elapsed = start.elapsed();
    tracing::debug!(?elapsed, path, "run finished");

    match result {
        Ok(Value::Bool(false)) => {}
        Ok(value) => interp.print_handler().println(&value.to_string()),
        Err(err) => exit_with(path, &err),
    }
    if options.time {
        eprintln!("Total: {}ms", elapsed.as_millis());
    }
}
