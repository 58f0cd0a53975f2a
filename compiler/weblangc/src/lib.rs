//! Weblang driver library.
//!
//! Glues the pipeline stages together for the `weblang` binary and for
//! end-to-end tests: source text in, tokens, trees or values out.

pub mod commands;

use std::sync::Once;

use thiserror::Error;
use weblang_eval::{EvalError, Frame, Interpreter, Value};
use weblang_ir::{printer, Expr, Position, Token};
use weblang_lexer::LexError;
use weblang_parse::ParseError;

/// Any failure along the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("{}", read_error_message(.path, .source))]
    Read {
        path: String,
        source: std::io::Error,
    },
}

impl Error {
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex(err) => Some(err.position),
            Error::Parse(err) => Some(err.position),
            Error::Eval(err) => err.position,
            Error::Read { .. } => None,
        }
    }

    /// Closure frames a runtime error unwound through, innermost first.
    pub fn backtrace(&self) -> &[Frame] {
        match self {
            Error::Eval(err) => &err.backtrace,
            _ => &[],
        }
    }
}

fn read_error_message(path: &str, err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {err}"),
    }
}

/// Read a source file; `-` reads standard input.
pub fn read_source(path: &str) -> Result<String, Error> {
    let result = if path == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })
}

pub fn lex_source(source: &str) -> Result<Vec<Token>, Error> {
    Ok(weblang_lexer::tokenize(source)?)
}

pub fn parse_source(source: &str) -> Result<Expr, Error> {
    Ok(weblang_parse::parse(source)?)
}

/// Parse and re-render a program in canonical form.
pub fn format_source(source: &str) -> Result<String, Error> {
    Ok(printer::print_program(&parse_source(source)?))
}

/// Parse `source` and evaluate it in `interp`'s global environment.
pub fn run_source(source: &str, interp: &Interpreter) -> Result<Value, Error> {
    let program = parse_source(source)?;
    Ok(interp.eval_program(&program)?)
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set.
///
/// `WEBLANG_LOG_TREE=1` renders spans as an indented tree instead of flat
/// lines. Log output goes to stderr so it never mixes with program output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("WEBLANG_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
