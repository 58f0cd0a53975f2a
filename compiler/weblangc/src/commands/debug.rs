//! Debug commands: `lex`, `parse` and `fmt` for inspecting the front end.

use weblang_ir::printer::print_program;
use weblang_ir::ExprKind;

use super::{exit_with, read_file};

/// Lex a file and print one token per line.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = crate::lex_source(&content).unwrap_or_else(|err| exit_with(path, &err));

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for tok in &tokens {
        println!("  {} {} {}", tok.position, tok.kind.name(), tok.value);
    }
}

/// Parse a file and print a summary followed by the re-rendered program.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let program = crate::parse_source(&content).unwrap_or_else(|err| exit_with(path, &err));

    let statements = match &program.kind {
        ExprKind::Block(stmts) => stmts.len(),
        _ => 1,
    };
    println!("Parse result for '{path}':");
    println!("  Statements: {statements}");
    println!();
    print!("{}", print_program(&program));
}

/// Print a file in canonical form.
pub fn format_file(path: &str) {
    let content = read_file(path);
    let formatted = crate::format_source(&content).unwrap_or_else(|err| exit_with(path, &err));
    print!("{formatted}");
}
