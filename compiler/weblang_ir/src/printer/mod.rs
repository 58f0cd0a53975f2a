//! Render a syntax tree back to Weblang source.
//!
//! The output is accepted by the parser and parses to a tree equal to the
//! input (positions aside). Binary and assignment nodes are always
//! parenthesized. Forms that end in an open-ended expression (`fn`, `let`,
//! `if`) are parenthesized wherever a following token could be absorbed
//! into them.

use crate::ast::{Expr, ExprKind, LambdaDef, LetBinding};

const INDENT: &str = "    ";

/// Render a whole program.
///
/// A top-level block prints as one statement per line; anything else prints
/// as a single expression.
pub fn print_program(program: &Expr) -> String {
    let mut printer = Printer::default();
    match &program.kind {
        ExprKind::Block(stmts) => {
            for stmt in stmts {
                printer.expr(stmt);
                printer.out.push_str(";\n");
            }
        }
        _ => {
            printer.expr(program);
            printer.out.push('\n');
        }
    }
    printer.out
}

/// Render a single expression on its own.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

/// Whether `expr` ends in an expression that would swallow a trailing
/// operator, call suffix or `else`.
fn is_open_ended(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Lambda(_) | ExprKind::Let { .. } | ExprKind::LetIn { .. } | ExprKind::If { .. }
    )
}

impl Printer {
    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Number(n) => self.out.push_str(&n.to_string()),
            ExprKind::Str(s) => self.string(s),
            ExprKind::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            ExprKind::Array(items) => {
                self.out.push('[');
                self.comma_list(items);
                self.out.push(']');
            }
            ExprKind::Var(name) => self.out.push_str(name),
            ExprKind::Let { name, init } => {
                self.out.push_str("let ");
                self.out.push_str(name);
                if let Some(init) = init {
                    self.out.push_str(" = ");
                    self.expr(init);
                }
            }
            ExprKind::LetIn { bindings, body } => {
                self.out.push_str("let (");
                for (i, binding) in bindings.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.binding(binding);
                }
                self.out.push_str(") ");
                self.expr(body);
            }
            ExprKind::Assign { target, value } => {
                self.out.push('(');
                self.operand(target);
                self.out.push_str(" = ");
                self.operand(value);
                self.out.push(')');
            }
            ExprKind::Binary { op, left, right } => {
                self.out.push('(');
                self.operand(left);
                self.out.push(' ');
                self.out.push_str(op.as_symbol());
                self.out.push(' ');
                self.operand(right);
                self.out.push(')');
            }
            ExprKind::Lambda(def) => self.lambda(def),
            ExprKind::Call { callee, args } => {
                self.operand(callee);
                self.out.push('(');
                self.comma_list(args);
                self.out.push(')');
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                self.out.push_str(receiver);
                self.out.push('.');
                self.out.push_str(method);
                self.out.push('(');
                self.comma_list(args);
                self.out.push(')');
            }
            ExprKind::If {
                cond,
                then_branch,
                else_if,
                else_branch,
            } => {
                self.out.push_str("if (");
                self.expr(cond);
                self.out.push_str(") ");
                let has_else = else_if.is_some() || else_branch.is_some();
                if has_else && is_open_ended(then_branch) {
                    self.parenthesized(then_branch);
                } else {
                    self.expr(then_branch);
                }
                if let Some(chained) = else_if {
                    self.out.push_str(" else ");
                    self.expr(chained);
                } else if let Some(else_branch) = else_branch {
                    self.out.push_str(" else ");
                    if matches!(else_branch.kind, ExprKind::If { .. }) {
                        // A bare `else if` would land in the chained slot.
                        self.parenthesized(else_branch);
                    } else {
                        self.expr(else_branch);
                    }
                }
            }
            ExprKind::Block(stmts) => self.block(stmts),
        }
    }

    fn operand(&mut self, expr: &Expr) {
        if is_open_ended(expr) {
            self.parenthesized(expr);
        } else {
            self.expr(expr);
        }
    }

    fn parenthesized(&mut self, expr: &Expr) {
        self.out.push('(');
        self.expr(expr);
        self.out.push(')');
    }

    fn lambda(&mut self, def: &LambdaDef) {
        self.out.push_str("fn");
        if let Some(name) = &def.name {
            self.out.push(' ');
            self.out.push_str(name);
        }
        self.out.push('(');
        self.out.push_str(&def.params.join(", "));
        self.out.push_str(") ");
        self.expr(&def.body);
    }

    fn binding(&mut self, binding: &LetBinding) {
        self.out.push_str(&binding.name);
        if let Some(init) = &binding.init {
            self.out.push_str(" = ");
            self.expr(init);
        }
    }

    fn block(&mut self, stmts: &[Expr]) {
        if stmts.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.depth += 1;
        for (i, stmt) in stmts.iter().enumerate() {
            self.indent();
            self.expr(stmt);
            if i + 1 < stmts.len() {
                self.out.push(';');
            }
            self.out.push('\n');
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
    }

    fn comma_list(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(item);
        }
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        for ch in s.chars() {
            if matches!(ch, '"' | '\\') {
                self.out.push('\\');
            }
            self.out.push(ch);
        }
        self.out.push('"');
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }
}
