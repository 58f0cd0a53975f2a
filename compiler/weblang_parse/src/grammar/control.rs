//! Conditionals, lambdas and blocks.

use std::rc::Rc;

use weblang_ir::{Expr, ExprKind, LambdaDef};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `if cond ("then")? expr ("else" (if | expr))?`
    ///
    /// A parenthesized condition is a delimited list; only its first element
    /// is kept.
    pub(crate) fn if_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.advance()?.position;

        let cond = if self.check_punc('(')? {
            let close = self.peek_position()?;
            self.delimited('(', ')', ',', Self::expression)?
                .into_iter()
                .next()
                .ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            expected: "condition".to_owned(),
                            found: "`()`".to_owned(),
                        },
                        close,
                    )
                })?
        } else {
            self.expression()?
        };

        if self.check_keyword("then")? {
            self.advance()?;
        }
        let then_branch = self.expression()?;

        let mut else_if = None;
        let mut else_branch = None;
        if self.check_keyword("else")? {
            self.advance()?;
            if self.check_keyword("if")? {
                else_if = Some(Box::new(self.if_expr()?));
            } else {
                else_branch = Some(Box::new(self.expression()?));
            }
        }

        Ok(Expr::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_if,
                else_branch,
            },
            position,
        ))
    }

    /// `("fn" | "lambda" | "λ") name? "(" params ")" body`
    pub(crate) fn lambda(&mut self) -> Result<Expr, ParseError> {
        let position = self.advance()?.position;
        let name = if self.check_var()? {
            Some(self.advance()?.value)
        } else {
            None
        };
        let params = self.param_list()?;
        let body = self.expression()?;
        Ok(Expr::new(
            ExprKind::Lambda(Rc::new(LambdaDef { name, params, body })),
            position,
        ))
    }

    /// `"{" (expr (";" expr)*)? "}"`
    ///
    /// An empty block is `false`; a single statement is returned unwrapped.
    pub(crate) fn block(&mut self) -> Result<Expr, ParseError> {
        let position = self.peek_position()?;
        let mut stmts = self.delimited('{', '}', ';', Self::expression)?;
        Ok(match stmts.len() {
            0 => Expr::false_literal(position),
            1 => stmts.swap_remove(0),
            _ => Expr::new(ExprKind::Block(stmts), position),
        })
    }
}
