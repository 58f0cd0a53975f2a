//! Expressions: precedence climbing, call suffixes and atoms.

use weblang_ir::{BinaryOp, Expr, ExprKind, Position, TokenKind, ASSIGN_PRECEDENCE};
use weblang_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

/// An operator in infix position.
#[derive(Copy, Clone)]
enum Infix {
    Assign,
    Binary(BinaryOp),
}

impl Infix {
    fn from_symbol(symbol: &str) -> Option<Self> {
        if symbol == "=" {
            Some(Infix::Assign)
        } else {
            BinaryOp::from_symbol(symbol).map(Infix::Binary)
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Infix::Assign => ASSIGN_PRECEDENCE,
            Infix::Binary(op) => op.precedence(),
        }
    }
}

impl Parser<'_> {
    /// Parse an expression.
    ///
    /// `expression := call (infix call)* ("(" args ")")*`
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let left = self.call()?;
            let expr = self.binary(left, 0)?;
            self.call_suffix(expr)
        })
    }

    /// Precedence climbing.
    ///
    /// An operator is taken only if its precedence is strictly above
    /// `min_prec`, which makes equal-precedence chains left-associative.
    /// The right side of `=` is parsed from precedence 0, so assignment
    /// chains are right-associative.
    fn binary(&mut self, mut left: Expr, min_prec: u8) -> Result<Expr, ParseError> {
        loop {
            let infix = {
                let token = self.peek()?;
                if token.kind != TokenKind::Operator {
                    return Ok(left);
                }
                match Infix::from_symbol(&token.value) {
                    Some(infix) => infix,
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnknownOperator {
                                op: token.value.clone(),
                            },
                            token.position,
                        ))
                    }
                }
            };
            let prec = infix.precedence();
            if prec <= min_prec {
                return Ok(left);
            }
            self.advance()?;

            let rhs = self.call()?;
            let position = left.position;
            left = match infix {
                Infix::Assign => {
                    let value = self.binary(rhs, 0)?;
                    Expr::new(
                        ExprKind::Assign {
                            target: Box::new(left),
                            value: Box::new(value),
                        },
                        position,
                    )
                }
                Infix::Binary(op) => {
                    let right = self.binary(rhs, prec)?;
                    Expr::new(
                        ExprKind::Binary {
                            op,
                            left: Box::new(left),
                            right: Box::new(right),
                        },
                        position,
                    )
                }
            };
        }
    }

    /// `atom ("(" args ")")*`
    fn call(&mut self) -> Result<Expr, ParseError> {
        let atom = self.atom()?;
        self.call_suffix(atom)
    }

    fn call_suffix(&mut self, mut callee: Expr) -> Result<Expr, ParseError> {
        while self.check_punc('(')? {
            let args = self.delimited('(', ')', ',', Self::expression)?;
            let position = callee.position;
            callee = Expr::new(
                ExprKind::Call {
                    callee: Box::new(callee),
                    args,
                },
                position,
            );
        }
        Ok(callee)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek()?.clone();
        let position = token.position;
        match token.kind {
            TokenKind::Punctuation => match token.value.as_str() {
                "(" => {
                    self.advance()?;
                    let inner = self.expression()?;
                    self.expect_punc(')')?;
                    Ok(inner)
                }
                "{" => self.block(),
                "[" => {
                    let items = self.delimited('[', ']', ',', Self::expression)?;
                    Ok(Expr::new(ExprKind::Array(items), position))
                }
                _ => Err(self.unexpected("expression")),
            },
            TokenKind::Keyword => match token.value.as_str() {
                "let" => self.let_expr(),
                "if" => self.if_expr(),
                "fn" | "lambda" | "λ" => self.lambda(),
                _ => Err(self.unexpected("expression")),
            },
            TokenKind::Bool => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Bool(token.value == "true"), position))
            }
            TokenKind::Var => {
                self.advance()?;
                if self.check_punc('.')? {
                    self.method_call(token.value, position)
                } else {
                    Ok(Expr::new(ExprKind::Var(token.value), position))
                }
            }
            TokenKind::Num => {
                self.advance()?;
                let value = token.value.parse::<f64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.value.clone(),
                        },
                        position,
                    )
                })?;
                Ok(Expr::new(ExprKind::Number(value), position))
            }
            TokenKind::Str => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Str(token.value), position))
            }
            TokenKind::Operator | TokenKind::Eof => Err(self.unexpected("expression")),
        }
    }

    /// `receiver "." method "(" args ")"`, with the receiver already consumed.
    fn method_call(
        &mut self,
        receiver: String,
        position: Position,
    ) -> Result<Expr, ParseError> {
        self.expect_punc('.')?;
        let method = self.expect_var()?.value;
        let args = self.delimited('(', ')', ',', Self::expression)?;
        Ok(Expr::new(
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            },
            position,
        ))
    }
}
