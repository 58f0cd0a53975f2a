//! Recursive descent parser for Weblang.
//!
//! Consumes a [`Lexer`] lazily and produces a single [`Expr`] tree. Binary
//! and assignment operators are parsed by precedence climbing over
//! [`weblang_ir::BinaryOp::precedence`] and [`weblang_ir::ASSIGN_PRECEDENCE`].
//!
//! # Architecture
//!
//! - `lib.rs`: parser state, token helpers, program entry points
//! - `grammar/expr.rs`: expressions, operators, call suffixes, atoms
//! - `grammar/binding.rs`: every form of `let`
//! - `grammar/control.rs`: `if`, lambdas, blocks
//!
//! The first error aborts the parse; no partial tree is returned.

mod grammar;
mod parse_error;

use weblang_ir::{Expr, ExprKind, Position, Token, TokenKind};
use weblang_lexer::Lexer;

pub use parse_error::{ParseError, ParseErrorKind};

/// Parser state.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Parser { lexer }
    }

    /// Parse statements until end of input.
    ///
    /// Always returns a [`ExprKind::Block`], even for zero or one statement.
    /// Each statement must be followed by `;` or end of input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Result<Expr, ParseError> {
        let mut stmts = Vec::new();
        while !self.lexer.at_end()? {
            stmts.push(self.expression()?);
            if self.check_punc(';')? {
                self.advance()?;
            } else if !self.lexer.at_end()? {
                return Err(self.unexpected("`;` or end of input"));
            }
        }
        tracing::debug!(statements = stmts.len(), "parsed program");
        Ok(Expr::new(ExprKind::Block(stmts), Position::START))
    }

    // Token helpers

    #[inline]
    fn peek(&mut self) -> Result<&Token, ParseError> {
        Ok(self.lexer.peek()?)
    }

    #[inline]
    fn advance(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.next_token()?)
    }

    #[inline]
    fn peek_position(&mut self) -> Result<Position, ParseError> {
        Ok(self.peek()?.position)
    }

    fn check_punc(&mut self, ch: char) -> Result<bool, ParseError> {
        Ok(self.peek()?.is_punc(ch))
    }

    fn check_keyword(&mut self, kw: &str) -> Result<bool, ParseError> {
        Ok(self.peek()?.is_keyword(kw))
    }

    fn check_op(&mut self, op: &str) -> Result<bool, ParseError> {
        Ok(self.peek()?.is_op(op))
    }

    fn expect_punc(&mut self, ch: char) -> Result<Token, ParseError> {
        if self.check_punc(ch)? {
            self.advance()
        } else {
            Err(self.unexpected(&format!("`{ch}`")))
        }
    }

    fn expect_var(&mut self) -> Result<Token, ParseError> {
        if self.peek()?.kind == TokenKind::Var {
            self.advance()
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Error for the lookahead token not matching `expected`.
    ///
    /// Only called after a successful peek, so the lookahead is cached.
    #[cold]
    fn unexpected(&mut self, expected: &str) -> ParseError {
        let expected = expected.to_owned();
        match self.lexer.peek() {
            Ok(token) if token.is_eof() => {
                ParseError::new(ParseErrorKind::UnexpectedEof { expected }, token.position)
            }
            Ok(token) => ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected,
                    found: token.to_string(),
                },
                token.position,
            ),
            Err(err) => err.into(),
        }
    }
}

/// Parse a whole token stream as a program.
pub fn parse_program(lexer: Lexer<'_>) -> Result<Expr, ParseError> {
    Parser::new(lexer).parse_program()
}

/// Lex and parse `source` as a program.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_program(Lexer::new(source))
}
