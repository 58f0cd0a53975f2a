//! Weblang lexer.
//!
//! Turns source text into a lazy stream of [`Token`]s with one token of
//! cached lookahead. The parser drives it through [`Lexer::peek`] and
//! [`Lexer::next_token`]; [`tokenize`] collects a whole source at once.
//!
//! # Token rules
//!
//! Applied in order at each position:
//! 1. whitespace (space, tab, `\n`, `\r`) is skipped
//! 2. `#` starts a comment running to the end of the line
//! 3. `"` or `'` starts a string; `\` makes the next character literal
//! 4. a digit starts a number with at most one `.`
//! 5. `[A-Za-z_λ]` starts an identifier or keyword, which continues through
//!    those characters, digits and `?!-<>=`; so `n-1` is one identifier
//! 6. `, . ; ( ) [ ] { }` are single-character punctuation
//! 7. operator characters take the longest known operator
//!
//! Anything else is a [`LexErrorKind::UnexpectedChar`].

mod cursor;
mod lex_error;

use weblang_ir::{Position, Token, TokenKind};

use cursor::Cursor;

pub use lex_error::{LexError, LexErrorKind};

/// Keywords other than the boolean literals.
pub const KEYWORDS: &[&str] = &["let", "fn", "if", "else", "then", "lambda", "λ"];

/// Known operators, longest first so the first prefix match is the longest.
pub const OPERATORS: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "=", "<", ">", "+", "-", "*", "/", "%",
    "&", "|", "!",
];

const PUNCTUATION: &str = ",.;()[]{}";
const OPERATOR_CHARS: &str = "+-*/%=&|<>!";

#[inline]
fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

#[inline]
fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == 'λ'
}

#[inline]
fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit() || matches!(ch, '?' | '!' | '-' | '<' | '>' | '=')
}

/// Token stream over a source text.
#[derive(Clone, Debug)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    peeked: Option<Token>,
    strict: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            peeked: None,
            strict: false,
        }
    }

    /// Report strings cut off by end of input instead of accepting them.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Consume and return the next token.
    ///
    /// At end of input this keeps returning an [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.read_token(),
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token, LexError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.read_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Whether only whitespace and comments remain.
    pub fn at_end(&mut self) -> Result<bool, LexError> {
        Ok(self.peek()?.is_eof())
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        match &self.peeked {
            Some(token) => token.position,
            None => self.cursor.position(),
        }
    }

    /// Build an error at the lexer's current position.
    #[cold]
    pub fn fail(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.position())
    }

    fn read_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        let start = self.cursor.position();
        let Some(ch) = self.cursor.current() else {
            return Ok(Token::eof(start));
        };

        let token = if ch == '"' || ch == '\'' {
            self.read_string(ch, start)?
        } else if ch.is_ascii_digit() {
            self.read_number(start)
        } else if is_ident_start(ch) {
            self.read_ident(start)
        } else if PUNCTUATION.contains(ch) {
            self.cursor.advance();
            Token::new(TokenKind::Punctuation, ch, start)
        } else if OPERATOR_CHARS.contains(ch) {
            self.read_operator(ch, start)?
        } else {
            return Err(self.fail(LexErrorKind::UnexpectedChar(ch)));
        };

        tracing::trace!(kind = %token.kind, value = %token.value, position = %token.position, "token");
        Ok(token)
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(is_whitespace);
            if self.cursor.current() == Some('#') {
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
            } else {
                return;
            }
        }
    }

    fn read_string(&mut self, quote: char, start: Position) -> Result<Token, LexError> {
        self.cursor.advance();
        let mut value = String::new();
        let mut escaped = false;
        loop {
            let Some(ch) = self.cursor.advance() else {
                if self.strict {
                    return Err(LexError::new(LexErrorKind::UnterminatedString, start));
                }
                break;
            };
            if escaped {
                value.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                break;
            } else {
                value.push(ch);
            }
        }
        Ok(Token::new(TokenKind::Str, value, start))
    }

    fn read_number(&mut self, start: Position) -> Token {
        let mut seen_dot = false;
        let text = self.cursor.eat_while(|ch| {
            if ch == '.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
                return true;
            }
            ch.is_ascii_digit()
        });
        Token::new(TokenKind::Num, text, start)
    }

    fn read_ident(&mut self, start: Position) -> Token {
        let text = self.cursor.eat_while(is_ident_continue);
        let kind = match text {
            "true" | "false" => TokenKind::Bool,
            t if KEYWORDS.contains(&t) => TokenKind::Keyword,
            _ => TokenKind::Var,
        };
        Token::new(kind, text, start)
    }

    fn read_operator(&mut self, first: char, start: Position) -> Result<Token, LexError> {
        let rest = self.cursor.rest();
        let Some(op) = OPERATORS.iter().copied().find(|op| rest.starts_with(op)) else {
            return Err(self.fail(LexErrorKind::UnexpectedChar(first)));
        };
        self.cursor.advance_by(op.chars().count());
        Ok(Token::new(TokenKind::Operator, op, start))
    }
}

/// Lex a whole source text, excluding the final end-of-input token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.is_eof() {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
