//! Character cursor with line/column tracking.
//!
//! `\n`, `\r\n` and a lone `\r` each end one line.

use weblang_ir::Position;

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'src> {
    source: &'src str,
    /// Byte offset of the current character.
    offset: usize,
    position: Position,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Cursor {
            source,
            offset: 0,
            position: Position::START,
        }
    }

    /// Position of the current character (or of end of input).
    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Unconsumed input.
    #[inline]
    pub(crate) fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the current character.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.offset += ch.len_utf8();
        match ch {
            '\n' => self.new_line(),
            '\r' if self.current() != Some('\n') => self.new_line(),
            '\r' => {}
            _ => self.position.column += 1,
        }
        Some(ch)
    }

    /// Consume `n` characters.
    pub(crate) fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consume characters while `pred` holds, returning the consumed text.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'src str {
        let start = self.offset;
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
        &self.source[start..self.offset]
    }

    fn new_line(&mut self) {
        self.position.line += 1;
        self.position.column = 1;
    }
}
