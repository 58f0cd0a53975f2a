//! Grammar productions, split by construct.

mod binding;
mod control;
mod expr;

use weblang_ir::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `open item (sep item)* sep? close`
    ///
    /// A trailing separator before `close` is accepted.
    pub(crate) fn delimited<T>(
        &mut self,
        open: char,
        close: char,
        sep: char,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect_punc(open)?;
        let mut items = Vec::new();
        let mut first = true;
        loop {
            if self.check_punc(close)? {
                break;
            }
            if first {
                first = false;
            } else {
                self.expect_punc(sep)?;
                if self.check_punc(close)? {
                    break;
                }
            }
            items.push(item(self)?);
        }
        self.expect_punc(close)?;
        Ok(items)
    }

    /// Parameter list of a lambda: `(a, b, c)`.
    pub(crate) fn param_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.delimited('(', ')', ',', |p| p.expect_var().map(|t| t.value))
    }

    pub(crate) fn check_var(&mut self) -> Result<bool, ParseError> {
        Ok(self.peek()?.kind == TokenKind::Var)
    }
}
