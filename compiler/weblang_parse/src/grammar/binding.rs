//! `let` in all its forms.
//!
//! ```text
//! let name                      Let(name)
//! let name = expr               Let(name, expr)
//! let name(a, b) = body         Let(name, fn name(a, b) body)
//! let name(a = 1, b) body       (fn name(a, b) body)(1, false)
//! let (a = 1, b = a + 1) body   LetIn([a = 1, b = a + 1], body)
//! ```

use std::rc::Rc;

use weblang_ir::{Expr, ExprKind, LambdaDef, LetBinding, Position};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn let_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.advance()?.position;

        if self.check_punc('(')? {
            let bindings = self.delimited('(', ')', ',', Self::binding)?;
            let body = self.expression()?;
            return Ok(Expr::new(
                ExprKind::LetIn {
                    bindings,
                    body: Box::new(body),
                },
                position,
            ));
        }

        let name = self.expect_var()?.value;

        if self.check_op("=")? {
            self.advance()?;
            let mut init = self.expression()?;
            name_anonymous_lambda(&mut init, &name);
            return Ok(Expr::new(
                ExprKind::Let {
                    name,
                    init: Some(Box::new(init)),
                },
                position,
            ));
        }

        if self.check_punc('(')? {
            let bindings = self.delimited('(', ')', ',', Self::binding)?;
            return if self.check_op("=")? {
                self.function_definition(name, bindings, position)
            } else {
                self.named_let(name, bindings, position)
            };
        }

        Ok(Expr::new(ExprKind::Let { name, init: None }, position))
    }

    /// `name ("=" expression)?`
    fn binding(&mut self) -> Result<LetBinding, ParseError> {
        let name = self.expect_var()?.value;
        let init = if self.check_op("=")? {
            self.advance()?;
            Some(self.expression()?)
        } else {
            None
        };
        Ok(LetBinding { name, init })
    }

    /// `let name(params) = body` binds a self-named lambda.
    fn function_definition(
        &mut self,
        name: String,
        params: Vec<LetBinding>,
        position: Position,
    ) -> Result<Expr, ParseError> {
        if let Some(param) = params.iter().find(|p| p.init.is_some()) {
            return Err(ParseError::new(
                ParseErrorKind::InitializerInDefinition {
                    name: param.name.clone(),
                },
                position,
            ));
        }
        self.advance()?;
        let body = self.expression()?;
        let lambda = LambdaDef {
            name: Some(name.clone()),
            params: params.into_iter().map(|p| p.name).collect(),
            body,
        };
        Ok(Expr::new(
            ExprKind::Let {
                name,
                init: Some(Box::new(Expr::new(
                    ExprKind::Lambda(Rc::new(lambda)),
                    position,
                ))),
            },
            position,
        ))
    }

    /// `let name(a = 1, b) body` calls a self-named lambda immediately with
    /// the initial values; missing values are `false`.
    fn named_let(
        &mut self,
        name: String,
        bindings: Vec<LetBinding>,
        position: Position,
    ) -> Result<Expr, ParseError> {
        let body = self.expression()?;
        let (params, args): (Vec<_>, Vec<_>) = bindings
            .into_iter()
            .map(|b| {
                let arg = b.init.unwrap_or_else(|| Expr::false_literal(position));
                (b.name, arg)
            })
            .unzip();
        let lambda = LambdaDef {
            name: Some(name),
            params,
            body,
        };
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(Expr::new(ExprKind::Lambda(Rc::new(lambda)), position)),
                args,
            },
            position,
        ))
    }
}

/// `let f = fn(n) ...` lets the lambda refer to itself as `f`.
fn name_anonymous_lambda(init: &mut Expr, name: &str) {
    if let ExprKind::Lambda(def) = &mut init.kind {
        if def.name.is_none() {
            if let Some(def) = Rc::get_mut(def) {
                def.name = Some(name.to_owned());
            }
        }
    }
}
