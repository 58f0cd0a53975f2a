//! Binary operators and the precedence table.
//!
//! Higher precedence binds tighter. Assignment is not a [`BinaryOp`]; it has
//! its own node and sits at [`ASSIGN_PRECEDENCE`], below every binary operator.

/// Precedence of `=`.
pub const ASSIGN_PRECEDENCE: u8 = 1;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Look up the operator written as `symbol`.
    ///
    /// Returns `None` for `=` and for operator text with no binary meaning
    /// (`&`, `|`, `!`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "||" => Self::Or,
            "&&" => Self::And,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::LtEq,
            ">=" => Self::GtEq,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNotEq,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            _ => return None,
        };
        Some(op)
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Precedence level:
    /// - 20: `*` `/` `%`
    /// - 10: `+` `-`
    /// - 7: comparisons and equality
    /// - 3: `&&`
    /// - 2: `||`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 20,
            Self::Add | Self::Sub => 10,
            Self::Lt
            | Self::Gt
            | Self::LtEq
            | Self::GtEq
            | Self::Eq
            | Self::NotEq
            | Self::StrictEq
            | Self::StrictNotEq => 7,
            Self::And => 3,
            Self::Or => 2,
        }
    }

    /// Arithmetic operators require two numbers.
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    /// Ordering comparisons require two numbers.
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::LtEq | Self::GtEq)
    }
}
