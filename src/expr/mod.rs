//! Arithmetic expression evaluation over numeric literals.
//!
//! Input is tokenized, parsed by recursive descent into an [`Expr`] tree,
//! and the tree is evaluated. Only numbers, `+ - * /` (with `×` and `÷` as
//! aliases), unary signs and parentheses are accepted; anything else is a
//! positioned [`ExprError`].
//!
//! # Example
//!
//! ```rust
//! use shopcalc::expr;
//! let total = expr::evaluate("(100 + 200 + 150) * 1.08").unwrap();
//! assert!((total - 486.0).abs() < 1e-9);
//! ```

mod lexer;
mod parser;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;

use std::fmt;

/// Maximum nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 256;

/// Maximum number of tokens in one expression. Bounds the height of the
/// tree, which evaluation and formatting walk recursively.
pub const MAX_TOKENS: usize = 1024;

// ---------------------------------------------------------------------------
// ExprError
// ---------------------------------------------------------------------------

/// Why an expression was rejected. Positions are character offsets into
/// the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number {literal:?} at position {pos}")]
    InvalidNumber { literal: String, pos: usize },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unclosed parenthesis opened at position {pos}")]
    UnclosedParen { pos: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression nests deeper than {} levels at position {pos}", MAX_DEPTH)]
    TooDeep { pos: usize },

    #[error("expression has {len} tokens, limit is {}", MAX_TOKENS)]
    TooLong { len: usize },
}

// ---------------------------------------------------------------------------
// Expr
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        };
        f.write_str(s)
    }
}

/// Parsed arithmetic expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate the tree. Division by zero and non-finite results are errors.
    pub fn eval(&self) -> Result<f64, ExprError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Neg(inner) => -inner.eval()?,
            Expr::Binary { op, lhs, rhs } => {
                let a = lhs.eval()?;
                let b = rhs.eval()?;
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => {
                        if b == 0.0 {
                            return Err(ExprError::DivisionByZero);
                        }
                        a / b
                    }
                }
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExprError::NonFinite)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Neg(inner) => write!(f, "-({inner})"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}

/// Parse and evaluate `input` in one step.
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    parse(input)?.eval()
}
