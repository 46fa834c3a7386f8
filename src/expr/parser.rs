//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```

use super::lexer::{tokenize, Token, TokenKind};
use super::{BinaryOp, Expr, ExprError, MAX_DEPTH, MAX_TOKENS};

/// Parse `input` into an expression tree. The whole input must be consumed.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(ExprError::TooLong { len: tokens.len() });
    }
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(unexpected(tok)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    /// Open parentheses and unary signs above the current position.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn descend(&mut self, pos: usize) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep { pos });
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().and_then(|t| additive(t.kind)) {
            self.cursor += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(|t| multiplicative(t.kind)) {
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        let Some(tok) = self.peek() else {
            return self.primary();
        };
        let negate = match tok.kind {
            TokenKind::Plus => false,
            TokenKind::Minus => true,
            _ => return self.primary(),
        };
        self.cursor += 1;
        self.descend(tok.pos)?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(if negate {
            Expr::Neg(Box::new(operand))
        } else {
            operand
        })
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let tok = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::LParen => {
                self.descend(tok.pos)?;
                let inner = self.expr()?;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.depth -= 1;
                        Ok(inner)
                    }
                    Some(other) => Err(unexpected(other)),
                    None => Err(ExprError::UnclosedParen { pos: tok.pos }),
                }
            }
            _ => Err(unexpected(tok)),
        }
    }
}

fn additive(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        _ => None,
    }
}

fn unexpected(tok: Token) -> ExprError {
    ExprError::UnexpectedToken {
        found: tok.kind.to_string(),
        pos: tok.pos,
    }
}
