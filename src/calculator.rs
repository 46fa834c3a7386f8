//! Four-function calculator with an append-only history of text records.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShopCalcError};
use crate::expr;

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// A binary operator as typed by a user: `+`, `-`, `*`/`×`, `/`/`÷`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol used in history records.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ShopCalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" | "×" => Ok(Operator::Multiply),
            "/" | "÷" => Ok(Operator::Divide),
            other => Err(ShopCalcError::InvalidArgument(format!(
                "Unknown operator: {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Arithmetic over `f64` that records every successful calculation.
///
/// Failed operations (division by zero, malformed expressions) leave the
/// history untouched.
///
/// ```rust
/// use shopcalc::Calculator;
///
/// let mut calc = Calculator::new();
/// assert_eq!(calc.add(298.0, 158.0), 456.0);
/// assert!(calc.divide(1.0, 0.0).is_err());
/// assert_eq!(calc.history(), vec!["298 + 158 = 456"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    history: Vec<String>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, a: f64, b: f64) -> f64 {
        self.record(a, Operator::Add, b, a + b)
    }

    pub fn subtract(&mut self, a: f64, b: f64) -> f64 {
        self.record(a, Operator::Subtract, b, a - b)
    }

    pub fn multiply(&mut self, a: f64, b: f64) -> f64 {
        self.record(a, Operator::Multiply, b, a * b)
    }

    /// Fails with [`ShopCalcError::DivisionByZero`] when `b` is zero.
    pub fn divide(&mut self, a: f64, b: f64) -> Result<f64> {
        if b == 0.0 {
            return Err(ShopCalcError::DivisionByZero);
        }
        Ok(self.record(a, Operator::Divide, b, a / b))
    }

    /// Dispatch to the operation named by `op`.
    pub fn apply(&mut self, a: f64, op: Operator, b: f64) -> Result<f64> {
        match op {
            Operator::Add => Ok(self.add(a, b)),
            Operator::Subtract => Ok(self.subtract(a, b)),
            Operator::Multiply => Ok(self.multiply(a, b)),
            Operator::Divide => self.divide(a, b),
        }
    }

    /// Evaluate an infix arithmetic expression such as `"298 * 1.08"`.
    ///
    /// See [`crate::expr`] for the accepted grammar. The history record
    /// spells `×` and `÷` as `*` and `/`.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64> {
        let expression = expression.trim().replace('×', "*").replace('÷', "/");
        let result = expr::evaluate(&expression)?;
        self.history.push(format!("{expression} = {result}"));
        Ok(result)
    }

    /// Snapshot of all records, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.clone()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, a: f64, op: Operator, b: f64, result: f64) -> f64 {
        self.history.push(format!("{a} {op} {b} = {result}"));
        result
    }
}
