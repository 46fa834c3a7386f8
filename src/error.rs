use crate::expr::ExprError;

#[derive(Debug, thiserror::Error)]
pub enum ShopCalcError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ExprError),

    #[error("Invalid item number: {index} (list has {len} items)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShopCalcError {
    /// True for business-rule violations: bad input, a malformed expression
    /// or division by zero.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::DivisionByZero | Self::InvalidExpression(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ShopCalcError>;
