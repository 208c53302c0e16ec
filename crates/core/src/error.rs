use thiserror::Error;

/// Errors raised by notation and decimal arithmetic
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid decimal: {0:?}")]
    InvalidDecimal(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot express {0} with {1} decimal places without losing precision")]
    PrecisionLoss(String, u32),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
