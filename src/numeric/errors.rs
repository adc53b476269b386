// ============================================================================
// Calculation Errors
// Error types surfaced by every calculator operation
// ============================================================================

use crate::domain::Operation;
use std::fmt;

/// Message used when a divisor compares equal to zero.
pub const DIVISION_BY_ZERO_MESSAGE: &str = "Division by zero not allowed";

/// Errors that can occur while validating, coercing or computing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalcError {
    /// Bad input: too few operands, an absent operand, an unsupported type,
    /// or text that is not a decimal numeral
    InvalidArgument(String),
    /// A divisor after the first operand was zero
    DivisionByZero,
    /// The decimal backend could not represent a result
    Overflow { operation: Operation },
}

impl CalcError {
    /// Build an `InvalidArgument` from anything printable.
    pub fn invalid(message: impl Into<String>) -> Self {
        CalcError::InvalidArgument(message.into())
    }

    /// True for the "bad input" family.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CalcError::InvalidArgument(_))
    }

    /// True when the call failed on a zero divisor.
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, CalcError::DivisionByZero)
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidArgument(message) => f.write_str(message),
            CalcError::DivisionByZero => f.write_str(DIVISION_BY_ZERO_MESSAGE),
            CalcError::Overflow { operation } => {
                write!(f, "arithmetic overflow: {} result out of range", operation)
            },
        }
    }
}

impl std::error::Error for CalcError {}

/// Result type alias for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
