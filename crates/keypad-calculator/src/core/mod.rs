//! Expression evaluation core
//!
//! Sanitizer, tokenizer, recursive-descent parser and evaluator for the
//! restricted keypad grammar: numeric literals, `+ - * /`, parentheses,
//! the decimal point and percent (`X%` reads as `X/100`).

pub mod evaluator;
pub mod format;
mod functions;
pub mod parser;
pub mod sanitize;

pub use functions::UnaryFunction;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator errors
///
/// Everything the evaluator can reject collapses into
/// [`CalcError::InvalidExpression`]; the reason is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The expression could not be evaluated to a finite number
    #[error("Invalid expression: {0}")]
    InvalidExpression(InvalidReason),

    /// An input event did not map to any calculator action
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

impl CalcError {
    /// Shorthand for a syntax failure
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::InvalidExpression(InvalidReason::Syntax(message.into()))
    }

    /// Returns true if this is an expression failure (as opposed to an input mapping failure)
    #[must_use]
    pub const fn is_invalid_expression(&self) -> bool {
        matches!(self, Self::InvalidExpression(_))
    }
}

impl From<InvalidReason> for CalcError {
    fn from(reason: InvalidReason) -> Self {
        Self::InvalidExpression(reason)
    }
}

/// Why an expression was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// Nothing left to evaluate after sanitizing
    #[error("empty expression")]
    Empty,
    /// A character outside the arithmetic grammar survived sanitizing
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// Expression starts with a binary-only operator
    #[error("expression cannot start with '{0}'")]
    LeadingOperator(char),
    /// Malformed token stream
    #[error("{0}")]
    Syntax(String),
    /// Division by zero or overflow
    #[error("result is not a finite number")]
    NonFinite,
    /// Unary function applied outside its domain
    #[error("{function} is undefined for {operand}")]
    Undefined {
        /// The function that was applied
        function: UnaryFunction,
        /// Canonical text of the operand
        operand: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_expression_display() {
        let err = CalcError::InvalidExpression(InvalidReason::Empty);
        assert_eq!(err.to_string(), "Invalid expression: empty expression");
    }

    #[test]
    fn test_syntax_shorthand() {
        let err = CalcError::syntax("unclosed parenthesis");
        assert_eq!(
            err,
            CalcError::InvalidExpression(InvalidReason::Syntax("unclosed parenthesis".into()))
        );
        assert!(err.is_invalid_expression());
    }

    #[test]
    fn test_unknown_action_is_not_expression_error() {
        let err = CalcError::UnknownAction("launch".into());
        assert!(!err.is_invalid_expression());
        assert_eq!(err.to_string(), "Unknown action: launch");
    }

    #[test]
    fn test_undefined_reason_display() {
        let reason = InvalidReason::Undefined {
            function: UnaryFunction::Sqrt,
            operand: "-4".into(),
        };
        assert_eq!(reason.to_string(), "sqrt is undefined for -4");
    }

    #[test]
    fn test_reason_converts_into_error() {
        let err: CalcError = InvalidReason::NonFinite.into();
        assert!(matches!(
            err,
            CalcError::InvalidExpression(InvalidReason::NonFinite)
        ));
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::from(InvalidReason::Empty));
        assert!(err.to_string().contains("empty"));
    }
}
