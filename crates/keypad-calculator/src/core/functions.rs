//! Single-operand keypad functions (√x, x², 1/x)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::format::format_number;
use crate::core::{CalcError, CalcResult, InvalidReason};

/// Unary function applied to the value of the whole expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryFunction {
    /// Square root
    Sqrt,
    /// Square
    Square,
    /// Reciprocal (1/x)
    Reciprocal,
}

impl UnaryFunction {
    /// All functions, in keypad order
    pub const ALL: [Self; 3] = [Self::Sqrt, Self::Square, Self::Reciprocal];

    /// Returns the `data-value` name used by keypad buttons
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Reciprocal => "reciprocal",
        }
    }

    /// Returns the keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sqrt => "√x",
            Self::Square => "x²",
            Self::Reciprocal => "1/x",
        }
    }

    /// Applies the function, rejecting values outside its domain
    pub fn apply(&self, value: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Sqrt => value.sqrt(),
            Self::Square => value * value,
            Self::Reciprocal => 1.0 / value,
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(InvalidReason::Undefined {
                function: *self,
                operand: format_number(value),
            }
            .into())
        }
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnaryFunction {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| CalcError::UnknownAction(format!("function({s})")))
    }
}
