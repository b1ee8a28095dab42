//! Input vocabulary
//!
//! Keypad buttons carry a `data-action` / `data-value` pair and the keyboard
//! produces key names; both are mapped onto [`Action`] here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, UnaryFunction};

/// A discrete calculator input event
///
/// Serializes as `{"action": ..., "value": ...}`; deserializing goes through
/// [`Action::from_button`], so JSON input gets the same validation as a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "action",
    content = "value",
    rename_all = "lowercase",
    try_from = "ButtonAttrs"
)]
pub enum Action {
    /// Append digits
    Number(String),
    /// Append a binary operator (`+ - * /`)
    Operator(char),
    /// Add a decimal point to the current number
    Decimal,
    /// Reset everything
    Clear,
    /// Evaluate the expression
    Equals,
    /// Delete the last character
    Backspace,
    /// Toggle the sign of the last operand
    Sign,
    /// Apply a unary function to the expression's value
    Function(UnaryFunction),
    /// Append `(` or `)`
    Parenthesis(char),
    /// Append `%`
    Percent,
}

impl Action {
    /// Maps a keyboard key name (as in `KeyboardEvent.key`)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return match ch {
                '0'..='9' => Some(Self::Number(ch.to_string())),
                '+' | '-' | '*' | '/' => Some(Self::Operator(ch)),
                '×' => Some(Self::Operator('*')),
                '÷' => Some(Self::Operator('/')),
                '.' => Some(Self::Decimal),
                '%' => Some(Self::Percent),
                '(' | ')' => Some(Self::Parenthesis(ch)),
                '=' => Some(Self::Equals),
                _ => None,
            };
        }

        match key {
            "Enter" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            _ => None,
        }
    }

    /// Maps a keypad button's `data-action` and optional `data-value`
    pub fn from_button(action: &str, value: Option<&str>) -> CalcResult<Self> {
        let unknown = || CalcError::UnknownAction(format!("{action}({})", value.unwrap_or("")));

        let parsed = match action {
            "number" => {
                let digits = value.filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()));
                Self::Number(digits.ok_or_else(unknown)?.to_string())
            }
            "operator" => match single_char(value) {
                Some(op @ ('+' | '-' | '*' | '/')) => Self::Operator(op),
                Some('×') => Self::Operator('*'),
                Some('÷') => Self::Operator('/'),
                _ => return Err(unknown()),
            },
            "parenthesis" => match single_char(value) {
                Some(paren @ ('(' | ')')) => Self::Parenthesis(paren),
                _ => return Err(unknown()),
            },
            "function" => Self::Function(value.ok_or_else(unknown)?.parse()?),
            "decimal" => Self::Decimal,
            "clear" => Self::Clear,
            "equals" => Self::Equals,
            "backspace" => Self::Backspace,
            "sign" => Self::Sign,
            "percent" => Self::Percent,
            _ => return Err(unknown()),
        };
        Ok(parsed)
    }

    /// The `data-action` name of this action
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Operator(_) => "operator",
            Self::Decimal => "decimal",
            Self::Clear => "clear",
            Self::Equals => "equals",
            Self::Backspace => "backspace",
            Self::Sign => "sign",
            Self::Function(_) => "function",
            Self::Parenthesis(_) => "parenthesis",
            Self::Percent => "percent",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(digits) => write!(f, "number({digits})"),
            Self::Operator(ch) | Self::Parenthesis(ch) => write!(f, "{}({ch})", self.name()),
            Self::Function(function) => write!(f, "function({function})"),
            _ => f.write_str(self.name()),
        }
    }
}

/// Wire form of an action before validation
#[derive(Debug, Deserialize)]
struct ButtonAttrs {
    action: String,
    #[serde(default)]
    value: Option<String>,
}

impl TryFrom<ButtonAttrs> for Action {
    type Error = CalcError;

    fn try_from(attrs: ButtonAttrs) -> CalcResult<Self> {
        Self::from_button(&attrs.action, attrs.value.as_deref())
    }
}

fn single_char(value: Option<&str>) -> Option<char> {
    let mut chars = value?.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
