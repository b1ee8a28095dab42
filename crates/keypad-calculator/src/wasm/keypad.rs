//! Keypad layout
//!
//! Each button is described by the same `data-action` / `data-value` pair
//! the browser page puts on its `<button>` elements, so clicks in the real
//! page and in [`super::MockDom`] go through [`Action::from_button`] alike.

use crate::action::Action;
use crate::core::UnaryFunction;

use super::dom::DomElement;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: Action,
    /// Visible label
    pub label: String,
    /// DOM element ID
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button definition; label and ID are derived from the action
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        let (label, id): (String, String) = match &action {
            Action::Number(digits) => (digits.clone(), format!("btn-{digits}")),
            Action::Operator(op) => (
                operator_label(*op).to_string(),
                format!("btn-{}", operator_name(*op)),
            ),
            Action::Decimal => (".".into(), "btn-decimal".into()),
            Action::Clear => ("C".into(), "btn-clear".into()),
            Action::Equals => ("=".into(), "btn-equals".into()),
            Action::Backspace => ("⌫".into(), "btn-backspace".into()),
            Action::Sign => ("±".into(), "btn-sign".into()),
            Action::Function(function) => {
                (function.label().into(), format!("btn-{}", function.name()))
            }
            Action::Parenthesis('(') => ("(".into(), "btn-open-paren".into()),
            Action::Parenthesis(_) => (")".into(), "btn-close-paren".into()),
            Action::Percent => ("%".into(), "btn-percent".into()),
        };
        Self {
            action,
            label,
            id,
            row,
            col,
        }
    }

    /// The `data-value` attribute, for actions that carry one
    #[must_use]
    pub fn data_value(&self) -> Option<String> {
        match &self.action {
            Action::Number(digits) => Some(digits.clone()),
            Action::Operator(ch) | Action::Parenthesis(ch) => Some(ch.to_string()),
            Action::Function(function) => Some(function.name().to_string()),
            _ => None,
        }
    }

    /// Builds the `<button>` element
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let element = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.label)
            .with_class("keypad-btn")
            .with_attr("data-action", self.action.name());
        match self.data_value() {
            Some(value) => element.with_attr("data-value", &value),
            None => element,
        }
    }
}

fn operator_label(op: char) -> char {
    match op {
        '*' => '×',
        '/' => '÷',
        other => other,
    }
}

fn operator_name(op: char) -> &'static str {
    match op {
        '+' => "plus",
        '-' => "minus",
        '*' => "times",
        _ => "divide",
    }
}

/// Standard keypad
///
/// ```text
/// [ C ] [ ⌫ ] [ ( ] [ ) ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ] [√x ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ] [ x²]
/// [ 1 ] [ 2 ] [ 3 ] [ + ] [1/x]
/// [ ± ] [ 0 ] [ . ] [ % ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Number of columns
    pub const COLS: usize = 5;

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: u8| Action::Number(d.to_string());
        let rows = [
            [
                Action::Clear,
                Action::Backspace,
                Action::Parenthesis('('),
                Action::Parenthesis(')'),
                Action::Operator('/'),
            ],
            [
                digit(7),
                digit(8),
                digit(9),
                Action::Operator('*'),
                Action::Function(UnaryFunction::Sqrt),
            ],
            [
                digit(4),
                digit(5),
                digit(6),
                Action::Operator('-'),
                Action::Function(UnaryFunction::Square),
            ],
            [
                digit(1),
                digit(2),
                digit(3),
                Action::Operator('+'),
                Action::Function(UnaryFunction::Reciprocal),
            ],
            [
                Action::Sign,
                digit(0),
                Action::Decimal,
                Action::Percent,
                Action::Equals,
            ],
        ];

        let buttons = rows
            .into_iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .into_iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButton::new(action, row, col))
            })
            .collect();

        Self { buttons }
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if col < Self::COLS {
            self.buttons.get(row * Self::COLS + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Creates the keypad container with all buttons as children
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        self.buttons.iter().fold(
            DomElement::new("div").with_id("keypad").with_class("keypad"),
            |keypad, button| keypad.with_child(button.to_element()),
        )
    }
}
