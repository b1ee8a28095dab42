//! Expression buffer state machine
//!
//! Holds the text being typed and the last successful result. Every
//! mutating operation keeps two invariants:
//!
//! - no two binary operators in a row (an operator replaces a trailing one)
//! - at most one decimal point per numeric segment
//!
//! A `-` at the start, after an operator or after `(` is a sign belonging to
//! the operand that follows it, not a binary operator.

use tracing::trace;

use crate::core::evaluator::evaluate_value;
use crate::core::format::format_number;
use crate::core::parser::is_binary_operator;
use crate::core::{CalcResult, UnaryFunction};
use crate::history::HistoryEntry;

/// Text shown when the expression is empty
pub const EMPTY_DISPLAY: &str = "0";

/// Characters an expression may contain
const EXPRESSION_CHARS: &str = "0123456789.+-*/()%";

/// The calculator's input buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionBuffer {
    expression: String,
    last_result: Option<f64>,
}

impl ExpressionBuffer {
    /// Creates an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `expression`, with no prior result
    #[must_use]
    pub fn with_expression(expression: &str) -> Self {
        Self {
            expression: expression.to_string(),
            last_result: None,
        }
    }

    /// Current expression text (may be empty)
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Most recent successfully evaluated value
    #[must_use]
    pub const fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Returns true if nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Display text: the expression, or `0` when empty
    #[must_use]
    pub fn display(&self) -> &str {
        if self.expression.is_empty() {
            EMPTY_DISPLAY
        } else {
            &self.expression
        }
    }

    /// Appends a digit, parenthesis or other symbol
    ///
    /// A lone `0` is replaced rather than extended, except by a decimal point.
    /// Characters outside the expression alphabet are dropped.
    pub fn append_digit_or_symbol(&mut self, token: &str) -> &str {
        let token: String = token
            .chars()
            .filter(|ch| EXPRESSION_CHARS.contains(*ch))
            .collect();
        if token.is_empty() {
            return self.display();
        }

        if self.expression == "0" && token != "." {
            self.expression = token;
        } else {
            self.expression.push_str(&token);
        }
        self.display()
    }

    /// Appends a binary operator, replacing any trailing operator run
    ///
    /// An empty buffer continues from the last result when there is one,
    /// otherwise the call is a no-op.
    pub fn append_operator(&mut self, op: char) -> &str {
        if !is_binary_operator(op) {
            return self.display();
        }

        if self.expression.is_empty() {
            if let Some(value) = self.last_result {
                self.expression = format_number(value);
            }
        }
        if self.expression.is_empty() {
            return self.display();
        }

        let kept = self.expression.trim_end_matches(is_binary_operator).len();
        self.expression.truncate(kept);
        self.expression.push(op);
        self.display()
    }

    /// Adds a decimal point to the last numeric segment if it has none
    pub fn append_decimal_point(&mut self) -> &str {
        if self.expression.is_empty() {
            self.expression.push_str("0.");
            return self.display();
        }

        if self.expression.ends_with([')', '%']) {
            trace!(expression = %self.expression, "decimal point after closed operand ignored");
            return self.display();
        }

        let segment = &self.expression[last_number_start(&self.expression)..];
        if segment.contains('.') {
            return self.display();
        }

        if segment.is_empty() {
            self.expression.push_str("0.");
            self.display()
        } else {
            self.append_digit_or_symbol(".")
        }
    }

    /// Negates the last operand, or removes its sign if it already has one
    ///
    /// The last operand is the trailing number (with any `%`) or the trailing
    /// parenthesized group. No-op when there is none.
    pub fn toggle_sign(&mut self) -> &str {
        let Some(start) = last_operand_start(&self.expression) else {
            return self.display();
        };

        if start > 0 && is_sign_at(&self.expression, start - 1) {
            self.expression.remove(start - 1);
        } else {
            self.expression.insert(start, '-');
        }
        self.display()
    }

    /// Removes the last character
    pub fn backspace(&mut self) -> &str {
        self.expression.pop();
        self.display()
    }

    /// Resets the expression and forgets the last result
    pub fn clear(&mut self) -> &str {
        self.expression.clear();
        self.last_result = None;
        self.display()
    }

    /// Appends `%`; resolved as `/100` at evaluation time
    pub fn apply_percent(&mut self) -> &str {
        if self.expression.is_empty() {
            return self.display();
        }
        self.append_digit_or_symbol("%")
    }

    /// Evaluates the expression and replaces it with `function(value)`
    ///
    /// On failure the buffer is left untouched.
    pub fn apply_unary_function(&mut self, function: UnaryFunction) -> CalcResult<&str> {
        if self.expression.is_empty() {
            return Ok(self.display());
        }

        let value = evaluate_value(&self.expression)?;
        let result = function.apply(value)?;
        self.expression = format_number(result);
        Ok(self.display())
    }

    /// Evaluates the expression; on success the result becomes the new expression
    ///
    /// Returns the completed calculation, or `None` for an empty buffer. On
    /// failure the buffer is left untouched.
    pub fn evaluate(&mut self) -> CalcResult<Option<HistoryEntry>> {
        if self.expression.is_empty() {
            return Ok(None);
        }

        let value = evaluate_value(&self.expression)?;
        let result = format_number(value);

        let completed = std::mem::replace(&mut self.expression, result.clone());
        self.last_result = Some(value);
        Ok(Some(HistoryEntry::new(completed, result)))
    }
}

/// Returns true if the `-` at byte `idx` is a sign rather than subtraction
fn is_sign_at(expression: &str, idx: usize) -> bool {
    if expression.as_bytes().get(idx) != Some(&b'-') {
        return false;
    }
    match expression[..idx].chars().next_back() {
        None => true,
        Some(prev) => prev == '(' || is_binary_operator(prev),
    }
}

/// Byte index where the trailing run of digits and `.` begins
fn last_number_start(expression: &str) -> usize {
    expression
        .trim_end_matches(|ch: char| ch.is_ascii_digit() || ch == '.')
        .len()
}

/// Byte index where the trailing operand begins
///
/// The operand is either a number or a balanced parenthesized group,
/// optionally followed by `%`.
fn last_operand_start(expression: &str) -> Option<usize> {
    let body = expression.trim_end_matches('%');

    if body.ends_with(')') {
        let mut depth = 0usize;
        for (idx, ch) in body.char_indices().rev() {
            match ch {
                ')' => depth += 1,
                '(' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
        // unbalanced: no matching '('
        return None;
    }

    let start = last_number_start(body);
    (start < body.len()).then_some(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, InvalidReason};

    fn buffer(expression: &str) -> ExpressionBuffer {
        ExpressionBuffer::with_expression(expression)
    }

    // ===== append_digit_or_symbol =====

    #[test]
    fn test_new_buffer_displays_zero() {
        let buf = ExpressionBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.display(), "0");
        assert_eq!(buf.last_result(), None);
    }

    #[test]
    fn test_append_digits() {
        let mut buf = ExpressionBuffer::new();
        buf.append_digit_or_symbol("1");
        buf.append_digit_or_symbol("2");
        assert_eq!(buf.append_digit_or_symbol("3"), "123");
    }

    #[test]
    fn test_append_replaces_lone_zero() {
        let mut buf = buffer("0");
        assert_eq!(buf.append_digit_or_symbol("7"), "7");
        let mut buf = buffer("0");
        assert_eq!(buf.append_digit_or_symbol("("), "(");
    }

    #[test]
    fn test_append_decimal_keeps_lone_zero() {
        let mut buf = buffer("0");
        assert_eq!(buf.append_digit_or_symbol("."), "0.");
    }

    #[test]
    fn test_append_drops_foreign_characters() {
        let mut buf = buffer("1");
        assert_eq!(buf.append_digit_or_symbol("x"), "1");
        assert_eq!(buf.append_digit_or_symbol("2;"), "12");
    }

    // ===== append_operator =====

    #[test]
    fn test_operator_on_empty_is_noop() {
        let mut buf = ExpressionBuffer::new();
        assert_eq!(buf.append_operator('+'), "0");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_operator_appends() {
        let mut buf = buffer("5");
        assert_eq!(buf.append_operator('+'), "5+");
    }

    #[test]
    fn test_operator_replaces_trailing_operator() {
        let mut buf = buffer("5");
        buf.append_operator('+');
        assert_eq!(buf.append_operator('*'), "5*");
    }

    #[test]
    fn test_operator_replaces_operator_and_sign() {
        let mut buf = buffer("3+-");
        assert_eq!(buf.append_operator('*'), "3*");
    }

    #[test]
    fn test_operator_after_paren_appends() {
        let mut buf = buffer("(2+3)");
        assert_eq!(buf.append_operator('/'), "(2+3)/");
    }

    #[test]
    fn test_operator_seeds_from_last_result() {
        let mut buf = buffer("5+3");
        buf.evaluate().unwrap();
        buf.backspace();
        assert!(buf.is_empty());
        assert_eq!(buf.append_operator('*'), "8*");
    }

    #[test]
    fn test_operator_rejects_non_operator() {
        let mut buf = buffer("5");
        assert_eq!(buf.append_operator('^'), "5");
    }

    // ===== append_decimal_point =====

    #[test]
    fn test_decimal_on_empty_seeds_zero() {
        let mut buf = ExpressionBuffer::new();
        assert_eq!(buf.append_decimal_point(), "0.");
    }

    #[test]
    fn test_decimal_once_per_segment() {
        let mut buf = buffer("1.5");
        assert_eq!(buf.append_decimal_point(), "1.5");
        buf.append_operator('+');
        buf.append_digit_or_symbol("2");
        assert_eq!(buf.append_decimal_point(), "1.5+2.");
        assert_eq!(buf.append_decimal_point(), "1.5+2.");
    }

    #[test]
    fn test_decimal_after_operator_seeds_zero() {
        let mut buf = buffer("3+");
        assert_eq!(buf.append_decimal_point(), "3+0.");
        let mut buf = buffer("(");
        assert_eq!(buf.append_decimal_point(), "(0.");
    }

    #[test]
    fn test_decimal_after_closed_operand_ignored() {
        let mut buf = buffer("(2)");
        assert_eq!(buf.append_decimal_point(), "(2)");
        let mut buf = buffer("8%");
        assert_eq!(buf.append_decimal_point(), "8%");
    }

    // ===== toggle_sign =====

    #[test]
    fn test_toggle_sign_last_segment() {
        let mut buf = buffer("3+4");
        assert_eq!(buf.toggle_sign(), "3+-4");
        assert_eq!(buf.toggle_sign(), "3+4");
    }

    #[test]
    fn test_toggle_sign_single_number() {
        let mut buf = buffer("5");
        assert_eq!(buf.toggle_sign(), "-5");
        assert_eq!(buf.toggle_sign(), "5");
    }

    #[test]
    fn test_toggle_sign_after_subtraction() {
        let mut buf = buffer("3-4");
        assert_eq!(buf.toggle_sign(), "3--4");
        assert_eq!(buf.toggle_sign(), "3-4");
    }

    #[test]
    fn test_toggle_sign_on_group() {
        let mut buf = buffer("2*(2+3)");
        assert_eq!(buf.toggle_sign(), "2*-(2+3)");
        assert_eq!(buf.toggle_sign(), "2*(2+3)");
    }

    #[test]
    fn test_toggle_sign_inside_open_group() {
        let mut buf = buffer("(2+3");
        assert_eq!(buf.toggle_sign(), "(2+-3");
    }

    #[test]
    fn test_toggle_sign_with_percent() {
        let mut buf = buffer("50+10%");
        assert_eq!(buf.toggle_sign(), "50+-10%");
    }

    #[test]
    fn test_toggle_sign_noop_cases() {
        for expr in ["", "3+", "(", "2+3)"] {
            let mut buf = buffer(expr);
            buf.toggle_sign();
            assert_eq!(buf.expression(), expr);
        }
    }

    // ===== backspace / clear / percent =====

    #[test]
    fn test_backspace() {
        let mut buf = buffer("123");
        assert_eq!(buf.backspace(), "12");
        let mut empty = ExpressionBuffer::new();
        assert_eq!(empty.backspace(), "0");
    }

    #[test]
    fn test_clear_forgets_result() {
        let mut buf = buffer("2*3");
        buf.evaluate().unwrap();
        assert_eq!(buf.clear(), "0");
        assert_eq!(buf.last_result(), None);
        assert_eq!(buf.append_operator('+'), "0");
    }

    #[test]
    fn test_percent() {
        let mut buf = buffer("8");
        assert_eq!(buf.apply_percent(), "8%");
        let mut empty = ExpressionBuffer::new();
        assert_eq!(empty.apply_percent(), "0");
        assert!(empty.is_empty());
    }

    // ===== apply_unary_function =====

    #[test]
    fn test_unary_sqrt() {
        let mut buf = buffer("9");
        assert_eq!(buf.apply_unary_function(UnaryFunction::Sqrt).unwrap(), "3");
    }

    #[test]
    fn test_unary_evaluates_first() {
        let mut buf = buffer("1+2");
        assert_eq!(buf.apply_unary_function(UnaryFunction::Square).unwrap(), "9");
        let mut buf = buffer("2*2");
        assert_eq!(
            buf.apply_unary_function(UnaryFunction::Reciprocal).unwrap(),
            "0.25"
        );
    }

    #[test]
    fn test_unary_failure_leaves_buffer() {
        let mut buf = buffer("0-4");
        let err = buf.apply_unary_function(UnaryFunction::Sqrt).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidExpression(InvalidReason::Undefined { .. })
        ));
        assert_eq!(buf.expression(), "0-4");

        let mut buf = buffer("3+");
        assert!(buf.apply_unary_function(UnaryFunction::Square).is_err());
        assert_eq!(buf.expression(), "3+");
    }

    #[test]
    fn test_unary_on_empty_is_noop() {
        let mut buf = ExpressionBuffer::new();
        assert_eq!(buf.apply_unary_function(UnaryFunction::Sqrt).unwrap(), "0");
    }

    // ===== evaluate =====

    #[test]
    fn test_evaluate_replaces_expression() {
        let mut buf = buffer("5+3");
        let entry = buf.evaluate().unwrap().unwrap();
        assert_eq!(entry.expression, "5+3");
        assert_eq!(entry.result, "8");
        assert_eq!(buf.expression(), "8");
        assert_eq!(buf.last_result(), Some(8.0));
    }

    #[test]
    fn test_evaluate_chains() {
        let mut buf = buffer("5+3");
        buf.evaluate().unwrap();
        buf.append_operator('*');
        buf.append_digit_or_symbol("2");
        buf.evaluate().unwrap();
        assert_eq!(buf.expression(), "16");
    }

    #[test]
    fn test_evaluate_empty_is_none() {
        let mut buf = ExpressionBuffer::new();
        assert_eq!(buf.evaluate(), Ok(None));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_evaluate_failure_leaves_buffer() {
        let mut buf = buffer("5/0");
        assert!(buf.evaluate().is_err());
        assert_eq!(buf.expression(), "5/0");
        assert_eq!(buf.last_result(), None);
    }

    // ===== helpers =====

    #[test]
    fn test_last_operand_start() {
        assert_eq!(last_operand_start("12+345"), Some(3));
        assert_eq!(last_operand_start("1+(2*3)"), Some(2));
        assert_eq!(last_operand_start("(1+(2))%"), Some(0));
        assert_eq!(last_operand_start("1+"), None);
        assert_eq!(last_operand_start("1)"), None);
    }

    #[test]
    fn test_is_sign_at() {
        assert!(is_sign_at("-5", 0));
        assert!(is_sign_at("3+-5", 2));
        assert!(is_sign_at("(-5", 1));
        assert!(!is_sign_at("3-5", 1));
        assert!(!is_sign_at("3+5", 1));
    }
}
