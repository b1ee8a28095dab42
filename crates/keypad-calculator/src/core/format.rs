//! Canonical decimal text for results
//!
//! The text produced here becomes the next buffer expression, so it must
//! parse back to the same value: shortest round-trip digits, dot separator,
//! no trailing zeros and never an exponent.

/// Formats a finite number as canonical decimal text
///
/// Negative zero prints as `0`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    // f64's Display is shortest round-trip and never switches to exponent form
    format!("{n}")
}
