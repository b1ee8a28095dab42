//! Web frontend for the calculator
//!
//! [`MockDom`] renders the page in memory and is what the tests drive;
//! `BrowserCalculator` (behind the `wasm` feature) is the same app bound to a
//! real document.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom, DISPLAY_ID, HISTORY_ID};
pub use keypad::{Keypad, KeypadButton};
