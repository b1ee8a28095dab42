//! Keypad Calculator
//!
//! The engine behind a button-driven calculator: an expression buffer edited
//! one keypress at a time, and an evaluator for the restricted arithmetic
//! grammar the keypad can produce.
//!
//! # Layout
//!
//! - [`buffer`]: the expression being typed, with its editing rules
//! - [`core`]: sanitizing, parsing and evaluating finished expressions
//! - [`action`]: keyboard and keypad input mapped to [`action::Action`]
//! - [`app`]: dispatches actions and renders into an [`app::OutputSink`]
//! - [`wasm`]: an in-memory DOM, and browser bindings behind the `wasm` feature
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut app = CalculatorApp::default();
//! let mut dom = MockDom::for_app(&app);
//!
//! for key in ["5", "+", "3", "Enter"] {
//!     dom.press_key(key, &mut app);
//! }
//! assert_eq!(dom.display_text(), "8");
//! assert_eq!(dom.history_text(), "5+3 =");
//!
//! assert_eq!(evaluate("2+3*4").unwrap(), "14");
//! assert!(evaluate("5/0").is_err());
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod action;
pub mod app;
pub mod buffer;
pub mod config;
pub mod core;
pub mod history;

/// Web frontend - the mock DOM is always available for testing
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::app::{CalculatorApp, NullSink, OutputSink};
    pub use crate::buffer::ExpressionBuffer;
    pub use crate::config::CalculatorConfig;
    pub use crate::core::evaluator::{evaluate, evaluate_value};
    pub use crate::core::format::format_number;
    pub use crate::core::parser::{AstNode, BinaryOp, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, InvalidReason, UnaryFunction};
    pub use crate::history::{History, HistoryEntry};
    pub use crate::wasm::{DomElement, DomEvent, Keypad, KeypadButton, MockDom};
}
