//! keypad-calc: command-line driver for the keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc 5+3=                  # press 5, +, 3, =
//! keypad-calc -q 9 '*' 9 Enter      # print only the final state
//! keypad-calc --config calc.json    # read keys from stdin
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod error;
mod runner;

pub use commands::Cli;
pub use error::{CliError, CliResult};
pub use runner::{load_config, run, split_keys, Replay, Screen};
