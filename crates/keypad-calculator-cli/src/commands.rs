//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// keypad-calc: replay keypad input through the calculator
///
/// Each KEY is a keyboard key name (`7`, `+`, `Enter`, `Backspace`,
/// `Escape`, ...). Any other argument is split into single-character keys,
/// so `5+3=` presses five keys. With no KEYS, key names are read from stdin
/// one line at a time.
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, overriding RUST_LOG (e.g. `debug`, `keypad_calculator=trace`)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print only the final display and history
    #[arg(short, long)]
    pub quiet: bool,

    /// Print every completed calculation at the end
    #[arg(long)]
    pub history: bool,

    /// Keys to press, in order
    #[arg(value_name = "KEYS")]
    pub keys: Vec<String>,
}
