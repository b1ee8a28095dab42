//! Key replay

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use keypad_calculator::action::Action;
use keypad_calculator::app::{CalculatorApp, OutputSink};
use keypad_calculator::config::CalculatorConfig;
use tracing::{debug, info};

use crate::commands::Cli;
use crate::error::{CliError, CliResult};

/// Loads configuration from a JSON file
pub fn load_config(path: &Path) -> CliResult<CalculatorConfig> {
    let json = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    CalculatorConfig::from_json(&json).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Splits one argument (or stdin line) into key names
///
/// A named key such as `Enter` is kept whole. Anything else is split into
/// single characters, skipping whitespace. Every key must map to an action.
pub fn split_keys(arg: &str) -> CliResult<Vec<String>> {
    let arg = arg.trim();
    if arg.chars().count() > 1 && Action::from_key(arg).is_some() {
        return Ok(vec![arg.to_string()]);
    }

    arg.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| {
            let key = ch.to_string();
            match Action::from_key(&key) {
                Some(_) => Ok(key),
                None => Err(CliError::unknown_key(key)),
            }
        })
        .collect()
}

/// Last texts the app rendered
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Display text
    pub display: String,
    /// History line text
    pub history: String,
}

impl OutputSink for Screen {
    fn set_display(&mut self, text: &str) {
        self.display = text.to_string();
    }

    fn set_history(&mut self, text: &str) {
        self.history = text.to_string();
    }
}

/// Replays keys through a calculator, printing to `out`
#[derive(Debug)]
pub struct Replay<W> {
    app: CalculatorApp,
    screen: Screen,
    out: W,
    quiet: bool,
}

impl<W: Write> Replay<W> {
    /// Creates a replay showing the app's initial texts
    pub fn new(config: CalculatorConfig, out: W, quiet: bool) -> Self {
        let app = CalculatorApp::new(config);
        let mut screen = Screen::default();
        app.render(&mut screen);
        Self {
            app,
            screen,
            out,
            quiet,
        }
    }

    /// Presses each key in turn
    pub fn press_all(&mut self, keys: &[String]) -> CliResult<()> {
        for key in keys {
            self.app.dispatch_key(key, &mut self.screen);
            if !self.quiet {
                self.print_screen(Some(key))?;
            }
        }
        Ok(())
    }

    /// Reads key names line by line and presses them
    pub fn press_lines(&mut self, input: impl BufRead) -> CliResult<()> {
        for line in input.lines() {
            let keys = split_keys(&line?)?;
            self.press_all(&keys)?;
        }
        Ok(())
    }

    /// Prints the final state, and the history log when requested
    pub fn finish(mut self, with_history: bool) -> CliResult<W> {
        if self.quiet {
            self.print_screen(None)?;
        }
        if with_history {
            for entry in self.app.history().iter() {
                writeln!(self.out, "{} {}", entry.line(), entry.result)?;
            }
        }
        Ok(self.out)
    }

    /// The calculator being driven
    pub fn app(&self) -> &CalculatorApp {
        &self.app
    }

    fn print_screen(&mut self, key: Option<&str>) -> CliResult<()> {
        match key {
            Some(key) => writeln!(
                self.out,
                "{key:<9} {:<16} | {}",
                self.screen.display, self.screen.history
            )?,
            None => writeln!(self.out, "{} | {}", self.screen.display, self.screen.history)?,
        }
        Ok(())
    }
}

/// Runs the CLI against the given input and output
pub fn run(cli: &Cli, input: impl BufRead, out: impl Write) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(path)?
        }
        None => CalculatorConfig::default(),
    };

    let mut replay = Replay::new(config, out, cli.quiet);
    if cli.keys.is_empty() {
        info!("reading keys from stdin");
        replay.press_lines(input)?;
    } else {
        let keys = cli
            .keys
            .iter()
            .map(|arg| split_keys(arg))
            .collect::<CliResult<Vec<_>>>()?
            .concat();
        replay.press_all(&keys)?;
    }
    replay.finish(cli.history)?;
    Ok(())
}
