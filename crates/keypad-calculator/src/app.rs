//! Calculator application
//!
//! Owns the buffer, the history and the display texts. Each input event is
//! handled to completion by [`CalculatorApp::dispatch`], which then pushes the
//! display and history text to an [`OutputSink`]. Evaluation errors stop here:
//! the display shows the configured error text and the buffer is unchanged.

use tracing::{debug, trace};

use crate::action::Action;
use crate::buffer::ExpressionBuffer;
use crate::config::CalculatorConfig;
use crate::core::{CalcError, CalcResult};
use crate::history::History;

/// Receives rendered text after every handled action
pub trait OutputSink {
    /// Sets the main display text
    fn set_display(&mut self, text: &str);

    /// Sets the one-line history text
    fn set_history(&mut self, text: &str);
}

/// Sink that discards output, for callers that read state through accessors
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn set_display(&mut self, _text: &str) {}

    fn set_history(&mut self, _text: &str) {}
}

/// Calculator state plus its rendered texts
#[derive(Debug, Clone)]
pub struct CalculatorApp {
    buffer: ExpressionBuffer,
    history: History,
    config: CalculatorConfig,
    display: String,
    history_line: String,
    last_error: Option<CalcError>,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl CalculatorApp {
    /// Creates a calculator showing the empty display and history placeholders
    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            history: History::with_capacity(config.history_capacity),
            display: config.empty_display.clone(),
            history_line: config.empty_history.clone(),
            config,
            last_error: None,
        }
    }

    /// Handles one action and renders the result into `sink`
    pub fn dispatch(&mut self, action: &Action, sink: &mut impl OutputSink) {
        debug!(%action, expression = self.buffer.expression(), "dispatch");

        self.last_error = self.apply(action).err();
        if let Some(err) = &self.last_error {
            debug!(error = %err, expression = self.buffer.expression(), "action failed");
        }

        self.display = if self.last_error.is_some() {
            self.config.error_text.clone()
        } else if self.buffer.is_empty() {
            self.config.empty_display.clone()
        } else {
            self.buffer.expression().to_string()
        };
        trace!(display = %self.display, history = %self.history_line, "render");

        self.render(sink);
    }

    /// Maps a keyboard key and dispatches it; returns false for unmapped keys
    pub fn dispatch_key(&mut self, key: &str, sink: &mut impl OutputSink) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                self.dispatch(&action, sink);
                true
            }
            None => {
                trace!(key, "unmapped key ignored");
                false
            }
        }
    }

    /// Maps a keypad button's `data-action`/`data-value` and dispatches it
    pub fn dispatch_button(
        &mut self,
        action: &str,
        value: Option<&str>,
        sink: &mut impl OutputSink,
    ) -> CalcResult<()> {
        let action = Action::from_button(action, value)?;
        self.dispatch(&action, sink);
        Ok(())
    }

    /// Pushes the current display and history text
    pub fn render(&self, sink: &mut impl OutputSink) {
        sink.set_display(&self.display);
        sink.set_history(&self.history_line);
    }

    fn apply(&mut self, action: &Action) -> CalcResult<()> {
        let buffer = &mut self.buffer;
        match action {
            Action::Number(digits) => {
                buffer.append_digit_or_symbol(digits);
            }
            Action::Operator(op) => {
                buffer.append_operator(*op);
            }
            Action::Decimal => {
                buffer.append_decimal_point();
            }
            Action::Clear => {
                buffer.clear();
                self.history_line.clone_from(&self.config.empty_history);
            }
            Action::Equals => {
                if let Some(entry) = buffer.evaluate()? {
                    debug!(expression = %entry.expression, result = %entry.result, "evaluated");
                    self.history_line = entry.line();
                    self.history.push(entry);
                }
            }
            Action::Backspace => {
                buffer.backspace();
            }
            Action::Sign => {
                buffer.toggle_sign();
            }
            Action::Function(function) => {
                buffer.apply_unary_function(*function)?;
            }
            Action::Parenthesis(paren) => {
                buffer.append_digit_or_symbol(&paren.to_string());
            }
            Action::Percent => {
                buffer.apply_percent();
            }
        }
        Ok(())
    }

    /// Text currently on the display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Text currently on the history line
    #[must_use]
    pub fn history_line(&self) -> &str {
        &self.history_line
    }

    /// Completed calculations
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The expression buffer
    #[must_use]
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Error from the most recent action, if it failed
    #[must_use]
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// Returns true while the display shows the error text
    #[must_use]
    pub fn is_error_displayed(&self) -> bool {
        self.last_error.is_some()
    }
}
