//! Browser WASM bindings for the calculator
//!
//! The page owns the keypad markup; this module only receives events and
//! writes the `#display` and `#history` elements.

use wasm_bindgen::prelude::*;
use web_sys::{console, Document, Element};

use crate::app::{CalculatorApp, OutputSink};
use crate::config::CalculatorConfig;

use super::dom::{DISPLAY_ID, HISTORY_ID};

/// Writes rendered text into the page
#[derive(Debug)]
struct PageSink {
    display: Option<Element>,
    history: Option<Element>,
}

impl PageSink {
    fn find(document: Option<&Document>) -> Self {
        let lookup = |id: &str| document.and_then(|doc| doc.get_element_by_id(id));
        let sink = Self {
            display: lookup(DISPLAY_ID),
            history: lookup(HISTORY_ID),
        };
        if sink.display.is_none() {
            console::warn_1(&format!("#{DISPLAY_ID} element not found").into());
        }
        sink
    }
}

impl OutputSink for PageSink {
    fn set_display(&mut self, text: &str) {
        if let Some(element) = &self.display {
            element.set_text_content(Some(text));
        }
    }

    fn set_history(&mut self, text: &str) {
        if let Some(element) = &self.history {
            element.set_text_content(Some(text));
        }
    }
}

/// Browser Calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    app: CalculatorApp,
    sink: PageSink,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator bound to the current document
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator from a JSON configuration object
    pub fn from_config_json(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config =
            CalculatorConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(config))
    }

    /// Handles a keypad click from its `data-action` / `data-value` attributes
    pub fn handle_button(&mut self, action: &str, value: Option<String>) -> Result<(), JsValue> {
        self.app
            .dispatch_button(action, value.as_deref(), &mut self.sink)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Handles a keyboard key; returns false when the key is not mapped
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.app.dispatch_key(key, &mut self.sink)
    }

    /// Current display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.app.display().to_string()
    }

    /// Current history line
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> String {
        self.app.history_line().to_string()
    }

    /// Completed calculations as JSON
    pub fn history_json(&self) -> String {
        self.app
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }
}

impl BrowserCalculator {
    fn with_config(config: CalculatorConfig) -> Self {
        console_error_panic_hook::set_once();

        let document = web_sys::window().and_then(|w| w.document());
        let mut calculator = Self {
            app: CalculatorApp::new(config),
            sink: PageSink::find(document.as_ref()),
        };
        calculator.app.render(&mut calculator.sink);
        calculator
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Calculator WASM initialized".into());
}
