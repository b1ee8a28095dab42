//! Mock DOM
//!
//! An in-memory stand-in for the calculator page: the `display` and `history`
//! elements plus the keypad buttons, addressable by ID. It implements
//! [`OutputSink`] so the app renders into it exactly as it renders into the
//! real page.

use std::collections::HashMap;

use tracing::trace;

use crate::app::{CalculatorApp, OutputSink};
use crate::core::{CalcError, CalcResult};

use super::keypad::Keypad;

/// ID of the main display element
pub const DISPLAY_ID: &str = "display";
/// ID of the history line element
pub const HISTORY_ID: &str = "history";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed (`KeyboardEvent.key`)
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for driving the calculator without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator page: display, history line and keypad
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        let display = DomElement::new("div")
            .with_id(DISPLAY_ID)
            .with_class("display");
        let history = DomElement::new("div")
            .with_id(HISTORY_ID)
            .with_class("history");
        let keypad = Keypad::new().to_element();

        dom.root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator")
            .with_child(history.clone())
            .with_child(display.clone())
            .with_child(keypad.clone());

        dom.register_element(display);
        dom.register_element(history);
        for button in &keypad.children {
            dom.register_element(button.clone());
        }
        dom.register_element(keypad);

        dom
    }

    /// Creates the calculator page showing the app's initial texts
    #[must_use]
    pub fn for_app(app: &CalculatorApp) -> Self {
        let mut dom = Self::calculator();
        app.render(&mut dom);
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Dispatches an event into the app
    ///
    /// Clicks are resolved through the element's `data-action` and
    /// `data-value` attributes. Clicking an element that is not a keypad
    /// button, or a key that maps to nothing, leaves the app untouched.
    pub fn dispatch_event(&mut self, event: DomEvent, app: &mut CalculatorApp) -> CalcResult<()> {
        trace!(?event, "dom event");
        self.event_history.push(event.clone());

        match event {
            DomEvent::Click { element_id } => {
                let (action, value) = {
                    let element = self
                        .elements
                        .get(&element_id)
                        .ok_or_else(|| CalcError::UnknownAction(format!("#{element_id}")))?;
                    let action = element
                        .get_attr("data-action")
                        .ok_or_else(|| CalcError::UnknownAction(format!("#{element_id}")))?;
                    (
                        action.to_string(),
                        element.get_attr("data-value").map(str::to_string),
                    )
                };
                app.dispatch_button(&action, value.as_deref(), self)
            }
            DomEvent::KeyPress { key } => {
                app.dispatch_key(&key, self);
                Ok(())
            }
        }
    }

    /// Clicks a keypad button by element ID
    pub fn click(&mut self, element_id: &str, app: &mut CalculatorApp) -> CalcResult<()> {
        self.dispatch_event(DomEvent::click(element_id), app)
    }

    /// Presses a keyboard key; returns false when the key is not mapped
    pub fn press_key(&mut self, key: &str, app: &mut CalculatorApp) -> bool {
        let event = DomEvent::key_press(key);
        trace!(?event, "dom event");
        self.event_history.push(event);
        app.dispatch_key(key, self)
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Text of the display element
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.get_element_text(DISPLAY_ID).unwrap_or_default()
    }

    /// Text of the history element
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.get_element_text(HISTORY_ID).unwrap_or_default()
    }
}

impl OutputSink for MockDom {
    fn set_display(&mut self, text: &str) {
        self.set_element_text(DISPLAY_ID, text);
    }

    fn set_history(&mut self, text: &str) {
        self.set_element_text(HISTORY_ID, text);
    }
}
