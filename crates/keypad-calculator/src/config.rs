//! Calculator configuration

use serde::{Deserialize, Serialize};

use crate::buffer::EMPTY_DISPLAY;
use crate::history::History;

/// Display texts and history sizing
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Shown on the display when evaluation fails
    pub error_text: String,
    /// Shown on the display when the expression is empty
    pub empty_display: String,
    /// Shown on the history line before the first calculation
    pub empty_history: String,
    /// Number of completed calculations kept
    pub history_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            error_text: "Error".to_string(),
            empty_display: EMPTY_DISPLAY.to_string(),
            empty_history: "No history".to_string(),
            history_capacity: History::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the error indicator text
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Set the empty-history placeholder
    #[must_use]
    pub fn with_empty_history(mut self, text: impl Into<String>) -> Self {
        self.empty_history = text.into();
        self
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::new();
        assert_eq!(config.error_text, "Error");
        assert_eq!(config.empty_display, "0");
        assert_eq!(config.empty_history, "No history");
        assert_eq!(config.history_capacity, 50);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CalculatorConfig::from_json(r#"{"error_text":"Hata"}"#).unwrap();
        assert_eq!(config.error_text, "Hata");
        assert_eq!(config.empty_history, "No history");
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(
            CalculatorConfig::from_json("{}").unwrap(),
            CalculatorConfig::default()
        );
    }

    #[test]
    fn test_from_json_wrong_type() {
        assert!(CalculatorConfig::from_json(r#"{"history_capacity":"many"}"#).is_err());
    }

    #[test]
    fn test_builders() {
        let config = CalculatorConfig::new()
            .with_error_text("Err")
            .with_empty_history("")
            .with_history_capacity(3);
        assert_eq!(config.error_text, "Err");
        assert_eq!(config.empty_history, "");
        assert_eq!(config.history_capacity, 3);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CalculatorConfig::new().with_history_capacity(7);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CalculatorConfig::from_json(&json).unwrap(), config);
    }
}
