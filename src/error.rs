//! Structured error types for the Trellis layout engine.
//!
//! Layout itself never fails: degenerate numbers collapse to zero-sized
//! boxes. Errors are reserved for caller misuse at the API boundary.

use thiserror::Error;

/// The unified error type returned by fallible Trellis API functions.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// JSON input failed to parse as a canvas config.
    #[error("failed to parse canvas config: {source}{}", format_hint(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },

    /// Row heights can only be derived from content at unit scaling.
    #[error(
        "row heights must be resolved at design size (scaling is {scaling}, expected 1.0)\n  Hint: call Canvas::reset_to_design_size() first"
    )]
    NotAtDesignSize { scaling: f64 },

    /// A grid with rows must have at least one column.
    #[error("invalid grid size {rows}x{columns}: rows need at least one column")]
    InvalidGridSize { rows: usize, columns: usize },

    /// The design size must be positive and finite.
    #[error("invalid minimum canvas size {width}x{height}")]
    InvalidMinimumSize { width: f64, height: f64 },
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the canvas config schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => "Unexpected end of input. Is the JSON truncated?".to_string(),
            serde_json::error::Category::Io => String::new(),
        };
        LayoutError::ParseError { source: e, hint }
    }
}
